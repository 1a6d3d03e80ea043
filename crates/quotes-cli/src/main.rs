mod app;
mod remote;
mod sync;
mod view;

use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use quotes_core::{
    ALL_CATEGORIES, EMPTY_PLACEHOLDER, EXPORT_FILE_NAME, filter_by_category, format_quote,
};
use quotes_store::{Config, QuoteStore, resolve_db_path};
use rand::SeedableRng;
use rand::rngs::SmallRng;
use tokio::sync::{Mutex, mpsc};
use tokio_util::sync::CancellationToken;

use crate::app::AppState;
use crate::remote::{HttpRemote, QuoteRemote};
use crate::sync::{SyncLoop, Trigger};
use crate::view::TerminalView;

#[derive(Parser)]
#[command(name = "quotes", about = "Quote book with periodic server sync")]
struct Cli {
    /// Use a separate named quote book
    #[arg(long, global = true)]
    profile: Option<String>,

    /// Enable verbose debug output
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show one random quote
    Show {
        /// Category to filter by (remembered for next time)
        #[arg(long)]
        category: Option<String>,
    },

    /// Add a quote
    Add {
        text: String,
        category: String,

        /// Don't publish the quote to the server
        #[arg(long)]
        offline: bool,
    },

    /// Print every quote in order
    List {
        #[arg(long)]
        category: Option<String>,
    },

    /// Print the category list
    Categories,

    /// Export quotes to a JSON file
    Export {
        #[arg(default_value = EXPORT_FILE_NAME)]
        path: PathBuf,
    },

    /// Append quotes from a JSON file
    Import { path: PathBuf },

    /// Fetch server quotes once and merge them in
    Sync,

    /// Keep showing quotes and sync on a timer until Ctrl-C.
    /// Enter shows another quote, `s` syncs now, `q` quits.
    Watch {
        /// Seconds between syncs (overrides config)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval: Option<u64>,
    },
}

fn data_dir() -> PathBuf {
    std::env::var("QUOTES_DATA_DIR")
        .ok()
        .map(PathBuf::from)
        .unwrap_or_else(quotes_store::default_base_dir)
}

fn load_config(data_dir: &Path) -> Result<Config> {
    Ok(Config::load(data_dir)
        .context("failed to load config")?
        .with_env_overrides())
}

fn open_app(cli: &Cli, data_dir: &Path) -> Result<AppState> {
    let db_path =
        resolve_db_path(cli.profile.as_deref(), data_dir).context("failed to resolve data dir")?;
    let store = QuoteStore::open(&db_path)
        .with_context(|| format!("failed to open {}", db_path.display()))?;
    Ok(AppState::load(store, SmallRng::from_os_rng()))
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into())
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let data_dir = data_dir();
    let config = load_config(&data_dir)?;
    let mut app = open_app(&cli, &data_dir)?;

    match &cli.command {
        Commands::Show { category } => cmd_show(&mut app, &config, category.as_deref()),
        Commands::Add {
            text,
            category,
            offline,
        } => cmd_add(&mut app, &config, text, category, *offline).await,
        Commands::List { category } => cmd_list(&app, category.as_deref()),
        Commands::Categories => cmd_categories(&app),
        Commands::Export { path } => cmd_export(&app, path),
        Commands::Import { path } => cmd_import(&mut app, path),
        Commands::Sync => cmd_sync(app, &config).await,
        Commands::Watch { interval } => {
            let period = interval
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.sync_interval());
            cmd_watch(app, &config, &data_dir, period).await
        }
    }
}

// ---------------------------------------------------------------------------
// Watcher pidfile
// ---------------------------------------------------------------------------

const PIDFILE_NAME: &str = "quotes-watch.pid";

/// Record this watcher's PID in the data dir. Advisory only: a second live
/// watcher is reported but not blocked.
fn write_pidfile(data_dir: &Path) -> Option<PathBuf> {
    let path = data_dir.join(PIDFILE_NAME);
    let previous = std::fs::read_to_string(&path)
        .ok()
        .and_then(|content| content.trim().parse::<u32>().ok());
    match previous {
        Some(pid) if pid_running(pid) => {
            tracing::warn!("quotes watch is already running as PID {pid}; syncs may overlap");
        }
        Some(pid) => tracing::info!("replacing pidfile left by exited watcher {pid}"),
        None => {}
    }

    if let Err(e) = std::fs::create_dir_all(data_dir) {
        tracing::warn!("cannot create {}: {e}", data_dir.display());
    }
    match std::fs::write(&path, std::process::id().to_string()) {
        Ok(()) => {
            tracing::debug!("watch pidfile at {}", path.display());
            Some(path)
        }
        Err(e) => {
            tracing::warn!("watching without a pidfile: {e}");
            None
        }
    }
}

fn remove_pidfile(path: &Path) {
    if let Err(e) = std::fs::remove_file(path) {
        tracing::debug!("pidfile {} already gone: {e}", path.display());
    }
}

/// Signal 0 probes for the process without delivering anything.
#[cfg(unix)]
fn pid_running(pid: u32) -> bool {
    unsafe { libc::kill(pid as libc::pid_t, 0) == 0 }
}

#[cfg(not(unix))]
fn pid_running(_pid: u32) -> bool {
    false
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

fn cmd_show(app: &mut AppState, config: &Config, category: Option<&str>) -> Result<()> {
    let mut view = TerminalView::new(config.status_ttl());
    app.show(&mut view, category)
        .context("failed to save category filter")?;
    Ok(())
}

async fn cmd_add(
    app: &mut AppState,
    config: &Config,
    text: &str,
    category: &str,
    offline: bool,
) -> Result<()> {
    let quote = app.add(text, category).context("failed to add quote")?;
    println!("Quote added successfully!");

    if offline {
        return Ok(());
    }
    let remote = HttpRemote::new(config).context("failed to build HTTP client")?;
    if let Err(e) = remote.post_quote(&quote).await {
        tracing::warn!("failed to post quote to {}: {e}", remote.url());
    }
    Ok(())
}

fn cmd_list(app: &AppState, category: Option<&str>) -> Result<()> {
    let quotes = filter_by_category(app.quotes(), category.unwrap_or(ALL_CATEGORIES));
    if quotes.is_empty() {
        println!("{EMPTY_PLACEHOLDER}");
    }
    for quote in quotes {
        println!("{}\n", format_quote(quote));
    }
    Ok(())
}

fn cmd_categories(app: &AppState) -> Result<()> {
    for category in app.categories() {
        println!("{category}");
    }
    Ok(())
}

fn cmd_export(app: &AppState, path: &Path) -> Result<()> {
    app.export_file(path)
        .with_context(|| format!("failed to export to {}", path.display()))?;
    println!("exported {} quotes to {}", app.quotes().len(), path.display());
    Ok(())
}

fn cmd_import(app: &mut AppState, path: &Path) -> Result<()> {
    let summary = app
        .import_file(path)
        .with_context(|| format!("failed to import {}", path.display()))?;
    println!("Quotes imported successfully!");
    println!("added: {}, skipped: {}", summary.added, summary.skipped);
    Ok(())
}

async fn cmd_sync(app: AppState, config: &Config) -> Result<()> {
    let remote = HttpRemote::new(config).context("failed to build HTTP client")?;
    let sync = SyncLoop::new(Arc::new(Mutex::new(app)), remote, CancellationToken::new());
    let mut view = TerminalView::new(config.status_ttl());

    // A failed sync is reported through the view and is not an error exit.
    let outcome = sync.sync_once(&mut view).await;
    tracing::debug!(?outcome, "sync finished");
    Ok(())
}

async fn cmd_watch(app: AppState, config: &Config, data_dir: &Path, period: Duration) -> Result<()> {
    let remote = HttpRemote::new(config).context("failed to build HTTP client")?;

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("received Ctrl-C, shutting down");
            ctrl_c.cancel();
        }
    });
    let pidfile = write_pidfile(data_dir);

    // Blocking stdin reads live on a plain thread so they never hold up exit.
    let (tx, rx) = mpsc::channel(8);
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            match Trigger::parse(&line) {
                Some(trigger) => {
                    if tx.blocking_send(trigger).is_err() {
                        break;
                    }
                }
                None => eprintln!("unknown input '{}' (enter, s or q)", line.trim()),
            }
        }
    });

    tracing::info!(
        "watching {} (filter: {})",
        remote.url(),
        app.last_filter().as_deref().unwrap_or(ALL_CATEGORIES)
    );
    let state = Arc::new(Mutex::new(app));
    let mut view = TerminalView::new(config.status_ttl()).with_filter_header();
    state.lock().await.refresh(&mut view);

    let sync = SyncLoop::new(state.clone(), remote, cancel);
    sync.run(&mut view, period, rx).await;

    if let Some(text) = state.lock().await.last_viewed() {
        tracing::debug!("last viewed quote: {text}");
    }

    if let Some(path) = pidfile {
        remove_pidfile(&path);
    }
    Ok(())
}
