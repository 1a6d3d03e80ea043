use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Default base directory for all quote book storage.
pub fn default_base_dir() -> PathBuf {
    dirs_home().join(".quotesync")
}

fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// Sanitize a profile name for use as a filename.
pub fn sanitize_name(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Resolve (and create the directories for) the database file.
///
/// Layout:
/// ```text
/// <base>/
/// ├── quotes.db
/// ├── config.toml
/// └── profiles/
///     ├── <profile>.db
///     └── ...
/// ```
/// A blank or fully-sanitized-away profile name falls back to the default book.
pub fn resolve_db_path(profile: Option<&str>, base_dir: &Path) -> Result<PathBuf> {
    let profile = profile.map(sanitize_name).filter(|p| !p.is_empty());

    let dir = match &profile {
        Some(_) => base_dir.join("profiles"),
        None => base_dir.to_path_buf(),
    };
    fs::create_dir_all(&dir).map_err(|e| {
        StoreError::InvalidData(format!("failed to create {}: {e}", dir.display()))
    })?;

    Ok(match profile {
        Some(name) => dir.join(format!("{name}.db")),
        None => dir.join("quotes.db"),
    })
}
