//! Integration tests for shutdown of `quotes watch`.
//! Verifies that `q` and SIGINT both exit cleanly and remove the pidfile.

use std::io::Write;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};
use tempfile::TempDir;

fn quotes_binary() -> std::path::PathBuf {
    assert_cmd::cargo::cargo_bin!("quotes").into()
}

fn spawn_watch(data_dir: &TempDir) -> std::process::Child {
    Command::new(quotes_binary())
        .args(["watch", "--interval", "3600"])
        .env("QUOTES_DATA_DIR", data_dir.path())
        .env("QUOTES_SERVER_URL", "http://127.0.0.1:1/posts")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("failed to spawn quotes watch")
}

/// Wait for the pidfile to appear, indicating the watcher has started.
fn wait_for_pidfile(data_dir: &TempDir) {
    let pidfile = data_dir.path().join("quotes-watch.pid");
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if pidfile.exists() {
            // Give the loop a moment to take its first tick
            std::thread::sleep(Duration::from_millis(300));
            return;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
}

#[test]
fn watch_exits_on_quit_command() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_watch(&dir);
    wait_for_pidfile(&dir);

    let stdin = child.stdin.as_mut().expect("stdin pipe");
    writeln!(stdin, "q").unwrap();
    stdin.flush().unwrap();

    let start = Instant::now();
    let output = child.wait_with_output().expect("wait");
    let elapsed = start.elapsed();

    assert!(
        output.status.success(),
        "quit should exit 0, got {}",
        output.status
    );
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
}

#[test]
fn watch_keeps_running_after_stdin_eof() {
    let dir = TempDir::new().unwrap();
    let mut child = spawn_watch(&dir);
    wait_for_pidfile(&dir);

    // Without interactive input the timer still drives the loop
    drop(child.stdin.take());
    std::thread::sleep(Duration::from_millis(300));
    assert!(
        child.try_wait().expect("try_wait").is_none(),
        "watch should not exit on stdin EOF"
    );

    child.kill().unwrap();
    child.wait().unwrap();
}

#[cfg(unix)]
#[test]
fn watch_exits_on_sigint() {
    let dir = TempDir::new().unwrap();
    let pidfile = dir.path().join("quotes-watch.pid");
    let mut child = spawn_watch(&dir);
    wait_for_pidfile(&dir);

    unsafe {
        libc::kill(child.id() as libc::pid_t, libc::SIGINT);
    }

    let start = Instant::now();
    let status = child.wait().expect("wait");
    let elapsed = start.elapsed();

    assert!(status.success(), "SIGINT should exit 0, got {status}");
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");
    assert!(!pidfile.exists(), "pidfile should be removed on Ctrl-C");
}

#[test]
fn pidfile_created_and_removed_on_exit() {
    let dir = TempDir::new().unwrap();
    let pidfile = dir.path().join("quotes-watch.pid");

    let mut child = spawn_watch(&dir);
    wait_for_pidfile(&dir);

    assert!(pidfile.exists(), "pidfile should exist while watching");

    let content = std::fs::read_to_string(&pidfile).unwrap();
    let file_pid: u32 = content
        .trim()
        .parse()
        .expect("pidfile should contain a PID");
    assert_eq!(file_pid, child.id(), "pidfile PID should match child PID");

    let stdin = child.stdin.as_mut().expect("stdin pipe");
    writeln!(stdin, "q").unwrap();
    child.wait().expect("wait");

    assert!(
        !pidfile.exists(),
        "pidfile should be removed after clean shutdown"
    );
}

#[test]
fn stale_pidfile_is_replaced() {
    let dir = TempDir::new().unwrap();
    let pidfile = dir.path().join("quotes-watch.pid");
    // PIDs this large are never handed out
    std::fs::write(&pidfile, "999999999").unwrap();

    let mut child = spawn_watch(&dir);
    let deadline = Instant::now() + Duration::from_secs(5);
    while Instant::now() < deadline {
        if std::fs::read_to_string(&pidfile).is_ok_and(|c| c.trim() == child.id().to_string()) {
            break;
        }
        std::thread::sleep(Duration::from_millis(50));
    }
    assert_eq!(
        std::fs::read_to_string(&pidfile).unwrap().trim(),
        child.id().to_string()
    );

    let stdin = child.stdin.as_mut().expect("stdin pipe");
    writeln!(stdin, "q").unwrap();
    assert!(child.wait().expect("wait").success());
}
