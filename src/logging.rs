//! Tracing subscriber setup
//!
//! Filter comes from `RUST_LOG`, defaulting to `warn`. One-shot commands log
//! to stderr; the TUI logs to a file so output never lands on the alternate
//! screen.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::project_dirs;

const DEFAULT_FILTER: &str = "warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Log to stderr
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// `dishhub-admin.log` in the platform cache directory
pub fn default_log_path() -> Option<PathBuf> {
    project_dirs().map(|d| d.cache_dir().join("dishhub-admin.log"))
}

/// Log to a file; falls back to no logging when the file cannot be opened.
/// Returns the path actually used.
pub fn init_file(path: Option<PathBuf>) -> Option<PathBuf> {
    let path = path.or_else(default_log_path)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path).ok()?;

    tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;

    Some(path)
}
