//! Tracing subscriber setup.
//!
//! The terminal UI owns stdout/stderr while it runs, so in that mode logs go
//! to `<log_dir>/pustaka.log` through a non-blocking appender. Plain mode logs
//! to stderr. `RUST_LOG` overrides the default level in both modes.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::{self, WorkerGuard};
use tracing_appender::rolling;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "pustaka.log";

fn filter(debug: bool) -> EnvFilter {
    let default = if debug { "debug" } else { "info" };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default))
}

/// Log to stderr.
pub fn init_stderr(debug: bool) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))
}

/// Log to a file under `log_dir`.
///
/// The returned guard flushes buffered lines on drop and must be held until
/// the process exits.
pub fn init_file(log_dir: &Path, debug: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(log_dir).with_context(|| format!("create log dir {}", log_dir.display()))?;

    let appender = rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = non_blocking::NonBlockingBuilder::default()
        .lossy(false)
        .finish(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter(debug))
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("install subscriber: {e}"))?;

    Ok(guard)
}
