//! Tracing setup.
//!
//! The CLI logs to stderr. The picker owns the terminal, so it logs to a file
//! under `${MODELPICK_HOME}/logs` instead.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
pub const LOG_ENV: &str = "MODELPICK_LOG";

const LOG_FILE: &str = "modelpick.log";

fn build_env_filter(verbose: bool) -> EnvFilter {
    let base = if verbose {
        "info,modelpick_core=debug"
    } else {
        "warn"
    };

    match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(base)),
        Err(_) => EnvFilter::new(format!("{base},hyper=warn,reqwest=warn")),
    }
}

/// Installs a stderr subscriber. Does nothing if one is already installed.
pub fn init_stderr(verbose: bool) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Installs a subscriber writing to `dir/modelpick.log`.
///
/// Keep the returned guard alive until exit or buffered lines are lost.
pub fn init_file(dir: &Path, verbose: bool) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(build_env_filter(verbose))
        .with_writer(writer)
        .with_ansi(false)
        .try_init();

    Ok(guard)
}
