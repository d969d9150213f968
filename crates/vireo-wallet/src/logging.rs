//! Log subscriber setup.
//!
//! The GUI shell owns stdout, so logs go to a daily-rotated file under
//! the Vireo home directory. The returned guard must be held for the
//! process lifetime; dropping it stops the background writer.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::{Config, paths};

/// Initializes the global tracing subscriber.
///
/// Filter resolution order: `VIREO_LOG` env var, then the config's
/// `log_level`. Call once, before the event loop starts.
pub fn init(config: &Config) -> Result<WorkerGuard> {
    let log_dir = paths::log_dir();
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("Failed to create log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(&log_dir, "vireo.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env("VIREO_LOG")
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
