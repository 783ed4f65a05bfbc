//! Application logging
//!
//! Log output goes to stderr. With `--log-file` a copy also goes to a daily
//! rolling file, `<config dir>/penstroke/logs/penstroke.log.<date>`.

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::filter_fn, fmt, prelude::*, EnvFilter};

/// Get the path to the logs directory
pub fn logs_dir() -> PathBuf {
    crate::core::config_file::ConfigFile::config_dir().join("logs")
}

/// Events with this target go to the log file only, never to stderr
pub const FILE_ONLY_TARGET: &str = "penstroke::file_only";

fn shown_on_stderr(target: &str) -> bool {
    target != FILE_ONLY_TARGET
}

const LOG_FILE_PREFIX: &str = "penstroke.log";

/// Name of the file today's events are written to
///
/// The appender rolls over at midnight UTC and suffixes the prefix with the date.
pub fn current_log_file_name() -> String {
    let timestamp = chrono::Utc::now().format("%Y-%m-%d");
    format!("{LOG_FILE_PREFIX}.{timestamp}")
}

/// Default filter directive for a `-v` count
///
/// `RUST_LOG`, when set, takes precedence over this.
pub fn filter_directive(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber
///
/// The returned guard flushes the log file when dropped, so keep it alive
/// until the program exits.
pub fn init(verbosity: u8, log_to_file: bool) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));
    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter_fn(|metadata| shown_on_stderr(metadata.target())));

    if !log_to_file {
        tracing_subscriber::registry()
            .with(filter)
            .with(stderr_layer)
            .try_init()
            .context("Failed to install the log subscriber")?;
        return Ok(None);
    }

    let dir = logs_dir();
    fs::create_dir_all(&dir)
        .with_context(|| format!("Failed to create logs directory {}", dir.display()))?;
    let appender = tracing_appender::rolling::daily(&dir, LOG_FILE_PREFIX);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let file_layer = fmt::layer().with_writer(writer).with_ansi(false);

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install the log subscriber")?;
    tracing::debug!("Logging to {}", dir.join(current_log_file_name()).display());
    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(filter_directive(0), "warn");
        assert_eq!(filter_directive(1), "info");
        assert_eq!(filter_directive(2), "debug");
        assert_eq!(filter_directive(9), "trace");
    }

    #[test]
    fn test_log_file_name_is_dated() {
        let name = current_log_file_name();
        // penstroke.log.YYYY-MM-DD
        assert!(name.starts_with("penstroke.log."));
        assert_eq!(name.len(), "penstroke.log.".len() + 10);
    }

    #[test]
    fn test_file_only_events_skip_stderr() {
        assert!(!shown_on_stderr(FILE_ONLY_TARGET));
        assert!(shown_on_stderr("penstroke::core::runner"));
    }

    #[test]
    fn test_logs_live_under_config_dir() {
        assert!(logs_dir().ends_with("penstroke/logs"));
    }
}
