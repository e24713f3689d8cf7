//! Tracing subscriber setup.
//!
//! `RUST_LOG` wins over the configured level when set. Log lines always go to
//! stderr; when a directory is configured they are also appended to a daily
//! rotated `camdodge.log.YYYY-MM-DD` file through a non-blocking writer.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

pub use tracing_appender::non_blocking::WorkerGuard;

/// Prefix of the rotated log files.
pub const LOG_FILE_PREFIX: &str = "camdodge.log";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Failed to create log directory {path}: {source}")]
    Directory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid log filter '{0}'")]
    Filter(String),

    #[error("Failed to install tracing subscriber: {0}")]
    Install(String),
}

/// Builds the filter from `RUST_LOG`, falling back to `level`.
pub fn build_filter(level: &str) -> Result<EnvFilter, LoggingError> {
    match EnvFilter::try_from_default_env() {
        Ok(filter) => Ok(filter),
        Err(_) => parse_filter(level),
    }
}

/// Parses a filter directive such as `info` or `camdodge=debug`.
pub fn parse_filter(directives: &str) -> Result<EnvFilter, LoggingError> {
    EnvFilter::try_new(directives).map_err(|_| LoggingError::Filter(directives.to_string()))
}

/// Installs the global subscriber.
///
/// Returns the file writer's guard when file logging is enabled; keep it
/// alive until exit or buffered lines are lost.
pub fn init(level: &str, directory: Option<&Path>) -> Result<Option<WorkerGuard>, LoggingError> {
    let filter = build_filter(level)?;
    let stderr_layer = fmt::layer().with_target(false).with_writer(std::io::stderr);

    let (file_layer, guard) = match directory {
        Some(dir) => {
            std::fs::create_dir_all(dir).map_err(|source| LoggingError::Directory {
                path: dir.to_path_buf(),
                source,
            })?;
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .map_err(|e| LoggingError::Install(e.to_string()))?;

    if let Some(dir) = directory {
        tracing::debug!(directory = %dir.display(), "File logging enabled");
    }
    Ok(guard)
}
