//! Logging setup for the binary.
//!
//! Responsibilities:
//! - Build the `EnvFilter` (`RUST_LOG` wins, else `--log-level`).
//! - Install a stderr `fmt` layer plus an optional non-ANSI file layer.
//!
//! Does NOT handle:
//! - Progress display (see progress.rs); progress bars bypass tracing.
//!
//! Invariants:
//! - Nothing here writes to stdout.
//! - The log file is opened in append mode and never truncated.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Arc;

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::args::LogLevel;
use crate::error::SearchError;

/// Filter from `RUST_LOG` when set and valid, otherwise from `level`.
pub fn build_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.as_filter()))
}

/// Install the global subscriber.
///
/// # Errors
///
/// Returns [`SearchError::LogFile`] if `log_file` cannot be opened for appending.
pub fn init(level: LogLevel, log_file: Option<&Path>) -> Result<(), SearchError> {
    let file_layer = match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(|source| SearchError::LogFile {
                    path: path.to_path_buf(),
                    source,
                })?;
            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_writer(Arc::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .init();
    Ok(())
}
