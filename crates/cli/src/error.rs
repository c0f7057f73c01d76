//! Run errors and process exit codes.
//!
//! Responsibilities:
//! - Define [`SearchError`], the error kinds a search run can end with.
//! - Define [`ExitCode`] and map errors (typed or inside an `anyhow` chain) onto it.
//!
//! Does NOT handle:
//! - Printing errors (main prints the chain with `{:#}`).
//! - Signal handling (see cancellation.rs).
//!
//! Invariants:
//! - Query problems exit 2, file problems exit 3, remote problems exit 4.
//! - Exit code 130 is reserved for SIGINT (Unix standard: 128 + SIGINT).

use std::path::PathBuf;

use splunk_search_client::ClientError;
use splunk_search_config::ConfigError;
use thiserror::Error;

/// Ways a search run can fail.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The query is missing, empty, or could not be normalized.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Configuration could not be assembled (includes unreadable input files).
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The remote service could not be reached or answered with a fault.
    #[error("remote service error: {0}")]
    Remote(#[from] ClientError),

    /// A non-success export status. Retried inside the export loop and only
    /// ever logged, never returned from a run.
    #[error("export request returned HTTP {status}")]
    Transient { status: u16 },

    /// The output file could not be opened, written, or flushed.
    #[error("output file error for {path}")]
    OutputIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The log file given with `--log-file` could not be opened.
    #[error("cannot open log file {path}")]
    LogFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The run was interrupted with Ctrl+C.
    #[error("cancelled")]
    Cancelled,
}

/// Structured exit codes for splunk-search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Search completed and output was written.
    Success = 0,

    /// General error - configuration or an unclassified failure.
    GeneralError = 1,

    /// The query parameter is missing or empty.
    InvalidQuery = 2,

    /// A query file, credentials file, output file or log file could not be used.
    FileError = 3,

    /// Connection failure or a failed call to the search service.
    RemoteServiceError = 4,

    /// Interrupted - SIGINT/Ctrl+C (Unix standard: 128 + 2).
    Interrupted = 130,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingQuery => ExitCode::InvalidQuery,
            e if e.is_file_error() => ExitCode::FileError,
            _ => ExitCode::GeneralError,
        }
    }
}

impl From<&ClientError> for ExitCode {
    fn from(err: &ClientError) -> Self {
        match err {
            ClientError::InvalidQuery(_) => ExitCode::InvalidQuery,
            _ => ExitCode::RemoteServiceError,
        }
    }
}

impl From<&SearchError> for ExitCode {
    fn from(err: &SearchError) -> Self {
        match err {
            SearchError::InvalidQuery(_) => ExitCode::InvalidQuery,
            SearchError::Config(e) => ExitCode::from(e),
            SearchError::Remote(e) => ExitCode::from(e),
            SearchError::Transient { .. } => ExitCode::RemoteServiceError,
            SearchError::OutputIo { .. } | SearchError::LogFile { .. } => ExitCode::FileError,
            SearchError::Cancelled => ExitCode::Interrupted,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Extract the appropriate exit code from this error.
    ///
    /// Returns ExitCode::GeneralError if no known error type is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        for cause in self.chain() {
            if let Some(e) = cause.downcast_ref::<SearchError>() {
                return ExitCode::from(e);
            }
            if let Some(e) = cause.downcast_ref::<ConfigError>() {
                return ExitCode::from(e);
            }
            if let Some(e) = cause.downcast_ref::<ClientError>() {
                return ExitCode::from(e);
            }
        }
        ExitCode::GeneralError
    }
}

/// Returns true if this anyhow error represents a cancellation.
pub fn is_cancelled_error(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<SearchError>(),
        Some(SearchError::Cancelled)
    )
}
