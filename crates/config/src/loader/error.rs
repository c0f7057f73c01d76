//! Error types for configuration loading.
//!
//! Invariants:
//! - All error variants include context for debugging (variable names, paths, etc.).
//! - Errors never include secret values or raw `.env` line contents.

use std::io::ErrorKind;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Invalid base URL '{url}': {message}")]
    InvalidBaseUrl { url: String, message: String },

    #[error(
        "Authentication configuration is required (username/password or API token). Set them in .splunkrc, the environment, or on the command line."
    )]
    MissingAuth,

    #[error("Failed to read credentials file at {path}")]
    RcFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed line {line} in credentials file {path}: expected key=value")]
    RcFileParse { path: PathBuf, line: usize },

    #[error("Failed to open search file {path}")]
    SearchFileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("required parameter '--search' missing or empty")]
    MissingQuery,

    #[error("invalid timeout: {message}")]
    InvalidTimeout { message: String },

    #[error("invalid max retries: {message}")]
    InvalidMaxRetries { message: String },

    /// Failed to parse the `.env` file due to invalid syntax.
    ///
    /// Only the byte index of the failure is kept, never the offending line.
    #[error(
        "Failed to parse .env file at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip .env loading"
    )]
    DotenvParse { error_index: usize },

    /// Failed to read the `.env` file due to an I/O error.
    #[error("Failed to read .env file: {kind}")]
    DotenvIo { kind: ErrorKind },

    #[error("Failed to load .env file. Hint: set DOTENV_DISABLED=1 to skip .env loading")]
    DotenvUnknown,
}

impl ConfigError {
    /// True for failures to read a file the user pointed at.
    pub fn is_file_error(&self) -> bool {
        matches!(
            self,
            Self::RcFileRead { .. } | Self::SearchFileRead { .. } | Self::DotenvIo { .. }
        )
    }
}
