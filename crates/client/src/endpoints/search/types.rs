//! Search types and options.
//!
//! # What this module handles:
//! - Search job creation options
//! - Export request options
//! - Output format for results
//!
//! # What this module does NOT handle:
//! - Search execution logic
//! - Result parsing (results are passed through as raw bytes)

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Options for creating a search job.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateJobOptions {
    /// Earliest time for search (e.g., "-24h", "2024-01-01T00:00:00").
    pub earliest_time: Option<String>,
    /// Latest time for search (e.g., "now").
    pub latest_time: Option<String>,
    /// Maximum number of events to return; `0` removes the cap.
    pub count: Option<u64>,
}

/// Options for the streaming export endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    pub earliest_time: String,
    pub latest_time: String,
    pub output_mode: OutputMode,
    /// Server-side search timeout sent as the `timeout` parameter.
    pub timeout_secs: u64,
}

/// Output format for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    #[default]
    Csv,
    Xml,
    Json,
}

impl OutputMode {
    /// Value sent as `output_mode`.
    pub fn as_str(self) -> &'static str {
        match self {
            OutputMode::Csv => "csv",
            OutputMode::Xml => "xml",
            OutputMode::Json => "json",
        }
    }
}

impl fmt::Display for OutputMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when an output mode string is not csv, xml or json.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid output mode '{0}' (expected csv, xml or json)")]
pub struct ParseOutputModeError(pub String);

impl FromStr for OutputMode {
    type Err = ParseOutputModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputMode::Csv),
            "xml" => Ok(OutputMode::Xml),
            "json" => Ok(OutputMode::Json),
            _ => Err(ParseOutputModeError(s.to_string())),
        }
    }
}
