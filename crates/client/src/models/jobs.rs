//! Search job status model.
//!
//! # What this module handles:
//! - Deserializing `entry[0].content` of `GET /search/jobs/{sid}`
//! - Readiness and progress helpers used by the poll loop
//!
//! # What this module does NOT handle:
//! - Polling or scheduling (see the CLI's job strategy)
//! - HTTP transport (see [`crate::endpoints::search`])

use serde::{Deserialize, Serialize};

/// Search job status.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
pub struct SearchJobStatus {
    #[serde(default)]
    pub sid: String,
    #[serde(rename = "dispatchState", default)]
    pub dispatch_state: Option<String>,
    #[serde(
        rename = "isDone",
        default,
        deserialize_with = "crate::serde_helpers::bool_from_string_or_bool"
    )]
    pub is_done: bool,
    #[serde(
        rename = "isFailed",
        default,
        deserialize_with = "crate::serde_helpers::bool_from_string_or_bool"
    )]
    pub is_failed: bool,
    #[serde(
        rename = "doneProgress",
        default,
        deserialize_with = "crate::serde_helpers::f64_from_string_or_number"
    )]
    pub done_progress: f64,
    #[serde(
        rename = "scanCount",
        default,
        deserialize_with = "crate::serde_helpers::usize_from_string_or_number"
    )]
    pub scan_count: usize,
    #[serde(
        rename = "eventCount",
        default,
        deserialize_with = "crate::serde_helpers::usize_from_string_or_number"
    )]
    pub event_count: usize,
    #[serde(
        rename = "resultCount",
        default,
        deserialize_with = "crate::serde_helpers::usize_from_string_or_number"
    )]
    pub result_count: usize,
    #[serde(
        rename = "runDuration",
        default,
        deserialize_with = "crate::serde_helpers::f64_from_string_or_number"
    )]
    pub run_duration: f64,
}

impl SearchJobStatus {
    /// A job is ready once it has left the `QUEUED` and `PARSING` dispatch states.
    ///
    /// Before that, the counters are not meaningful.
    pub fn is_ready(&self) -> bool {
        !matches!(
            self.dispatch_state.as_deref(),
            Some("QUEUED") | Some("PARSING")
        )
    }

    /// `doneProgress` as a percentage in `0.0..=100.0`.
    pub fn progress_percent(&self) -> f64 {
        (self.done_progress * 100.0).clamp(0.0, 100.0)
    }

    /// One-line progress summary in the form
    /// `42.0%   1000 scanned   20 matched   5 results   1.50s`.
    pub fn progress_line(&self) -> String {
        format!(
            "{:.1}%   {} scanned   {} matched   {} results   {:.2}s",
            self.progress_percent(),
            self.scan_count,
            self.event_count,
            self.result_count,
            self.run_duration
        )
    }
}
