//! The search request submitted by a single run.

use crate::endpoints::search::OutputMode;
use crate::error::Result;
use crate::query::normalize_query;

/// A normalized search plus its time window and output format.
///
/// Built once per run; the query always starts with `search ` after
/// construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    pub earliest_time: String,
    pub latest_time: String,
    pub output_mode: OutputMode,
}

impl SearchRequest {
    /// Normalize `raw_query` and bundle it with the time window.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ClientError::InvalidQuery`] if the query is empty after trimming.
    pub fn new(
        raw_query: &str,
        keep_metadata: bool,
        earliest_time: impl Into<String>,
        latest_time: impl Into<String>,
        output_mode: OutputMode,
    ) -> Result<Self> {
        Ok(Self {
            query: normalize_query(raw_query, keep_metadata)?,
            earliest_time: earliest_time.into(),
            latest_time: latest_time.into(),
            output_mode,
        })
    }
}
