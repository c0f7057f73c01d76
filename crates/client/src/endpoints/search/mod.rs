//! Search endpoints.
//!
//! # What this module handles:
//! - Search job lifecycle: create, status, results, cancel ([`jobs`])
//! - The streaming export endpoint ([`export`])
//! - Request option types and output modes ([`types`])
//!
//! # What this module does NOT handle:
//! - Polling cadence or export retry policy (owned by the CLI strategies)
//! - Session renewal (see [`crate::client`])

mod export;
mod jobs;
mod types;

pub use export::export_search;
pub use jobs::{cancel_job, create_job, get_job_status, get_results};
pub use types::{CreateJobOptions, ExportOptions, OutputMode, ParseOutputModeError};
