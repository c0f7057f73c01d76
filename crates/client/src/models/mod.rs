//! Data models for Splunk API responses and search requests.
//!
//! - `common`: shared error-message payloads
//! - `jobs`: search job status
//! - `request`: the normalized search request submitted by a run

mod common;
mod jobs;
mod request;

pub use common::{MessageType, SplunkMessage, SplunkMessages};
pub use jobs::SearchJobStatus;
pub use request::SearchRequest;
