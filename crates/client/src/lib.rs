//! Splunk REST API client for running searches.
//!
//! This crate provides the transport half of the search runner: session and
//! API-token authentication, the search-job endpoints (create, status,
//! results, cancel), the streaming export endpoint, and query normalization.
//! The [`SearchService`] trait is the boundary the execution strategies in the
//! CLI depend on; [`SplunkClient`] is its production implementation.

mod auth;
pub mod client;
pub mod endpoints;
pub mod error;
pub mod models;
mod query;
mod serde_helpers;
mod service;

pub use auth::{AuthStrategy, SessionManager};
pub use client::SplunkClient;
pub use client::builder::SplunkClientBuilder;
pub use endpoints::search::{CreateJobOptions, ExportOptions, OutputMode, ParseOutputModeError};
pub use error::{ClientError, Result};
pub use models::{SearchJobStatus, SearchRequest, SplunkMessages};
pub use query::{normalize_query, redact_query};
pub use service::{ExportResponse, ResultStream, SearchService};
