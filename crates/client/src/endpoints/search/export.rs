//! Streaming export endpoint.
//!
//! Unlike the job endpoints, export does not go through
//! `send_request_with_retry`: the caller needs to see every status code
//! because its own retry policy is driven by them.

use reqwest::{Client, Response};
use tracing::debug;

use crate::error::Result;
use crate::query::redact_query;

use super::types::ExportOptions;

/// Issue `GET {services_url}/search/jobs/export` and return the raw response.
///
/// # Errors
///
/// Only transport faults are errors here; a non-success status is returned
/// as a normal response.
pub async fn export_search(
    client: &Client,
    services_url: &str,
    auth_header: &str,
    query: &str,
    options: &ExportOptions,
) -> Result<Response> {
    debug!("Starting export: {}", redact_query(query));

    let url = format!("{}/search/jobs/export", services_url);
    let timeout = options.timeout_secs.to_string();

    let response = client
        .get(&url)
        .header("Authorization", auth_header)
        .query(&[
            ("search", query),
            ("sort_dir", "desc"),
            ("output_mode", options.output_mode.as_str()),
            ("timeout", timeout.as_str()),
            ("earliest_time", options.earliest_time.as_str()),
            ("latest_time", options.latest_time.as_str()),
            ("f", "*"),
            ("count", "0"),
        ])
        .send()
        .await?;

    debug!(status = response.status().as_u16(), "Export responded");
    Ok(response)
}
