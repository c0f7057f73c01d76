//! Search job operations.
//!
//! # What this module handles:
//! - Creating search jobs
//! - Getting job status
//! - Opening the results stream of a finished job
//! - Cancelling a job
//!
//! # What this module does NOT handle:
//! - Waiting for completion (the caller polls [`get_job_status`])
//! - Session renewal (see `retry_call!`)

use reqwest::{Client, Response};
use tracing::debug;

use crate::endpoints::{encode_path_segment, extract_entry_content, send_request_with_retry};
use crate::error::{ClientError, Result};
use crate::models::SearchJobStatus;
use crate::query::redact_query;

use super::types::{CreateJobOptions, OutputMode};

/// Create a new search job and return its SID.
pub async fn create_job(
    client: &Client,
    services_url: &str,
    auth_header: &str,
    query: &str,
    options: &CreateJobOptions,
    max_retries: usize,
) -> Result<String> {
    debug!("Creating search job: {}", redact_query(query));

    let url = format!("{}/search/jobs", services_url);

    let mut form_data: Vec<(&str, String)> = vec![
        ("search", query.to_string()),
        ("output_mode", "json".to_string()),
    ];

    // Empty time bounds cause 400s from Splunk
    if let Some(earliest) = options.earliest_time.as_ref().filter(|t| !t.trim().is_empty()) {
        form_data.push(("earliest_time", earliest.clone()));
    }
    if let Some(latest) = options.latest_time.as_ref().filter(|t| !t.trim().is_empty()) {
        form_data.push(("latest_time", latest.clone()));
    }
    if let Some(count) = options.count {
        form_data.push(("count", count.to_string()));
    }

    for (key, value) in form_data.iter().filter(|(k, _)| *k != "search") {
        debug!("  {}: {}", key, value);
    }

    let builder = client
        .post(&url)
        .header("Authorization", auth_header)
        .form(&form_data);
    let response = send_request_with_retry(builder, max_retries).await?;

    let resp: serde_json::Value = response.json().await?;

    // Splunk can return either:
    // - `{ "sid": "<sid>" }`
    // - `{ "entry": [ { "content": { "sid": "<sid>" } } ] }`
    let sid = resp
        .get("sid")
        .and_then(|v| v.as_str())
        .or_else(|| {
            resp.get("entry")?
                .get(0)?
                .get("content")?
                .get("sid")?
                .as_str()
        })
        .ok_or_else(|| ClientError::InvalidResponse("Missing sid in response".to_string()))?;

    Ok(sid.to_string())
}

/// Get the status of a search job.
pub async fn get_job_status(
    client: &Client,
    services_url: &str,
    auth_header: &str,
    sid: &str,
    max_retries: usize,
) -> Result<SearchJobStatus> {
    debug!("Getting status for job: {}", sid);

    let url = format!("{}/search/jobs/{}", services_url, encode_path_segment(sid));

    let builder = client
        .get(&url)
        .header("Authorization", auth_header)
        .query(&[("output_mode", "json")]);
    let response = send_request_with_retry(builder, max_retries).await?;

    let resp: serde_json::Value = response.json().await?;

    let content = extract_entry_content(&resp)?;
    let mut status: SearchJobStatus = serde_json::from_value(content.clone())
        .map_err(|e| ClientError::InvalidResponse(format!("Failed to parse job status: {}", e)))?;
    if status.sid.is_empty() {
        status.sid = sid.to_string();
    }
    Ok(status)
}

/// Open the results of a finished job in `output_mode`.
///
/// All fields (`f=*`) and all rows (`count=0`) are requested. The returned
/// response body has not been read yet; callers consume it chunk by chunk.
pub async fn get_results(
    client: &Client,
    services_url: &str,
    auth_header: &str,
    sid: &str,
    output_mode: OutputMode,
    max_retries: usize,
) -> Result<Response> {
    debug!("Fetching {} results for job: {}", output_mode, sid);

    let url = format!(
        "{}/search/jobs/{}/results",
        services_url,
        encode_path_segment(sid)
    );

    let builder = client
        .get(&url)
        .header("Authorization", auth_header)
        .query(&[
            ("output_mode", output_mode.as_str()),
            ("f", "*"),
            ("count", "0"),
        ]);
    send_request_with_retry(builder, max_retries).await
}

/// Cancel a search job, releasing its server-side resources.
pub async fn cancel_job(
    client: &Client,
    services_url: &str,
    auth_header: &str,
    sid: &str,
    max_retries: usize,
) -> Result<()> {
    debug!("Cancelling job: {}", sid);

    let url = format!(
        "{}/search/jobs/{}/control",
        services_url,
        encode_path_segment(sid)
    );

    let builder = client
        .post(&url)
        .header("Authorization", auth_header)
        .form(&[("action", "cancel"), ("output_mode", "json")]);
    send_request_with_retry(builder, max_retries).await?;
    Ok(())
}
