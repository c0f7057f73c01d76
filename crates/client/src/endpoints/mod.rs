//! REST API endpoint implementations.
//!
//! Endpoint functions are free functions over a `reqwest::Client` so they can
//! be tested against a mock server without a full [`crate::SplunkClient`].
//! `services_url` arguments are already scoped to the app context (see
//! [`services_url`]).

mod auth;
mod request;
pub mod search;
pub mod url_encoding;

pub use auth::login;
pub use request::send_request_with_retry;
pub use search::{
    CreateJobOptions, ExportOptions, OutputMode, cancel_job, create_job, export_search,
    get_job_status, get_results,
};
pub use url_encoding::encode_path_segment;

/// Root of the REST namespace for an optional app context.
///
/// - no app: `{base_url}/services`
/// - app `search`: `{base_url}/servicesNS/-/search`
pub fn services_url(base_url: &str, app: Option<&str>) -> String {
    match app {
        Some(app) => format!("{}/servicesNS/-/{}", base_url, encode_path_segment(app)),
        None => format!("{}/services", base_url),
    }
}

/// Extract `entry[0].content` from a Splunk JSON envelope.
pub(crate) fn extract_entry_content(
    resp: &serde_json::Value,
) -> crate::error::Result<&serde_json::Value> {
    resp.get("entry")
        .and_then(|e| e.get(0))
        .and_then(|e| e.get("content"))
        .ok_or_else(|| {
            crate::error::ClientError::InvalidResponse(
                "Missing entry[0].content in response".to_string(),
            )
        })
}
