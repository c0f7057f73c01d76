//! Common test utilities for client integration tests.
//!
//! # What this does NOT handle
//! - Mock server setup (use wiremock directly in tests)

#[allow(unused_imports)]
pub use reqwest::Client;
#[allow(unused_imports)]
pub use splunk_search_client::endpoints;
#[allow(unused_imports)]
pub use wiremock::{Mock, MockServer, ResponseTemplate};

use secrecy::SecretString;
use splunk_search_client::{AuthStrategy, SplunkClient};

/// Client using API-token auth against the mock server.
#[allow(dead_code)]
pub fn token_client(server: &MockServer) -> SplunkClient {
    SplunkClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        })
        .max_retries(0)
        .build()
        .expect("client should build")
}

/// Client using username/password auth against the mock server.
#[allow(dead_code)]
pub fn session_client(server: &MockServer) -> SplunkClient {
    SplunkClient::builder()
        .base_url(server.uri())
        .auth_strategy(AuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("changeme".to_string().into()),
        })
        .max_retries(0)
        .build()
        .expect("client should build")
}

/// Drain a result stream into one buffer.
#[allow(dead_code)]
pub async fn collect_bytes(
    mut stream: splunk_search_client::ResultStream,
) -> splunk_search_client::Result<Vec<u8>> {
    let mut out = Vec::new();
    while let Some(chunk) = stream.next_chunk().await {
        out.extend_from_slice(&chunk?);
    }
    Ok(out)
}

/// Standard job status envelope.
#[allow(dead_code)]
pub fn job_status_body(sid: &str, is_done: bool, progress: f64) -> serde_json::Value {
    serde_json::json!({
        "entry": [{
            "name": sid,
            "content": {
                "sid": sid,
                "dispatchState": if is_done { "DONE" } else { "RUNNING" },
                "isDone": is_done,
                "isFailed": false,
                "doneProgress": progress,
                "scanCount": 100,
                "eventCount": 10,
                "resultCount": 2,
                "runDuration": 0.5
            }
        }]
    })
}
