//! Retry helper for HTTP requests with exponential backoff.
//!
//! Transient statuses (429, 502, 503, 504) are retried with 1s, 2s, 4s, ...
//! delays. Any other non-success status becomes [`ClientError::ApiError`],
//! with Splunk's `messages` payload flattened into the error message.

use reqwest::{RequestBuilder, Response};
use tracing::debug;

use crate::error::{ClientError, Result};
use crate::models::SplunkMessages;

/// Sends an HTTP request, retrying transient failure statuses.
///
/// `max_retries` is the number of retries after the first attempt, so `0`
/// means a single attempt.
///
/// # Errors
///
/// Returns `ClientError::MaxRetriesExceeded` when a transient status persists
/// through every attempt, `ClientError::ApiError` for other non-success
/// statuses, and `ClientError::HttpError` for transport faults (never retried).
pub async fn send_request_with_retry(
    builder: RequestBuilder,
    max_retries: usize,
) -> Result<Response> {
    for attempt in 0..=max_retries {
        let attempt_builder = match builder.try_clone() {
            Some(cloned) => cloned,
            None if attempt == 0 => {
                debug!("Request builder cannot be cloned, single attempt only");
                let response = builder.send().await?;
                return check_status(response).await;
            }
            None => {
                debug!("Cannot clone request builder for retry");
                return Err(ClientError::MaxRetriesExceeded(attempt));
            }
        };

        let response = attempt_builder.send().await?;
        let status = response.status().as_u16();

        if ClientError::is_retryable_status(status) {
            if attempt < max_retries {
                let backoff_secs = 2u64.pow(attempt as u32);
                debug!(
                    attempt = attempt + 1,
                    max_attempts = max_retries + 1,
                    status,
                    backoff_secs,
                    "Transient status, retrying with exponential backoff"
                );
                tokio::time::sleep(tokio::time::Duration::from_secs(backoff_secs)).await;
                continue;
            }
            debug!(attempts = attempt + 1, status, "Max retries exhausted");
            return Err(ClientError::MaxRetriesExceeded(max_retries + 1));
        }

        if attempt > 0 && response.status().is_success() {
            debug!(attempt = attempt + 1, "Request succeeded after retry");
        }
        return check_status(response).await;
    }

    Err(ClientError::MaxRetriesExceeded(max_retries + 1))
}

/// Pass successful responses through; turn everything else into `ApiError`.
async fn check_status(response: Response) -> Result<Response> {
    if response.status().is_success() {
        return Ok(response);
    }

    let status = response.status().as_u16();
    let url = response.url().to_string();
    let request_id = response
        .headers()
        .get("X-Splunk-Request-Id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Could not read error response body".to_string());

    let message = match serde_json::from_str::<SplunkMessages>(&body) {
        Ok(m) => m.summary(),
        Err(_) => body,
    };

    Err(ClientError::ApiError {
        status,
        url,
        message,
        request_id,
    })
}
