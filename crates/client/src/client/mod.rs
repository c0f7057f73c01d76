//! Main Splunk REST API client.
//!
//! This module provides the primary [`SplunkClient`] for running searches
//! against the Splunk REST API. It handles authentication, session renewal
//! and app-scoped endpoint paths.
//!
//! # Submodules
//! - [`builder`]: Client construction and configuration
//! - `session`: Session token management helpers (private module)
//! - `search`: Search job and export methods
//!
//! # What this module does NOT handle:
//! - Direct HTTP request implementation (delegated to [`crate::endpoints`])
//! - Low-level session token storage (delegated to [`crate::auth::SessionManager`])
//! - Poll cadence and export retry policy (owned by the caller)
//!
//! # Invariants
//! - Job API methods handle 401/403 by refreshing the session and retrying once
//!   (session auth only; API tokens do not trigger retries)
//! - The `retry_call!` macro centralizes this retry pattern

pub mod builder;
mod search;
mod session;

use crate::auth::SessionManager;
use crate::endpoints::services_url;

/// Wrap an async API call with automatic session retry on 401/403 errors.
///
/// When a 401 or 403 error is received and the client is using session-based
/// auth, the session is cleared, the client logs in again, and the call is
/// retried once.
///
/// ```ignore
/// retry_call!(self, __auth, endpoints::get_job_status(&self.http, &url, &__auth, sid, n).await)
/// ```
///
/// The placeholder identifier is bound to the `Authorization` header value.
macro_rules! retry_call {
    ($self:expr, $auth:ident, $call:expr) => {{
        let $auth = $self.get_auth_header().await?;
        let result = $call;

        match result {
            Ok(data) => Ok(data),
            Err($crate::error::ClientError::ApiError { status, .. })
                if (status == 401 || status == 403) && !$self.is_api_token_auth() =>
            {
                ::tracing::debug!(
                    "Session expired (status {}), clearing and re-authenticating...",
                    status
                );
                $self.session_manager.clear_session();
                let $auth = $self.get_auth_header().await?;
                $call
            }
            Err(e) => Err(e),
        }
    }};
}

pub(crate) use retry_call;

/// Splunk REST API client.
///
/// ```rust,ignore
/// use splunk_search_client::{SplunkClient, AuthStrategy};
/// use secrecy::SecretString;
///
/// let client = SplunkClient::builder()
///     .base_url("https://localhost:8089".to_string())
///     .auth_strategy(AuthStrategy::ApiToken {
///         token: SecretString::new("my-token".to_string().into()),
///     })
///     .app(Some("search".to_string()))
///     .build()?;
/// ```
#[derive(Debug)]
pub struct SplunkClient {
    pub(crate) http: reqwest::Client,
    /// Same TLS and connect settings as `http`, with no read timeout.
    pub(crate) export_http: reqwest::Client,
    pub(crate) base_url: String,
    pub(crate) app: Option<String>,
    pub(crate) session_manager: SessionManager,
    pub(crate) max_retries: usize,
    pub(crate) session_ttl_seconds: u64,
    pub(crate) session_expiry_buffer_seconds: u64,
}

impl SplunkClient {
    /// Create a new client builder.
    pub fn builder() -> builder::SplunkClientBuilder {
        builder::SplunkClientBuilder::new()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the app context, if any.
    pub fn app(&self) -> Option<&str> {
        self.app.as_deref()
    }

    /// REST namespace root for this client's app context.
    pub(crate) fn services_url(&self) -> String {
        services_url(&self.base_url, self.app.as_deref())
    }
}
