//! Error types for the Splunk client.

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur during Splunk client operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// Authentication failed.
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// HTTP transport error (connection refused, TLS, timeout, broken body).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// API error response from Splunk.
    #[error("API error ({status}) at {url}: {message}{}", .request_id.as_ref().map(|id| format!(" [Request ID: {id}]")).unwrap_or_default())]
    ApiError {
        status: u16,
        url: String,
        message: String,
        request_id: Option<String>,
    },

    /// Session expired and could not be renewed.
    #[error("Session expired for user '{username}', please re-authenticate")]
    SessionExpired { username: String },

    /// Invalid response format from Splunk.
    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    /// Maximum retries exceeded.
    #[error("Maximum retries exceeded ({0} attempts)")]
    MaxRetriesExceeded(usize),

    /// Invalid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// The search query is empty or otherwise unusable.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl ClientError {
    /// Check if an HTTP status code is retryable at the transport layer.
    ///
    /// Retryable status codes:
    /// - 429: Too Many Requests (rate limiting)
    /// - 502: Bad Gateway (transient server error)
    /// - 503: Service Unavailable (transient server error)
    /// - 504: Gateway Timeout (transient server error)
    ///
    /// Everything else fails immediately, including 500 which typically
    /// indicates a bad request rather than a transient fault.
    pub fn is_retryable_status(status: u16) -> bool {
        matches!(status, 429 | 502 | 503 | 504)
    }

    /// Check if this error indicates authentication failure.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Self::AuthFailed(_) | Self::SessionExpired { .. } => true,
            Self::ApiError { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ApiError { status, .. } => Some(*status),
            Self::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
