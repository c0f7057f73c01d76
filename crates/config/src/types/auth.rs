//! Authentication types for Splunk configuration.
//!
//! Responsibilities:
//! - Define authentication strategies (session login, API token).
//!
//! Does NOT handle:
//! - Actual authentication flow or token exchange (see client crate).
//!
//! Invariants:
//! - All secret values use `secrecy::SecretString` to prevent accidental logging.

use secrecy::SecretString;

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password authentication (creates session token)
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// API token (bearer token authentication)
    ApiToken { token: SecretString },
}

/// Authentication configuration.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// The authentication strategy to use.
    pub strategy: AuthStrategy,
}

impl AuthConfig {
    /// Username for log lines, or `token` for API token auth.
    pub fn principal(&self) -> &str {
        match &self.strategy {
            AuthStrategy::SessionToken { username, .. } => username,
            AuthStrategy::ApiToken { .. } => "token",
        }
    }
}
