//! Authentication strategies and session management.
//!
//! Invariants:
//! - API tokens are sent as `Authorization: Bearer <token>`.
//! - Session keys from `/services/auth/login` are sent as `Authorization: Splunk <key>`.
//! - Secrets are held in `SecretString` and never appear in `Debug` output.

use secrecy::{ExposeSecret, SecretString};
use splunk_search_config::constants::DEFAULT_EXPIRY_BUFFER_SECS;
use std::time::{Duration, Instant};

/// Strategy for authenticating with Splunk.
#[derive(Debug, Clone)]
pub enum AuthStrategy {
    /// Username and password authentication.
    /// The client will automatically manage session tokens.
    SessionToken {
        username: String,
        password: SecretString,
    },
    /// API token (bearer token authentication).
    ApiToken { token: SecretString },
}

/// Manages Splunk session tokens with automatic renewal.
#[derive(Debug)]
pub struct SessionManager {
    auth_strategy: AuthStrategy,
    session_token: Option<SessionToken>,
}

/// Session token with expiry information.
#[derive(Debug, Clone)]
struct SessionToken {
    value: SecretString,
    expires_at: Option<Instant>,
    expiry_buffer_seconds: u64,
}

impl SessionToken {
    fn new(
        value: SecretString,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) -> Self {
        let expires_at = ttl_seconds.map(|ttl| Instant::now() + Duration::from_secs(ttl));
        Self {
            value,
            expires_at,
            expiry_buffer_seconds: expiry_buffer_seconds.unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
        }
    }

    fn is_expired(&self) -> bool {
        self.expires_at
            .map(|exp| exp.saturating_duration_since(Instant::now()).is_zero())
            .unwrap_or(false)
    }

    /// True when the remaining lifetime is inside the buffer window.
    fn will_expire_soon(&self) -> bool {
        self.expires_at
            .map(|exp| {
                let buffer = Duration::from_secs(self.expiry_buffer_seconds);
                exp.saturating_duration_since(Instant::now()) < buffer
            })
            .unwrap_or(false)
    }
}

impl SessionManager {
    /// Create a new session manager with the given auth strategy.
    pub fn new(strategy: AuthStrategy) -> Self {
        Self {
            auth_strategy: strategy,
            session_token: None,
        }
    }

    /// Get the current auth strategy.
    pub fn strategy(&self) -> &AuthStrategy {
        &self.auth_strategy
    }

    /// Check if we're using API token auth (no session management needed).
    pub fn is_api_token(&self) -> bool {
        matches!(self.auth_strategy, AuthStrategy::ApiToken { .. })
    }

    /// Get the raw token for API requests.
    /// For API token auth, returns the token directly.
    /// For session auth, returns the session key if one has been obtained.
    pub fn get_bearer_token(&self) -> Option<&str> {
        match &self.auth_strategy {
            AuthStrategy::ApiToken { token } => Some(token.expose_secret()),
            AuthStrategy::SessionToken { .. } => {
                self.session_token.as_ref().map(|t| t.value.expose_secret())
            }
        }
    }

    /// Build the `Authorization` header value for the current credentials.
    pub fn authorization_header(&self) -> Option<String> {
        let token = self.get_bearer_token()?;
        Some(match self.auth_strategy {
            AuthStrategy::ApiToken { .. } => format!("Bearer {}", token),
            AuthStrategy::SessionToken { .. } => format!("Splunk {}", token),
        })
    }

    /// Set the session token received from a login response.
    ///
    /// `ttl_seconds` of `None` means the token never expires locally;
    /// `expiry_buffer_seconds` of `None` uses the default buffer.
    pub fn set_session_token(
        &mut self,
        token: String,
        ttl_seconds: Option<u64>,
        expiry_buffer_seconds: Option<u64>,
    ) {
        self.session_token = Some(SessionToken::new(
            SecretString::new(token.into()),
            ttl_seconds,
            expiry_buffer_seconds,
        ));
    }

    /// Returns false for API token auth, true if no session token exists.
    fn check_session<F>(&self, check: F) -> bool
    where
        F: FnOnce(&SessionToken) -> bool,
    {
        if self.is_api_token() {
            return false;
        }
        self.session_token.as_ref().map(check).unwrap_or(true)
    }

    /// Check if the current session token is expired.
    pub fn is_session_expired(&self) -> bool {
        self.check_session(|t| t.is_expired())
    }

    /// Check if the current session token will expire soon (within buffer).
    pub fn session_expires_soon(&self) -> bool {
        self.check_session(|t| t.will_expire_soon())
    }

    /// Clear the current session token (force re-authentication).
    pub fn clear_session(&mut self) {
        self.session_token = None;
    }
}
