//! Client-level session management helpers.
//!
//! # What this module does NOT handle:
//! - Low-level session token storage and expiry tracking (handled by [`SessionManager`] in `auth.rs`)
//! - Direct HTTP authentication calls (handled by endpoint functions in `endpoints/`)
//!
//! # Invariants
//! - [`SplunkClient::get_auth_header()`] requires `&mut self` because it may trigger a login call
//! - API token authentication never triggers login
//! - Session authentication proactively refreshes tokens before they expire
//!
//! [`SessionManager`]: crate::auth::SessionManager

use crate::auth::AuthStrategy;
use crate::client::SplunkClient;
use crate::endpoints;
use crate::error::{ClientError, Result};
use secrecy::ExposeSecret;

impl SplunkClient {
    /// Get the `Authorization` header value, logging in if necessary.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if login fails.
    /// Returns [`ClientError::SessionExpired`] if no valid token is available.
    pub(crate) async fn get_auth_header(&mut self) -> Result<String> {
        if !self.session_manager.is_api_token()
            && (self.session_manager.is_session_expired()
                || self.session_manager.session_expires_soon())
        {
            self.login().await?;
        }

        self.session_manager.authorization_header().ok_or_else(|| {
            let username = match self.session_manager.strategy() {
                AuthStrategy::SessionToken { username, .. } => username.clone(),
                AuthStrategy::ApiToken { .. } => "api-token".to_string(),
            };
            ClientError::SessionExpired { username }
        })
    }

    /// Check if the client is using API token authentication.
    pub fn is_api_token_auth(&self) -> bool {
        self.session_manager.is_api_token()
    }

    /// Login with username/password to get a session key.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::AuthFailed`] if the auth strategy is not
    /// session-based or the credentials are rejected.
    pub async fn login(&mut self) -> Result<String> {
        let AuthStrategy::SessionToken { username, password } = self.session_manager.strategy()
        else {
            return Err(ClientError::AuthFailed(
                "Cannot login with API token auth strategy".to_string(),
            ));
        };

        let token = endpoints::login(
            &self.http,
            &self.base_url,
            username,
            password.expose_secret(),
            self.max_retries,
        )
        .await?;

        self.session_manager.set_session_token(
            token.clone(),
            Some(self.session_ttl_seconds),
            Some(self.session_expiry_buffer_seconds),
        );

        Ok(token)
    }
}
