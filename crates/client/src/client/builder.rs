//! Client builder for constructing [`SplunkClient`] instances.
//!
//! This module is responsible for:
//! - Providing a fluent builder API for client configuration
//! - Validating required configuration (base_url, auth_strategy)
//! - Normalizing the base URL (removing trailing slashes)
//! - Configuring the underlying HTTP client (timeouts, TLS verification)
//!
//! # Invariants
//! - `base_url` and `auth_strategy` must be provided before calling `build()`
//! - The configured timeout bounds connecting and each body read on job
//!   requests, never the whole request
//! - Export requests only carry the connect timeout: a transforming search
//!   sends nothing until it finishes, so export reads wait indefinitely
//! - `skip_verify` only affects HTTPS connections; HTTP connections log a warning

use std::time::Duration;

use crate::auth::{AuthStrategy, SessionManager};
use crate::client::SplunkClient;
use crate::error::{ClientError, Result};
use splunk_search_config::{
    AuthStrategy as ConfigAuthStrategy, Config,
    constants::{
        DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_REDIRECTS, DEFAULT_MAX_RETRIES,
        DEFAULT_SESSION_TTL_SECS, DEFAULT_TIMEOUT_SECS,
    },
};

/// Builder for creating a new [`SplunkClient`].
pub struct SplunkClientBuilder {
    base_url: Option<String>,
    auth_strategy: Option<AuthStrategy>,
    app: Option<String>,
    skip_verify: bool,
    timeout: Duration,
    max_retries: usize,
    session_ttl_seconds: u64,
    session_expiry_buffer_seconds: u64,
}

impl Default for SplunkClientBuilder {
    fn default() -> Self {
        Self {
            base_url: None,
            auth_strategy: None,
            app: None,
            skip_verify: false,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            max_retries: DEFAULT_MAX_RETRIES,
            session_ttl_seconds: DEFAULT_SESSION_TTL_SECS,
            session_expiry_buffer_seconds: DEFAULT_EXPIRY_BUFFER_SECS,
        }
    }
}

impl SplunkClientBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL of the Splunk server, e.g. `https://localhost:8089`.
    pub fn base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the authentication strategy.
    pub fn auth_strategy(mut self, strategy: AuthStrategy) -> Self {
        self.auth_strategy = Some(strategy);
        self
    }

    /// Scope search endpoints to an app (`/servicesNS/-/<app>`).
    pub fn app(mut self, app: Option<String>) -> Self {
        self.app = app;
        self
    }

    /// Set whether to skip TLS certificate verification.
    ///
    /// # Security Warning
    /// Only use this in development or testing environments.
    pub fn skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = skip;
        self
    }

    /// Set the connect timeout, and the read timeout for job requests.
    /// Default is 30 seconds.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the maximum number of retries for transient failure statuses.
    pub fn max_retries(mut self, retries: usize) -> Self {
        self.max_retries = retries;
        self
    }

    /// Set the session TTL in seconds.
    pub fn session_ttl_seconds(mut self, ttl: u64) -> Self {
        self.session_ttl_seconds = ttl;
        self
    }

    /// Set the session expiry buffer in seconds.
    pub fn session_expiry_buffer_seconds(mut self, buffer: u64) -> Self {
        self.session_expiry_buffer_seconds = buffer;
        self
    }

    /// Create a client builder from loaded configuration.
    pub fn from_config(mut self, config: &Config) -> Self {
        let auth_strategy = match &config.auth.strategy {
            ConfigAuthStrategy::SessionToken { username, password } => AuthStrategy::SessionToken {
                username: username.clone(),
                password: password.clone(),
            },
            ConfigAuthStrategy::ApiToken { token } => AuthStrategy::ApiToken {
                token: token.clone(),
            },
        };

        self.base_url = Some(config.connection.base_url.clone());
        self.auth_strategy = Some(auth_strategy);
        self.app = config.connection.app.clone();
        self.skip_verify = config.connection.skip_verify;
        self.timeout = config.connection.timeout;
        self.max_retries = config.connection.max_retries;
        self.session_ttl_seconds = config.connection.session_ttl_seconds;
        self.session_expiry_buffer_seconds = config.connection.session_expiry_buffer_seconds;
        self
    }

    fn http_builder(
        connect_timeout: Duration,
        accept_invalid_certs: bool,
    ) -> reqwest::ClientBuilder {
        reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .redirect(reqwest::redirect::Policy::limited(DEFAULT_MAX_REDIRECTS))
            .danger_accept_invalid_certs(accept_invalid_certs)
    }

    fn normalize_base_url(url: String) -> String {
        url.trim_end_matches('/').to_string()
    }

    /// Build the [`SplunkClient`] with the configured options.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidUrl`] if `base_url` was not provided.
    /// Returns [`ClientError::AuthFailed`] if `auth_strategy` was not provided.
    /// Returns `ClientError::HttpError` if the HTTP client fails to build.
    pub fn build(self) -> Result<SplunkClient> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::InvalidUrl("base_url is required".to_string()))?;
        let base_url = Self::normalize_base_url(base_url);

        let auth_strategy = self
            .auth_strategy
            .ok_or_else(|| ClientError::AuthFailed("auth_strategy is required".to_string()))?;

        let accept_invalid_certs = if self.skip_verify && !base_url.starts_with("https://") {
            tracing::warn!(
                "skip_verify=true has no effect on HTTP URLs. TLS verification only applies to HTTPS connections."
            );
            false
        } else {
            self.skip_verify
        };

        let http = Self::http_builder(self.timeout, accept_invalid_certs)
            .read_timeout(self.timeout)
            .build()?;
        let export_http = Self::http_builder(self.timeout, accept_invalid_certs).build()?;

        Ok(SplunkClient {
            http,
            export_http,
            base_url,
            app: self.app,
            session_manager: SessionManager::new(auth_strategy),
            max_retries: self.max_retries,
            session_ttl_seconds: self.session_ttl_seconds,
            session_expiry_buffer_seconds: self.session_expiry_buffer_seconds,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;
    use splunk_search_config::{AuthConfig, ConnectionConfig};

    fn config(strategy: ConfigAuthStrategy) -> Config {
        Config {
            connection: ConnectionConfig {
                base_url: "https://splunk.example.com:8089".to_string(),
                app: Some("search".to_string()),
                skip_verify: true,
                timeout: Duration::from_secs(120),
                max_retries: 1,
                session_ttl_seconds: 7200,
                session_expiry_buffer_seconds: 120,
            },
            auth: AuthConfig { strategy },
        }
    }

    #[test]
    fn test_from_config_preserves_settings() {
        let config = config(ConfigAuthStrategy::ApiToken {
            token: SecretString::new("test-token".to_string().into()),
        });

        let builder = SplunkClient::builder().from_config(&config);

        assert_eq!(
            builder.base_url,
            Some("https://splunk.example.com:8089".to_string())
        );
        assert_eq!(builder.app.as_deref(), Some("search"));
        assert!(builder.skip_verify);
        assert_eq!(builder.timeout, Duration::from_secs(120));
        assert_eq!(builder.max_retries, 1);
        assert_eq!(builder.session_ttl_seconds, 7200);
        assert_eq!(builder.session_expiry_buffer_seconds, 120);
    }

    #[test]
    fn test_from_config_with_session_token() {
        let config = config(ConfigAuthStrategy::SessionToken {
            username: "admin".to_string(),
            password: SecretString::new("test-password".to_string().into()),
        });

        let client = SplunkClient::builder().from_config(&config).build().unwrap();
        assert!(!client.is_api_token_auth());
        assert_eq!(client.base_url(), "https://splunk.example.com:8089");
    }

    #[test]
    fn test_normalize_base_url_multiple_trailing_slashes() {
        let input = "https://example.com:8089//".to_string();
        assert_eq!(
            SplunkClientBuilder::normalize_base_url(input),
            "https://example.com:8089"
        );
    }
}
