//! Configuration loader builder implementation.
//!
//! Responsibilities:
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Support loading from the credentials file, environment variables, and direct builder methods.
//! - Build the final `Config` from loaded values.
//!
//! Does NOT handle:
//! - Direct environment variable parsing logic (delegated to env.rs).
//! - Credentials file parsing (delegated to splunkrc.rs).
//!
//! Invariants / Assumptions:
//! - Environment variables take precedence over credentials file values.
//! - Builder methods take precedence over environment variables.
//! - An explicit `base_url` wins over `scheme`/`host`/`port`.

use secrecy::SecretString;
use std::path::PathBuf;
use std::time::Duration;

use super::env::apply_env;
use super::error::ConfigError;
use super::splunkrc::apply_splunkrc;
use crate::constants::{
    DEFAULT_EXPIRY_BUFFER_SECS, DEFAULT_MAX_RETRIES, DEFAULT_SESSION_TTL_SECS,
    DEFAULT_SPLUNK_HOST, DEFAULT_SPLUNK_PORT, DEFAULT_SPLUNK_SCHEME, DEFAULT_TIMEOUT_SECS,
    MAX_MAX_RETRIES, MAX_TIMEOUT_SECS,
};
use crate::types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};

/// Configuration loader that builds config from the credentials file, env vars and overrides.
#[derive(Default)]
pub struct ConfigLoader {
    base_url: Option<String>,
    scheme: Option<String>,
    host: Option<String>,
    port: Option<u16>,
    username: Option<String>,
    password: Option<SecretString>,
    api_token: Option<SecretString>,
    app: Option<String>,
    skip_verify: Option<bool>,
    timeout: Option<Duration>,
    max_retries: Option<usize>,
    session_ttl_seconds: Option<u64>,
    session_expiry_buffer_seconds: Option<u64>,
    rc_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Create a new configuration loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if dotenv loading is disabled via environment variable.
    fn dotenv_disabled() -> bool {
        matches!(
            std::env::var("DOTENV_DISABLED").ok().as_deref(),
            Some("true") | Some("1")
        )
    }

    /// Load environment variables from .env file if present.
    ///
    /// If `DOTENV_DISABLED` is set to "true" or "1", the .env file is not loaded.
    /// Missing `.env` files are silently ignored.
    pub fn load_dotenv(self) -> Result<Self, ConfigError> {
        if Self::dotenv_disabled() {
            return Ok(self);
        }

        match dotenvy::dotenv() {
            Ok(_) => Ok(self),
            Err(e) if Self::is_not_found(&e) => Ok(self),
            Err(dotenvy::Error::LineParse(_, idx)) => {
                Err(ConfigError::DotenvParse { error_index: idx })
            }
            Err(dotenvy::Error::Io(io_err)) => Err(ConfigError::DotenvIo {
                kind: io_err.kind(),
            }),
            Err(_) => Err(ConfigError::DotenvUnknown),
        }
    }

    fn is_not_found(err: &dotenvy::Error) -> bool {
        matches!(
            err,
            dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
        )
    }

    /// Use an explicit credentials file instead of `$HOME/.splunkrc`.
    ///
    /// An explicit file must exist; the default one is optional.
    pub fn with_rc_path(mut self, path: PathBuf) -> Self {
        self.rc_path = Some(path);
        self
    }

    pub(crate) fn rc_path(&self) -> Option<&PathBuf> {
        self.rc_path.as_ref()
    }

    /// Read connection settings from the credentials file.
    pub fn from_splunkrc(mut self) -> Result<Self, ConfigError> {
        apply_splunkrc(&mut self)?;
        Ok(self)
    }

    /// Read configuration from environment variables.
    pub fn from_env(mut self) -> Result<Self, ConfigError> {
        apply_env(&mut self)?;
        Ok(self)
    }

    /// Set the base URL, bypassing scheme/host/port assembly.
    pub fn with_base_url(mut self, url: String) -> Self {
        self.base_url = Some(url);
        self
    }

    /// Set the management host.
    pub fn with_host(mut self, host: String) -> Self {
        self.host = Some(host);
        self
    }

    /// Set the management port.
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    /// Set the username.
    pub fn with_username(mut self, username: String) -> Self {
        self.username = Some(username);
        self
    }

    /// Set the password.
    pub fn with_password(mut self, password: String) -> Self {
        self.password = Some(SecretString::new(password.into()));
        self
    }

    /// Set the API token.
    pub fn with_api_token(mut self, token: String) -> Self {
        self.api_token = Some(SecretString::new(token.into()));
        self
    }

    /// Set the app context. `""` and `"None"` clear it.
    pub fn with_app(mut self, app: String) -> Self {
        self.set_app(Some(app));
        self
    }

    /// Set whether to skip TLS verification.
    pub fn with_skip_verify(mut self, skip: bool) -> Self {
        self.skip_verify = Some(skip);
        self
    }

    /// Set the connect/read timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the maximum number of transport retries.
    pub fn with_max_retries(mut self, retries: usize) -> Self {
        self.max_retries = Some(retries);
        self
    }

    pub(crate) fn set_base_url(&mut self, url: Option<String>) {
        self.base_url = url;
    }

    pub(crate) fn set_scheme(&mut self, scheme: Option<String>) {
        self.scheme = scheme;
    }

    pub(crate) fn set_host(&mut self, host: Option<String>) {
        self.host = host;
    }

    pub(crate) fn set_port(&mut self, port: Option<u16>) {
        self.port = port;
    }

    pub(crate) fn set_username(&mut self, username: Option<String>) {
        self.username = username;
    }

    pub(crate) fn set_password(&mut self, password: Option<SecretString>) {
        self.password = password;
    }

    pub(crate) fn set_api_token(&mut self, token: Option<SecretString>) {
        self.api_token = token;
    }

    pub(crate) fn set_app(&mut self, app: Option<String>) {
        self.app = app
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty() && a != "None");
    }

    pub(crate) fn set_skip_verify(&mut self, skip: Option<bool>) {
        self.skip_verify = skip;
    }

    pub(crate) fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub(crate) fn set_max_retries(&mut self, retries: Option<usize>) {
        self.max_retries = retries;
    }

    pub(crate) fn set_session_ttl_seconds(&mut self, ttl: Option<u64>) {
        self.session_ttl_seconds = ttl;
    }

    pub(crate) fn set_session_expiry_buffer_seconds(&mut self, buffer: Option<u64>) {
        self.session_expiry_buffer_seconds = buffer;
    }

    /// Resolve the base URL from the explicit value or scheme/host/port.
    fn resolve_base_url(&self) -> Result<String, ConfigError> {
        let raw = match &self.base_url {
            Some(url) => url.clone(),
            None => format!(
                "{}://{}:{}",
                self.scheme.as_deref().unwrap_or(DEFAULT_SPLUNK_SCHEME),
                self.host.as_deref().unwrap_or(DEFAULT_SPLUNK_HOST),
                self.port.unwrap_or(DEFAULT_SPLUNK_PORT)
            ),
        };
        validate_and_normalize_base_url(&raw)
    }

    /// Build the final configuration.
    pub fn build(self) -> Result<Config, ConfigError> {
        let base_url = self.resolve_base_url()?;

        // API token takes precedence over username/password
        let strategy = if let Some(token) = self.api_token {
            AuthStrategy::ApiToken { token }
        } else if let (Some(username), Some(password)) = (self.username, self.password) {
            AuthStrategy::SessionToken { username, password }
        } else {
            return Err(ConfigError::MissingAuth);
        };

        let connection = ConnectionConfig {
            base_url,
            app: self.app,
            skip_verify: self.skip_verify.unwrap_or(false),
            timeout: self
                .timeout
                .unwrap_or(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
            max_retries: self.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
            session_ttl_seconds: self.session_ttl_seconds.unwrap_or(DEFAULT_SESSION_TTL_SECS),
            session_expiry_buffer_seconds: self
                .session_expiry_buffer_seconds
                .unwrap_or(DEFAULT_EXPIRY_BUFFER_SECS),
        };

        Self::validate_connection(&connection)?;

        Ok(Config {
            connection,
            auth: AuthConfig { strategy },
        })
    }

    fn validate_connection(connection: &ConnectionConfig) -> Result<(), ConfigError> {
        let timeout_secs = connection.timeout.as_secs();
        if timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout {
                message: "timeout must be greater than 0 seconds".to_string(),
            });
        }
        if timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ConfigError::InvalidTimeout {
                message: format!(
                    "timeout exceeds maximum allowed value of {} seconds",
                    MAX_TIMEOUT_SECS
                ),
            });
        }
        if connection.max_retries > MAX_MAX_RETRIES {
            return Err(ConfigError::InvalidMaxRetries {
                message: format!(
                    "must be between 0 and {} (got {})",
                    MAX_MAX_RETRIES, connection.max_retries
                ),
            });
        }
        Ok(())
    }
}

/// Validate a base URL and strip trailing slashes.
fn validate_and_normalize_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim();
    let parsed = url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: trimmed.to_string(),
        message: e.to_string(),
    })?;

    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            message: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ConfigError::InvalidBaseUrl {
            url: trimmed.to_string(),
            message: "missing host".to_string(),
        });
    }

    Ok(trimmed.trim_end_matches('/').to_string())
}
