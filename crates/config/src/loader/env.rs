//! Environment variable parsing for configuration.
//!
//! Responsibilities:
//! - Read and parse environment variables for Splunk configuration.
//! - Apply environment variable values to a ConfigLoader instance.
//!
//! Invariants:
//! - Empty or whitespace-only environment variables are treated as unset.
//! - Returned values are trimmed.
//! - Invalid numeric values return ConfigError::InvalidValue.

use secrecy::SecretString;
use std::str::FromStr;
use std::time::Duration;

use super::builder::ConfigLoader;
use super::error::ConfigError;

/// Read an environment variable, returning None if unset, empty, or whitespace-only.
/// Returns the trimmed value if present.
pub fn env_var_or_none(key: &str) -> Option<String> {
    std::env::var(key).ok().and_then(|s| {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            None
        } else if trimmed.len() == s.len() {
            Some(s)
        } else {
            Some(trimmed.to_string())
        }
    })
}

fn parse_env<T: FromStr>(var: &str, expected: &str) -> Result<Option<T>, ConfigError> {
    env_var_or_none(var)
        .map(|raw| {
            raw.parse::<T>().map_err(|_| ConfigError::InvalidValue {
                var: var.to_string(),
                message: expected.to_string(),
            })
        })
        .transpose()
}

/// Apply environment variable configuration to the loader.
///
/// Only variables that are set overwrite values already on the loader.
pub fn apply_env(loader: &mut ConfigLoader) -> Result<(), ConfigError> {
    if let Some(url) = env_var_or_none("SPLUNK_BASE_URL") {
        loader.set_base_url(Some(url));
    }
    if let Some(scheme) = env_var_or_none("SPLUNK_SCHEME") {
        loader.set_scheme(Some(scheme));
    }
    if let Some(host) = env_var_or_none("SPLUNK_HOST") {
        loader.set_host(Some(host));
    }
    if let Some(port) = parse_env::<u16>("SPLUNK_PORT", "must be a port number")? {
        loader.set_port(Some(port));
    }
    if let Some(username) = env_var_or_none("SPLUNK_USERNAME") {
        loader.set_username(Some(username));
    }
    if let Some(password) = env_var_or_none("SPLUNK_PASSWORD") {
        loader.set_password(Some(SecretString::new(password.into())));
    }
    if let Some(token) = env_var_or_none("SPLUNK_API_TOKEN") {
        loader.set_api_token(Some(SecretString::new(token.into())));
    }
    if let Some(app) = env_var_or_none("SPLUNK_APP") {
        loader.set_app(Some(app));
    }
    if let Some(skip) = parse_env::<bool>("SPLUNK_SKIP_VERIFY", "must be true or false")? {
        loader.set_skip_verify(Some(skip));
    }
    if let Some(secs) = parse_env::<u64>("SPLUNK_TIMEOUT", "must be a number")? {
        loader.set_timeout(Some(Duration::from_secs(secs)));
    }
    if let Some(retries) =
        parse_env::<usize>("SPLUNK_MAX_RETRIES", "must be a non-negative integer")?
    {
        loader.set_max_retries(Some(retries));
    }
    if let Some(ttl) = parse_env::<u64>("SPLUNK_SESSION_TTL", "must be a number")? {
        loader.set_session_ttl_seconds(Some(ttl));
    }
    if let Some(buffer) = parse_env::<u64>("SPLUNK_SESSION_EXPIRY_BUFFER", "must be a number")? {
        loader.set_session_expiry_buffer_seconds(Some(buffer));
    }
    Ok(())
}
