//! Connection configuration types for Splunk.
//!
//! Responsibilities:
//! - Define connection settings (URL, app context, TLS verification, timeouts, retries).
//! - Define the main `Config` structure combining connection and auth.
//!
//! Does NOT handle:
//! - Configuration loading from files/env (see `loader` module).
//! - Actual network connections (see client crate).
//!
//! Invariants:
//! - `base_url` never ends with a slash.
//! - `app` is `None` when no app context applies; it is never an empty string.

use crate::types::auth::AuthConfig;
use std::time::Duration;

/// Connection configuration for the Splunk management port.
#[derive(Debug, Clone)]
pub struct ConnectionConfig {
    /// Base URL of the Splunk server (e.g., https://localhost:8089)
    pub base_url: String,
    /// App context used to namespace search endpoints
    pub app: Option<String>,
    /// Whether to skip TLS verification (for self-signed certificates)
    pub skip_verify: bool,
    /// Connect and per-read timeout
    pub timeout: Duration,
    /// Maximum number of transport retries for failed requests
    pub max_retries: usize,
    /// Buffer time before session expiry to proactively refresh tokens (in seconds)
    pub session_expiry_buffer_seconds: u64,
    /// Session time-to-live in seconds
    pub session_ttl_seconds: u64,
}

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Connection settings
    pub connection: ConnectionConfig,
    /// Authentication settings
    pub auth: AuthConfig,
}
