//! Centralized constants for the Splunk search workspace.
//!
//! This module contains default values used across crates to avoid
//! magic number duplication and improve maintainability.

// =============================================================================
// Connection & Timeout Defaults
// =============================================================================

/// Default connect/read timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default session time-to-live in seconds (1 hour).
pub const DEFAULT_SESSION_TTL_SECS: u64 = 3600;

/// Default buffer time before session expiry to proactively refresh tokens.
pub const DEFAULT_EXPIRY_BUFFER_SECS: u64 = 60;

/// Maximum allowed connection timeout in seconds (1 hour).
pub const MAX_TIMEOUT_SECS: u64 = 3600;

/// Maximum allowed value for the transport retry count.
pub const MAX_MAX_RETRIES: usize = 10;

/// Default Splunk management host.
pub const DEFAULT_SPLUNK_HOST: &str = "localhost";

/// Default Splunk management port.
pub const DEFAULT_SPLUNK_PORT: u16 = 8089;

/// Default access scheme for the management port.
pub const DEFAULT_SPLUNK_SCHEME: &str = "https";

/// Default maximum number of HTTP redirects to follow.
pub const DEFAULT_MAX_REDIRECTS: usize = 5;

/// Default maximum number of transport retries for 429/502/503/504 responses.
pub const DEFAULT_MAX_RETRIES: usize = 3;

/// File name of the credentials file looked up in the home directory.
pub const SPLUNKRC_FILE_NAME: &str = ".splunkrc";

// =============================================================================
// Search Defaults
// =============================================================================

/// Default earliest time bound for searches.
pub const DEFAULT_EARLIEST_TIME: &str = "-24h";

/// Default latest time bound for searches.
pub const DEFAULT_LATEST_TIME: &str = "now";

/// Default output file path.
pub const DEFAULT_OUTFILE: &str = "./output.dat";

/// Interval between job readiness checks in milliseconds.
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 1000;

/// Delay before re-issuing an export request that returned a non-success status.
pub const DEFAULT_EXPORT_BACKOFF_SECS: u64 = 60;

/// Server-side timeout parameter sent with export requests, in seconds.
pub const DEFAULT_EXPORT_TIMEOUT_SECS: u64 = 120;

/// Keyword every submitted query must start with.
pub const SEARCH_KEYWORD: &str = "search";

/// Macro appended to queries to strip internal metadata fields.
pub const STRIP_METADATA_MACRO: &str = "`strip_metadata`";
