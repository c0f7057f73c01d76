//! Tests for the configuration loader.
//!
//! Responsibilities:
//! - Test builder methods and base URL assembly.
//! - Test `.splunkrc` parsing and precedence against environment variables.
//! - Test search file reading and query resolution.
//!
//! Invariants:
//! - Tests use `serial_test` to prevent environment variable pollution.
//! - Tests use `global_test_lock()` for additional synchronization.
//! - Temporary directories are cleaned up automatically via `tempfile`.

use std::sync::Mutex;

pub mod splunkrc_tests;

/// Returns the global test lock for environment variable isolation.
pub fn env_lock() -> &'static Mutex<()> {
    crate::test_util::global_test_lock()
}

/// Environment variables the loader reads, all unset.
pub fn cleared_splunk_env() -> Vec<(&'static str, Option<&'static str>)> {
    [
        "SPLUNK_BASE_URL",
        "SPLUNK_SCHEME",
        "SPLUNK_HOST",
        "SPLUNK_PORT",
        "SPLUNK_USERNAME",
        "SPLUNK_PASSWORD",
        "SPLUNK_API_TOKEN",
        "SPLUNK_APP",
        "SPLUNK_SKIP_VERIFY",
        "SPLUNK_TIMEOUT",
        "SPLUNK_MAX_RETRIES",
        "SPLUNK_SESSION_TTL",
        "SPLUNK_SESSION_EXPIRY_BUFFER",
    ]
    .into_iter()
    .map(|k| (k, None))
    .collect()
}
