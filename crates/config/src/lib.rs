//! Configuration management for the Splunk search runner.
//!
//! This crate provides types and loaders for resolving Splunk connection
//! settings from a `.splunkrc` credentials file, environment variables and
//! explicit overrides, plus the search-file reader used for multi-line queries.

pub mod constants;
mod loader;
pub mod types;

pub use loader::{ConfigError, ConfigLoader, env_var_or_none, read_search_file, resolve_query};
pub use types::{AuthConfig, AuthStrategy, Config, ConnectionConfig};
