//! Configuration loader for the credentials file, environment variables and overrides.
//!
//! Responsibilities:
//! - Load connection settings from `.splunkrc`, `.env`, environment variables and builder calls.
//! - Provide a builder-pattern `ConfigLoader` for hierarchical configuration merging.
//! - Assemble the search query from an inline string or a search file.
//!
//! Does NOT handle:
//! - Command-line parsing (see the CLI crate).
//! - Authentication against Splunk (see the client crate).
//!
//! Invariants / Assumptions:
//! - Precedence, lowest to highest: defaults, `.splunkrc`, environment, builder overrides.
//! - `load_dotenv()` must be called explicitly to enable `.env` file loading.
//! - The `DOTENV_DISABLED` variable is checked before `dotenvy::dotenv()` is called.

mod builder;
mod env;
mod error;
mod search_file;
mod splunkrc;

pub use builder::ConfigLoader;
pub use env::env_var_or_none;
pub use error::ConfigError;
pub use search_file::{read_search_file, resolve_query};

#[cfg(test)]
mod tests;
