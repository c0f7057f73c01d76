//! Configuration types for the Splunk search runner.
//!
//! Responsibilities:
//! - Define authentication strategies and connection settings.
//! - Combine them into the `Config` handed to the client builder.
//!
//! Does NOT handle:
//! - Loading values from files or the environment (see `loader`).

mod auth;
mod connection;

pub use auth::{AuthConfig, AuthStrategy};
pub use connection::{Config, ConnectionConfig};
