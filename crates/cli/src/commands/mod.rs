//! CLI command implementations.

pub mod search;

use splunk_search_client::{ClientError, SplunkClient};
use splunk_search_config::Config;

/// Build a client from the merged configuration.
pub fn build_client_from_config(config: &Config) -> Result<SplunkClient, ClientError> {
    SplunkClient::builder().from_config(config).build()
}
