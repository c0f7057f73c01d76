//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse command-line arguments and environment-variable fallbacks.
//! - Turn connection flags into `ConfigLoader` overrides.
//!
//! Non-responsibilities:
//! - Does not run the search (see `commands::search`).
//! - Does not read the credentials file (see `splunk_search_config`).

use clap::{Parser, ValueEnum};
use splunk_search_client::OutputMode;
use splunk_search_config::ConfigLoader;
use splunk_search_config::constants::{
    DEFAULT_EARLIEST_TIME, DEFAULT_EXPORT_BACKOFF_SECS, DEFAULT_EXPORT_TIMEOUT_SECS,
    DEFAULT_LATEST_TIME, DEFAULT_OUTFILE, DEFAULT_POLL_INTERVAL_MS,
};
use std::path::PathBuf;
use std::time::Duration;

/// How results are retrieved from the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Strategy {
    /// Submit a job, poll until done, then drain its results.
    #[default]
    Job,
    /// Stream results from the export endpoint as they are produced.
    Export,
}

/// Log verbosity used when `RUST_LOG` is not set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// Directive understood by `EnvFilter`.
    pub fn as_filter(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "splunk-search")]
#[command(
    about = "Run a Splunk search and write the results to a file",
    long_about = None
)]
#[command(version)]
#[command(
    after_help = "Examples:\n  splunk-search --search 'index=main error' --earliest -1h\n  splunk-search --search-file query.spl --output-mode json --json-linebreaks\n  splunk-search --search 'index=web' --strategy export --dequote --outfile web.csv\n"
)]
pub struct Cli {
    /// Search query (the leading `search` keyword is optional)
    #[arg(short, long, value_name = "QUERY")]
    pub search: Option<String>,

    /// Read the query from a file; `#` lines are comments, other lines are concatenated
    #[arg(long, value_name = "FILE")]
    pub search_file: Option<PathBuf>,

    /// Earliest time bound (e.g., '-24h', '2024-01-01T00:00:00')
    #[arg(short, long, allow_hyphen_values = true, default_value = DEFAULT_EARLIEST_TIME)]
    pub earliest: String,

    /// Latest time bound (e.g., 'now')
    #[arg(short, long, allow_hyphen_values = true, default_value = DEFAULT_LATEST_TIME)]
    pub latest: String,

    /// Output format (csv, xml, json)
    #[arg(short = 'm', long, default_value = "csv", value_name = "MODE")]
    pub output_mode: OutputMode,

    /// File the results are written to (truncated first)
    #[arg(short, long, default_value = DEFAULT_OUTFILE, value_name = "FILE")]
    pub outfile: PathBuf,

    /// Keep Splunk's internal fields instead of appending `strip_metadata`
    #[arg(long)]
    pub keep_metadata: bool,

    /// Remove every double-quote character from export output
    #[arg(long)]
    pub dequote: bool,

    /// Put each JSON object on its own line (json output mode)
    #[arg(long)]
    pub json_linebreaks: bool,

    /// Result retrieval strategy
    #[arg(long, value_enum, default_value_t = Strategy::Job)]
    pub strategy: Strategy,

    /// Delay between job status checks, in milliseconds (at least 1)
    #[arg(
        long,
        default_value_t = DEFAULT_POLL_INTERVAL_MS,
        value_name = "MS",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub poll_interval_ms: u64,

    /// Delay before re-issuing a failed export request, in seconds
    #[arg(long, default_value_t = DEFAULT_EXPORT_BACKOFF_SECS, value_name = "SECS")]
    pub export_backoff_secs: u64,

    /// Server-side timeout sent with export requests, in seconds
    #[arg(long, default_value_t = DEFAULT_EXPORT_TIMEOUT_SECS, value_name = "SECS")]
    pub export_timeout_secs: u64,

    /// Base URL of the Splunk server (e.g., https://localhost:8089)
    #[arg(short, long, env = "SPLUNK_BASE_URL")]
    pub base_url: Option<String>,

    /// Management host (used when no base URL is given)
    #[arg(long, env = "SPLUNK_HOST")]
    pub host: Option<String>,

    /// Management port (used when no base URL is given)
    #[arg(long, env = "SPLUNK_PORT")]
    pub port: Option<u16>,

    /// Username for session token authentication
    #[arg(short, long, env = "SPLUNK_USERNAME")]
    pub username: Option<String>,

    /// Password for session token authentication
    #[arg(short, long, env = "SPLUNK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// API token for authentication (preferred over username/password)
    #[arg(short, long, env = "SPLUNK_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// App context; search endpoints become /servicesNS/-/<app>/...
    #[arg(long, env = "SPLUNK_APP")]
    pub app: Option<String>,

    /// Connect and read timeout in seconds
    #[arg(long, env = "SPLUNK_TIMEOUT")]
    pub timeout: Option<u64>,

    /// Maximum number of retries for 429/502/503/504 on job requests
    #[arg(long, env = "SPLUNK_MAX_RETRIES")]
    pub max_retries: Option<usize>,

    /// Skip TLS certificate verification (for self-signed certificates)
    #[arg(long, env = "SPLUNK_SKIP_VERIFY")]
    pub skip_verify: bool,

    /// Credentials file to read instead of ~/.splunkrc
    #[arg(long, value_name = "FILE")]
    pub rc_file: Option<PathBuf>,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Also append log output to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Suppress progress output (progress bar / spinner).
    ///
    /// Note: progress indicators always write to STDERR; this flag disables them entirely.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Delay between job status checks.
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Delay between export attempts.
    pub fn export_backoff(&self) -> Duration {
        Duration::from_secs(self.export_backoff_secs)
    }

    /// Apply connection flags on top of a loader that already read the
    /// credentials file and environment. Flags win.
    pub fn apply_overrides(&self, mut loader: ConfigLoader) -> ConfigLoader {
        if let Some(ref url) = self.base_url {
            loader = loader.with_base_url(url.clone());
        }
        if let Some(ref host) = self.host {
            loader = loader.with_host(host.clone());
        }
        if let Some(port) = self.port {
            loader = loader.with_port(port);
        }
        if let Some(ref username) = self.username {
            loader = loader.with_username(username.clone());
        }
        if let Some(ref password) = self.password {
            loader = loader.with_password(password.clone());
        }
        if let Some(ref token) = self.api_token {
            loader = loader.with_api_token(token.clone());
        }
        if let Some(ref app) = self.app {
            loader = loader.with_app(app.clone());
        }
        if let Some(timeout_secs) = self.timeout {
            loader = loader.with_timeout(Duration::from_secs(timeout_secs));
        }
        if let Some(retries) = self.max_retries {
            loader = loader.with_max_retries(retries);
        }
        if self.skip_verify {
            loader = loader.with_skip_verify(true);
        }
        loader
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["splunk-search", "--search", "index=main"]).unwrap();
        assert_eq!(cli.search.as_deref(), Some("index=main"));
        assert_eq!(cli.earliest, "-24h");
        assert_eq!(cli.latest, "now");
        assert_eq!(cli.output_mode, OutputMode::Csv);
        assert_eq!(cli.outfile, PathBuf::from("./output.dat"));
        assert_eq!(cli.strategy, Strategy::Job);
        assert_eq!(cli.poll_interval(), Duration::from_secs(1));
        assert_eq!(cli.export_backoff(), Duration::from_secs(60));
        assert_eq!(cli.export_timeout_secs, 120);
        assert_eq!(cli.log_level, LogLevel::Info);
        assert!(!cli.keep_metadata && !cli.dequote && !cli.json_linebreaks && !cli.quiet);
    }

    #[test]
    fn test_hyphenated_time_and_modes() {
        let cli = Cli::try_parse_from([
            "splunk-search",
            "--earliest",
            "-7d@d",
            "--output-mode",
            "json",
            "--strategy",
            "export",
            "--log-level",
            "debug",
        ])
        .unwrap();
        assert_eq!(cli.earliest, "-7d@d");
        assert_eq!(cli.output_mode, OutputMode::Json);
        assert_eq!(cli.strategy, Strategy::Export);
        assert_eq!(cli.log_level.as_filter(), "debug");
    }

    #[test]
    fn test_rejects_zero_poll_interval() {
        let result = Cli::try_parse_from(["splunk-search", "--poll-interval-ms", "0"]);
        assert!(result.is_err());

        let cli = Cli::try_parse_from(["splunk-search", "--poll-interval-ms", "1"]).unwrap();
        assert_eq!(cli.poll_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_rejects_unknown_output_mode() {
        let result = Cli::try_parse_from(["splunk-search", "--output-mode", "yaml"]);
        assert!(result.is_err());
    }
}
