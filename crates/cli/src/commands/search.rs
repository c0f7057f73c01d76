//! The search run: resolve the query, open the output, execute, summarize.
//!
//! Responsibilities:
//! - Validate the query before anything else happens.
//! - Merge configuration (credentials file, environment, flags).
//! - Open the output file before the first remote call.
//! - Hand the request to the selected strategy and log the run summary.
//!
//! Does NOT handle:
//! - Exit code mapping or printing errors (see main.rs and error.rs).
//!
//! Invariants:
//! - Query and output file errors are reported before any request is sent.
//! - The output file is flushed on every exit path.

use anyhow::Result;
use splunk_search_client::{OutputMode, SearchRequest, redact_query};
use splunk_search_config::{Config, ConfigLoader, resolve_query};
use tracing::{debug, info};

use crate::args::Cli;
use crate::cancellation::CancellationToken;
use crate::commands::build_client_from_config;
use crate::error::SearchError;
use crate::search::{Executor, OutputSink, OutputWriter, SearchExecutor};

/// Build the search request from `--search` / `--search-file` and the time window.
pub fn build_request(cli: &Cli) -> Result<SearchRequest, SearchError> {
    let raw = resolve_query(cli.search.as_deref(), cli.search_file.as_deref())?;
    SearchRequest::new(
        &raw,
        cli.keep_metadata,
        cli.earliest.clone(),
        cli.latest.clone(),
        cli.output_mode,
    )
    .map_err(|e| SearchError::InvalidQuery(e.to_string()))
}

/// Merge defaults, the credentials file, the environment and flags.
pub fn load_config(cli: &Cli) -> Result<Config, SearchError> {
    let mut loader = ConfigLoader::new();
    if let Some(ref path) = cli.rc_file {
        loader = loader.with_rc_path(path.clone());
    }
    let loader = loader.from_splunkrc()?.from_env()?;
    Ok(cli.apply_overrides(loader).build()?)
}

pub async fn run(cli: &Cli, cancel: &CancellationToken) -> Result<()> {
    let request = build_request(cli)?;
    debug!("search={}", redact_query(&request.query));
    debug!(
        earliest_time = %request.earliest_time,
        latest_time = %request.latest_time,
        output_mode = %request.output_mode,
        "search parameters"
    );

    let config = load_config(cli)?;
    let mut sink = OutputSink::create(&cli.outfile)?;

    let mut client = build_client_from_config(&config).map_err(SearchError::from)?;
    info!("Connecting to splunk server: {} ...", client.base_url());
    if let Some(app) = client.app() {
        debug!("setting app context to {}", app);
    }

    let executor = Executor::from_cli(cli);
    debug!("running {} strategy", executor.name());

    let mut writer = OutputWriter::new(
        &mut sink,
        &cli.outfile,
        cli.output_mode,
        cli.json_linebreaks,
    );
    let outcome = executor
        .run(&mut client, &request, &mut writer, cancel)
        .await;
    let json_calls = writer.json_calls();
    debug!("{} chunks written", writer.chunks_written());
    drop(writer);

    let stats = outcome?;
    sink.finish()?;

    info!("{}", stats.summary_line(&cli.outfile.display().to_string()));
    info!("{}", stats.timing_line());
    debug!(
        "{} chunks received, {} export retries",
        stats.chunk_count, stats.export_retries
    );
    if cli.output_mode == OutputMode::Json {
        debug!("{} json calls", json_calls);
    }
    info!("Splunk search complete");
    Ok(())
}
