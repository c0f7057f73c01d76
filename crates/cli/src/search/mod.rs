//! Search execution strategies.
//!
//! Responsibilities:
//! - Define [`SearchExecutor`], the one capability both strategies provide.
//! - Select a strategy ([`Executor`]) from the command line.
//!
//! Does NOT handle:
//! - Building the client or opening the output file (see `commands::search`).
//!
//! Invariants:
//! - A run is single-threaded: one request in flight at a time, one writer per sink.
//! - Every wait observes the cancellation token.

mod export;
mod job;
mod stats;
mod writer;

#[cfg(test)]
pub(crate) mod fake;

use std::io::Write;

use splunk_search_client::{SearchRequest, SearchService};

use crate::args::{Cli, Strategy};
use crate::cancellation::CancellationToken;
use crate::error::SearchError;

pub use export::ExportStreamer;
pub use job::JobPoller;
pub use stats::RunStatistics;
pub use writer::{OutputSink, OutputWriter};

/// Runs one search and writes every result chunk through an [`OutputWriter`].
#[allow(async_fn_in_trait)]
pub trait SearchExecutor {
    /// Execute `request` against `service`.
    ///
    /// The writer is flushed before this returns, on success and on error.
    async fn run<S, W>(
        &self,
        service: &mut S,
        request: &SearchRequest,
        writer: &mut OutputWriter<W>,
        cancel: &CancellationToken,
    ) -> Result<RunStatistics, SearchError>
    where
        S: SearchService,
        W: Write;
}

/// The strategy chosen for this run.
#[derive(Debug, Clone)]
pub enum Executor {
    Job(JobPoller),
    Export(ExportStreamer),
}

impl Executor {
    pub fn from_cli(cli: &Cli) -> Self {
        match cli.strategy {
            Strategy::Job => Executor::Job(JobPoller::new(cli.poll_interval(), !cli.quiet)),
            Strategy::Export => Executor::Export(ExportStreamer::new(
                cli.export_backoff(),
                cli.export_timeout_secs,
                cli.dequote,
                !cli.quiet,
            )),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Executor::Job(_) => "job",
            Executor::Export(_) => "export",
        }
    }
}

impl SearchExecutor for Executor {
    async fn run<S, W>(
        &self,
        service: &mut S,
        request: &SearchRequest,
        writer: &mut OutputWriter<W>,
        cancel: &CancellationToken,
    ) -> Result<RunStatistics, SearchError>
    where
        S: SearchService,
        W: Write,
    {
        match self {
            Executor::Job(poller) => poller.run(service, request, writer, cancel).await,
            Executor::Export(streamer) => streamer.run(service, request, writer, cancel).await,
        }
    }
}
