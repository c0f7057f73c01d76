//! Export strategy: one streaming request, retried until the server accepts it.
//!
//! Responsibilities:
//! - Issue the export request (`sort_dir=desc`, server-side timeout, `count=0`).
//! - Re-issue it after a fixed backoff whenever the status is not 2xx.
//! - Forward body chunks to the output writer as they arrive, optionally dequoted.
//!
//! Does NOT handle:
//! - Session renewal (the client re-authenticates on 401 before the status is seen here).
//!
//! Invariants:
//! - Non-success statuses are retried without limit; only Ctrl+C ends the loop.
//! - A request that cannot be made at all is fatal and never retried.
//! - Nothing from a failed attempt reaches the output.
//! - Reported line count is the number of newlines received.

use std::io::Write;
use std::time::Duration;

use splunk_search_client::{ExportResponse, SearchRequest, SearchService, redact_query};
use tracing::{debug, info, warn};

use super::SearchExecutor;
use super::stats::RunStatistics;
use super::writer::OutputWriter;
use crate::cancellation::CancellationToken;
use crate::error::SearchError;
use crate::progress::Spinner;

/// Streaming export execution.
#[derive(Debug, Clone)]
pub struct ExportStreamer {
    backoff: Duration,
    timeout_secs: u64,
    dequote: bool,
    show_progress: bool,
}

impl ExportStreamer {
    pub fn new(backoff: Duration, timeout_secs: u64, dequote: bool, show_progress: bool) -> Self {
        Self {
            backoff,
            timeout_secs,
            dequote,
            show_progress,
        }
    }

    pub fn backoff(&self) -> Duration {
        self.backoff
    }

    pub fn dequote(&self) -> bool {
        self.dequote
    }

    /// Issue the export request until it comes back 2xx.
    async fn connect<S: SearchService>(
        &self,
        service: &mut S,
        request: &SearchRequest,
        stats: &mut RunStatistics,
        cancel: &CancellationToken,
    ) -> Result<ExportResponse, SearchError> {
        loop {
            info!("Calling Splunk API; search={}", redact_query(&request.query));
            let response = tokio::select! {
                res = service.export(request, self.timeout_secs) => res?,
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            };

            if response.is_success() {
                debug!("export request accepted ({})", response.status);
                return Ok(response);
            }

            stats.export_retries += 1;
            let transient = SearchError::Transient {
                status: response.status,
            };
            warn!(
                "{}; sleeping {}s before retry {}",
                transient,
                self.backoff.as_secs(),
                stats.export_retries
            );
            drop(response);

            tokio::select! {
                _ = tokio::time::sleep(self.backoff) => {}
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            }
        }
    }

    async fn stream<S: SearchService, W: Write>(
        &self,
        service: &mut S,
        request: &SearchRequest,
        writer: &mut OutputWriter<W>,
        stats: &mut RunStatistics,
        cancel: &CancellationToken,
    ) -> Result<(), SearchError> {
        let mut response = self.connect(service, request, stats, cancel).await?;
        let spinner = Spinner::new(self.show_progress, "streaming export");

        loop {
            let next = tokio::select! {
                next = response.body.next_chunk() => next,
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            };
            let Some(chunk) = next else {
                break;
            };
            let mut chunk = chunk?;
            debug!("Got chunk - {} bytes", chunk.len());
            stats.record_chunk(&chunk);
            if self.dequote {
                chunk.retain(|&b| b != b'"');
            }
            writer.write_chunk(&chunk)?;
            spinner.set_bytes(stats.byte_count);
        }

        spinner.finish();
        Ok(())
    }
}

impl SearchExecutor for ExportStreamer {
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
        let mut stats = RunStatistics::start();

        let outcome = self
            .stream(service, request, writer, &mut stats, cancel)
            .await;
        let flushed = writer.flush();
        outcome?;
        flushed?;

        if stats.export_retries > 0 {
            info!(
                "export succeeded after {} failed attempts",
                stats.export_retries
            );
        }
        stats.finish();
        Ok(stats)
    }
}
