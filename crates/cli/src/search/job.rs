//! Job strategy: submit, poll until done, drain results, cancel.
//!
//! Responsibilities:
//! - Submit the search as an asynchronous job with `count=0`.
//! - Check job status once per poll interval until `isDone`.
//! - Stream the finished job's results through the output writer.
//! - Flush the writer and cancel the server job on every exit path.
//!
//! Does NOT handle:
//! - Retrying failed requests; transport faults abort the run.
//!   (Transient 429/5xx retries live in the client's request layer.)
//!
//! Invariants:
//! - At most one status request per poll interval.
//! - The job is cancelled once a SID exists, whether or not draining succeeded.
//! - Reported line count is newlines received plus one.

use std::fmt;
use std::io::Write;
use std::time::Duration;

use splunk_search_client::{SearchRequest, SearchService};
use tracing::{debug, info, warn};

use super::stats::RunStatistics;
use super::writer::OutputWriter;
use super::SearchExecutor;
use crate::cancellation::CancellationToken;
use crate::error::SearchError;
use crate::progress::{SearchProgress, Spinner};

/// Where a job run currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Submitted,
    Polling,
    Ready,
    Draining,
    Cancelled,
    Failed,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Submitted => "submitted",
            JobState::Polling => "polling",
            JobState::Ready => "ready",
            JobState::Draining => "draining",
            JobState::Cancelled => "cancelled",
            JobState::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// Buffered job execution.
#[derive(Debug, Clone)]
pub struct JobPoller {
    poll_interval: Duration,
    show_progress: bool,
}

/// Mutable state threaded through one job run.
struct JobRun<'a, W: Write> {
    sid: String,
    state: JobState,
    writer: &'a mut OutputWriter<W>,
    stats: RunStatistics,
}

impl<W: Write> JobRun<'_, W> {
    fn enter(&mut self, next: JobState) {
        if self.state != next {
            debug!(sid = %self.sid, "job {} -> {}", self.state, next);
            self.state = next;
        }
    }
}

impl JobPoller {
    pub fn new(poll_interval: Duration, show_progress: bool) -> Self {
        Self {
            poll_interval,
            show_progress,
        }
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    /// Poll until the job reports `isDone`.
    async fn wait_until_done<S: SearchService, W: Write>(
        &self,
        service: &mut S,
        run: &mut JobRun<'_, W>,
        cancel: &CancellationToken,
    ) -> Result<(), SearchError> {
        let progress = SearchProgress::new(self.show_progress);
        run.enter(JobState::Polling);

        loop {
            let status = tokio::select! {
                res = service.job_status(&run.sid) => res?,
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            };

            if status.is_ready() {
                run.enter(JobState::Ready);
                debug!("{}", status.progress_line());
                progress.update(&status);

                if status.is_done {
                    if status.is_failed {
                        warn!(sid = %run.sid, "Search job reported failure; draining whatever results it has");
                    }
                    debug!("Fetched all results");
                    progress.finish();
                    return Ok(());
                }
            } else {
                debug!(
                    "Job {} not ready yet ({})",
                    run.sid,
                    status.dispatch_state.as_deref().unwrap_or("unknown")
                );
            }

            tokio::select! {
                _ = tokio::time::sleep(self.poll_interval) => {}
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            }
        }
    }

    /// Stream the job's results into the writer.
    async fn drain<S: SearchService, W: Write>(
        &self,
        service: &mut S,
        request: &SearchRequest,
        run: &mut JobRun<'_, W>,
        cancel: &CancellationToken,
    ) -> Result<(), SearchError> {
        run.enter(JobState::Draining);
        let spinner = Spinner::new(self.show_progress, "fetching results");

        let mut results = tokio::select! {
            res = service.results(&run.sid, request.output_mode) => res?,
            _ = cancel.cancelled() => return Err(SearchError::Cancelled),
        };

        loop {
            let next = tokio::select! {
                next = results.next_chunk() => next,
                _ = cancel.cancelled() => return Err(SearchError::Cancelled),
            };
            let Some(chunk) = next else {
                break;
            };
            let chunk = chunk?;
            debug!("Got chunk - {} bytes", chunk.len());
            run.stats.record_chunk(&chunk);
            run.writer.write_chunk(&chunk)?;
            spinner.set_bytes(run.stats.byte_count);
        }

        spinner.finish();
        Ok(())
    }
}

impl SearchExecutor for JobPoller {
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
        let stats = RunStatistics::start();
        debug!(
            earliest_time = %request.earliest_time,
            latest_time = %request.latest_time,
            count = 0,
            "job parameters"
        );
        info!("calling Splunk API...");

        let created = tokio::select! {
            res = service.create_job(request) => res,
            _ = cancel.cancelled() => {
                flush_after_failure(writer);
                return Err(SearchError::Cancelled);
            }
        };
        let sid = match created {
            Ok(sid) => sid,
            Err(e) => {
                flush_after_failure(writer);
                return Err(e.into());
            }
        };
        info!(sid = %sid, "Search job submitted");

        let mut run = JobRun {
            sid,
            state: JobState::Submitted,
            writer,
            stats,
        };

        let outcome = match self.wait_until_done(service, &mut run, cancel).await {
            Ok(()) => self.drain(service, request, &mut run, cancel).await,
            Err(e) => Err(e),
        };

        let flushed = if outcome.is_ok() {
            run.writer.flush()
        } else {
            flush_after_failure(&mut *run.writer);
            Ok(())
        };

        match service.cancel_job(&run.sid).await {
            Ok(()) => {
                if outcome.is_ok() {
                    run.enter(JobState::Cancelled);
                }
                debug!(sid = %run.sid, "Search job cancelled");
            }
            Err(e) => warn!(sid = %run.sid, "Failed to cancel search job: {}", e),
        }

        if let Err(e) = outcome {
            run.enter(JobState::Failed);
            return Err(e);
        }
        flushed?;

        let mut stats = run.stats;
        // Job mode counts newlines plus one.
        stats.line_count += 1;
        stats.finish();
        Ok(stats)
    }
}

/// Flush on an abort path. The abort reason is what the run reports, so a
/// flush failure here is only logged.
fn flush_after_failure<W: Write>(writer: &mut OutputWriter<W>) {
    if let Err(e) = writer.flush() {
        warn!("{}", e);
    }
}
