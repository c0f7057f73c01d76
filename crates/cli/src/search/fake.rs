//! Scripted [`SearchService`] for executor tests.

use std::collections::VecDeque;

use splunk_search_client::{
    ClientError, ExportResponse, OutputMode, Result, ResultStream, SearchJobStatus,
    SearchRequest, SearchService,
};

/// Replays queued responses and records every call made against it.
#[derive(Default)]
pub(crate) struct FakeService {
    pub create: VecDeque<Result<String>>,
    pub statuses: VecDeque<Result<SearchJobStatus>>,
    pub results: Option<Result<ResultStream>>,
    pub exports: VecDeque<Result<ExportResponse>>,
    pub cancel_error: Option<ClientError>,
    pub calls: Vec<&'static str>,
    pub result_modes: Vec<OutputMode>,
    pub export_timeouts: Vec<u64>,
}

impl FakeService {
    pub fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| **c == call).count()
    }
}

/// A status that is past parsing, with the given completion.
pub(crate) fn status(done: bool, done_progress: f64) -> SearchJobStatus {
    SearchJobStatus {
        sid: "fake-sid".to_string(),
        dispatch_state: Some(if done { "DONE" } else { "RUNNING" }.to_string()),
        is_done: done,
        done_progress,
        ..Default::default()
    }
}

/// A status still waiting in the dispatch queue.
pub(crate) fn queued() -> SearchJobStatus {
    SearchJobStatus {
        sid: "fake-sid".to_string(),
        dispatch_state: Some("QUEUED".to_string()),
        ..Default::default()
    }
}

pub(crate) fn export_response(status: u16, chunks: &[&[u8]]) -> ExportResponse {
    ExportResponse {
        status,
        body: ResultStream::from_chunks(chunks.iter().map(|c| c.to_vec()).collect::<Vec<_>>()),
    }
}

pub(crate) fn request(mode: OutputMode) -> SearchRequest {
    SearchRequest::new("index=main", true, "-1h", "now", mode).unwrap()
}

impl SearchService for FakeService {
    async fn create_job(&mut self, _request: &SearchRequest) -> Result<String> {
        self.calls.push("create");
        self.create
            .pop_front()
            .unwrap_or_else(|| Ok("fake-sid".to_string()))
    }

    async fn job_status(&mut self, _sid: &str) -> Result<SearchJobStatus> {
        self.calls.push("status");
        self.statuses
            .pop_front()
            .unwrap_or_else(|| Ok(status(true, 1.0)))
    }

    async fn results(&mut self, _sid: &str, mode: OutputMode) -> Result<ResultStream> {
        self.calls.push("results");
        self.result_modes.push(mode);
        self.results.take().unwrap_or_else(|| Ok(ResultStream::empty()))
    }

    async fn cancel_job(&mut self, _sid: &str) -> Result<()> {
        self.calls.push("cancel");
        match self.cancel_error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn export(&mut self, _request: &SearchRequest, timeout_secs: u64) -> Result<ExportResponse> {
        self.calls.push("export");
        self.export_timeouts.push(timeout_secs);
        self.exports.pop_front().unwrap_or_else(|| {
            Err(ClientError::InvalidResponse(
                "no scripted export response left".to_string(),
            ))
        })
    }
}
