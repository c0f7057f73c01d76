//! The search service boundary used by the execution strategies.
//!
//! Responsibilities:
//! - Define [`SearchService`], the job and export request surfaces a run needs.
//! - Define [`ResultStream`], the chunk stream shared by job results and export bodies.
//! - Implement [`SearchService`] for [`SplunkClient`].
//!
//! Does NOT handle:
//! - Authentication or retry policy (the implementation's concern).
//! - Interpreting chunk contents; chunks are opaque bytes.
//!
//! Invariants:
//! - Chunks are yielded in arrival order and never empty.
//! - A transport fault ends the stream after yielding one `Err`.

use futures::StreamExt;
use futures::stream::{self, BoxStream};

use crate::client::SplunkClient;
use crate::endpoints::OutputMode;
use crate::error::{ClientError, Result};
use crate::models::{SearchJobStatus, SearchRequest};

/// A stream of raw result chunks.
pub struct ResultStream {
    inner: BoxStream<'static, Result<Vec<u8>>>,
}

impl ResultStream {
    /// Stream a response body chunk by chunk as it arrives.
    pub fn from_response(response: reqwest::Response) -> Self {
        let chunks = stream::unfold(Some(response), |state| async move {
            let mut response = state?;
            loop {
                match response.chunk().await {
                    Ok(Some(bytes)) if bytes.is_empty() => continue,
                    Ok(Some(bytes)) => return Some((Ok(bytes.to_vec()), Some(response))),
                    Ok(None) => return None,
                    Err(e) => return Some((Err(ClientError::from(e)), None)),
                }
            }
        });
        Self {
            inner: chunks.boxed(),
        }
    }

    /// Stream a fixed sequence of chunks. Empty chunks are skipped.
    pub fn from_chunks<I>(chunks: I) -> Self
    where
        I: IntoIterator<Item = Vec<u8>>,
        I::IntoIter: Send + 'static,
    {
        Self::from_results(chunks.into_iter().map(Ok))
    }

    /// Stream a fixed sequence of chunk results; stops after the first `Err`.
    pub fn from_results<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Result<Vec<u8>>>,
        I::IntoIter: Send + 'static,
    {
        let items = stream::iter(items)
            .filter(|item| futures::future::ready(!matches!(item, Ok(c) if c.is_empty())))
            .scan(false, |failed, item| {
                let out = if *failed {
                    None
                } else {
                    *failed = item.is_err();
                    Some(item)
                };
                futures::future::ready(out)
            });
        Self {
            inner: items.boxed(),
        }
    }

    /// A stream with no chunks.
    pub fn empty() -> Self {
        Self {
            inner: stream::empty().boxed(),
        }
    }

    /// Next chunk, or `None` at end of stream.
    pub async fn next_chunk(&mut self) -> Option<Result<Vec<u8>>> {
        self.inner.next().await
    }
}

impl std::fmt::Debug for ResultStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResultStream").finish_non_exhaustive()
    }
}

/// Status and body of an export request.
#[derive(Debug)]
pub struct ExportResponse {
    pub status: u16,
    pub body: ResultStream,
}

impl ExportResponse {
    /// True for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The request surfaces a search run depends on.
///
/// Implementations own authentication and connection handling. Methods take
/// `&mut self` because session renewal mutates client state.
#[allow(async_fn_in_trait)]
pub trait SearchService {
    /// Submit a job; returns its SID.
    async fn create_job(&mut self, request: &SearchRequest) -> Result<String>;

    /// Re-fetch a job's status from the server.
    async fn job_status(&mut self, sid: &str) -> Result<SearchJobStatus>;

    /// Open a finished job's results in `mode`.
    async fn results(&mut self, sid: &str, mode: OutputMode) -> Result<ResultStream>;

    /// Cancel a job. Safe to call on a finished job.
    async fn cancel_job(&mut self, sid: &str) -> Result<()>;

    /// Issue one export request. `Err` means the request could not be made
    /// at all; a non-success status is reported through [`ExportResponse::status`].
    async fn export(
        &mut self,
        request: &SearchRequest,
        timeout_secs: u64,
    ) -> Result<ExportResponse>;
}

impl SearchService for SplunkClient {
    async fn create_job(&mut self, request: &SearchRequest) -> Result<String> {
        self.create_search_job(request).await
    }

    async fn job_status(&mut self, sid: &str) -> Result<SearchJobStatus> {
        self.get_job_status(sid).await
    }

    async fn results(&mut self, sid: &str, mode: OutputMode) -> Result<ResultStream> {
        self.stream_results(sid, mode).await
    }

    async fn cancel_job(&mut self, sid: &str) -> Result<()> {
        self.cancel_search_job(sid).await
    }

    async fn export(
        &mut self,
        request: &SearchRequest,
        timeout_secs: u64,
    ) -> Result<ExportResponse> {
        self.export_search(request, timeout_secs).await
    }
}
