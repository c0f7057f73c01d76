//! Search job and export methods for [`SplunkClient`].
//!
//! # What this module handles:
//! - Submitting a [`SearchRequest`] as a job
//! - Fetching job status, opening the results stream, cancelling
//! - Issuing the export request with one re-login on 401
//!
//! # What this module does NOT handle:
//! - Poll cadence, draining or the export retry-with-backoff policy

use tracing::debug;

use crate::client::SplunkClient;
use crate::client::retry_call;
use crate::endpoints::{self, CreateJobOptions, ExportOptions, OutputMode};
use crate::error::Result;
use crate::models::{SearchJobStatus, SearchRequest};
use crate::service::{ExportResponse, ResultStream};

impl SplunkClient {
    /// Submit the request as a search job with no result cap; returns the SID.
    pub async fn create_search_job(&mut self, request: &SearchRequest) -> Result<String> {
        let options = CreateJobOptions {
            earliest_time: Some(request.earliest_time.clone()),
            latest_time: Some(request.latest_time.clone()),
            count: Some(0),
        };
        let services_url = self.services_url();
        retry_call!(
            self,
            __auth,
            endpoints::create_job(
                &self.http,
                &services_url,
                &__auth,
                &request.query,
                &options,
                self.max_retries,
            )
            .await
        )
    }

    /// Fetch the current status of a job.
    pub async fn get_job_status(&mut self, sid: &str) -> Result<SearchJobStatus> {
        let services_url = self.services_url();
        retry_call!(
            self,
            __auth,
            endpoints::get_job_status(&self.http, &services_url, &__auth, sid, self.max_retries)
                .await
        )
    }

    /// Open a job's results as a chunk stream.
    pub async fn stream_results(&mut self, sid: &str, mode: OutputMode) -> Result<ResultStream> {
        let services_url = self.services_url();
        let response = retry_call!(
            self,
            __auth,
            endpoints::get_results(
                &self.http,
                &services_url,
                &__auth,
                sid,
                mode,
                self.max_retries,
            )
            .await
        )?;
        Ok(ResultStream::from_response(response))
    }

    /// Cancel a job.
    pub async fn cancel_search_job(&mut self, sid: &str) -> Result<()> {
        let services_url = self.services_url();
        retry_call!(
            self,
            __auth,
            endpoints::cancel_job(&self.http, &services_url, &__auth, sid, self.max_retries).await
        )
    }

    /// Issue the export request and hand back its status and body.
    ///
    /// A 401 under session auth triggers one re-login and one re-issue before
    /// the status is handed back. Any other status is returned as-is.
    pub async fn export_search(
        &mut self,
        request: &SearchRequest,
        timeout_secs: u64,
    ) -> Result<ExportResponse> {
        let options = ExportOptions {
            earliest_time: request.earliest_time.clone(),
            latest_time: request.latest_time.clone(),
            output_mode: request.output_mode,
            timeout_secs,
        };
        let services_url = self.services_url();

        let auth = self.get_auth_header().await?;
        let mut response = endpoints::export_search(
            &self.export_http,
            &services_url,
            &auth,
            &request.query,
            &options,
        )
        .await?;

        if response.status().as_u16() == 401 && !self.is_api_token_auth() {
            debug!("Export rejected with 401, clearing session and re-authenticating...");
            self.session_manager.clear_session();
            let auth = self.get_auth_header().await?;
            response = endpoints::export_search(
                &self.export_http,
                &services_url,
                &auth,
                &request.query,
                &options,
            )
            .await?;
        }

        Ok(ExportResponse {
            status: response.status().as_u16(),
            body: ResultStream::from_response(response),
        })
    }
}
