//! Shared test utilities for splunk-search integration tests.
//!
//! Responsibilities:
//! - Provide a hermetic command factory that prevents dotenv and `~/.splunkrc` loading.
//! - Mount the standard job endpoints on a mock server.
//!
//! Invariants / Assumptions:
//! - `SPLUNK_API_TOKEN` is set to "test-token" unless overridden.
//! - `HOME` points at a directory without a `.splunkrc`.

use assert_cmd::Command;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Returns a hermetic `splunk-search` command.
///
/// It ensures:
/// - `DOTENV_DISABLED=1` is set to prevent local `.env` contamination.
/// - `SPLUNK_API_TOKEN` is set to a dummy value to satisfy config validation.
/// - Other `SPLUNK_*` variables from the host are cleared.
/// - Progress output is off.
#[allow(dead_code)]
pub fn splunk_search_cmd() -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("splunk-search");

    for (key, _) in std::env::vars() {
        if key.starts_with("SPLUNK_") {
            cmd.env_remove(&key);
        }
    }
    cmd.env_remove("RUST_LOG");

    cmd.env("DOTENV_DISABLED", "1");
    cmd.env("HOME", std::env::temp_dir().join("splunk-search-tests-no-home"));
    cmd.env("SPLUNK_API_TOKEN", "test-token");
    cmd.arg("--quiet");

    cmd
}

/// Returns a hermetic command pointed at `base_url`.
#[allow(dead_code)]
pub fn splunk_search_cmd_with_base_url(base_url: &str) -> Command {
    let mut cmd = splunk_search_cmd();
    cmd.env("SPLUNK_BASE_URL", base_url);
    cmd
}

/// Standard job status envelope.
#[allow(dead_code)]
pub fn job_status_body(sid: &str, is_done: bool, progress: f64) -> serde_json::Value {
    serde_json::json!({
        "entry": [{
            "name": sid,
            "content": {
                "sid": sid,
                "dispatchState": if is_done { "DONE" } else { "RUNNING" },
                "isDone": is_done,
                "isFailed": false,
                "doneProgress": progress,
                "scanCount": "120",
                "eventCount": "2",
                "resultCount": "2",
                "runDuration": "0.25"
            }
        }]
    })
}

/// Mount job creation (returning `sid`) and cancellation for `sid`.
///
/// Cancellation is expected exactly once.
#[allow(dead_code)]
pub async fn mount_job_lifecycle(server: &MockServer, sid: &str) {
    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_string_contains("count=0"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({ "sid": sid })),
        )
        .expect(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path(format!("/services/search/jobs/{sid}/control")))
        .and(body_string_contains("action=cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [{ "type": "INFO", "text": "Search job cancelled." }]
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mount a status endpoint that reports "running" `running_polls` times, then done.
#[allow(dead_code)]
pub async fn mount_job_status(server: &MockServer, sid: &str, running_polls: u64) {
    if running_polls > 0 {
        Mock::given(method("GET"))
            .and(path(format!("/services/search/jobs/{sid}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(job_status_body(sid, false, 0.5)))
            .up_to_n_times(running_polls)
            .expect(running_polls)
            .mount(server)
            .await;
    }

    Mock::given(method("GET"))
        .and(path(format!("/services/search/jobs/{sid}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(job_status_body(sid, true, 1.0)))
        .mount(server)
        .await;
}
