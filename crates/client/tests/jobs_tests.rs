//! Search job endpoint tests.
//!
//! # Invariants
//! - Job creation sends `count=0` and both time bounds, and returns the SID
//! - Results are requested with `f=*` and `count=0` and streamed back verbatim
//! - Cancellation posts `action=cancel` to the control endpoint

mod common;

use common::*;
use splunk_search_client::{ClientError, OutputMode, SearchRequest, SearchService};
use wiremock::matchers::{body_string_contains, header, method, path, query_param};

fn request() -> SearchRequest {
    SearchRequest::new("index=main", true, "-1h", "now", OutputMode::Csv).unwrap()
}

#[tokio::test]
async fn test_create_job_sends_window_and_count() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .and(header("Authorization", "Bearer test-token"))
        .and(body_string_contains("earliest_time=-1h"))
        .and(body_string_contains("latest_time=now"))
        .and(body_string_contains("count=0"))
        .and(body_string_contains("search=search+index%3Dmain"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"sid": "1700000000.1"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = token_client(&mock_server);
    let sid = client.create_job(&request()).await.unwrap();
    assert_eq!(sid, "1700000000.1");
}

#[tokio::test]
async fn test_create_job_entry_shaped_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
            "entry": [{"content": {"sid": "scheduler__admin__search_1"}}]
        })))
        .mount(&mock_server)
        .await;

    let client = Client::new();
    let options = endpoints::CreateJobOptions {
        count: Some(0),
        ..Default::default()
    };
    let sid = endpoints::create_job(
        &client,
        &format!("{}/services", mock_server.uri()),
        "Bearer test-token",
        "search index=main",
        &options,
        0,
    )
    .await
    .unwrap();
    assert_eq!(sid, "scheduler__admin__search_1");
}

#[tokio::test]
async fn test_create_job_missing_sid() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({})))
        .mount(&mock_server)
        .await;

    let mut client = token_client(&mock_server);
    let err = client.create_job(&request()).await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse(_)));
}

#[tokio::test]
async fn test_create_job_surfaces_splunk_messages() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "messages": [{"type": "FATAL", "text": "Unknown search command 'bogus'."}]
        })))
        .mount(&mock_server)
        .await;

    let mut client = token_client(&mock_server);
    match client.create_job(&request()).await {
        Err(ClientError::ApiError {
            status, message, ..
        }) => {
            assert_eq!(status, 400);
            assert_eq!(message, "FATAL: Unknown search command 'bogus'.");
        }
        other => panic!("expected ApiError, got {:?}", other),
    }
}

#[tokio::test]
async fn test_job_status_parsed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/1700000000.1"))
        .and(query_param("output_mode", "json"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(job_status_body("1700000000.1", true, 1.0)),
        )
        .mount(&mock_server)
        .await;

    let mut client = token_client(&mock_server);
    let status = client.job_status("1700000000.1").await.unwrap();
    assert!(status.is_done);
    assert!(status.is_ready());
    assert_eq!(status.scan_count, 100);
    assert_eq!(status.event_count, 10);
    assert_eq!(status.result_count, 2);
}

#[tokio::test]
async fn test_results_streamed_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/services/search/jobs/1700000000.1/results"))
        .and(query_param("output_mode", "csv"))
        .and(query_param("f", "*"))
        .and(query_param("count", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_string("a,b\nc,d\n"))
        .mount(&mock_server)
        .await;

    let mut client = token_client(&mock_server);
    let stream = client
        .results("1700000000.1", OutputMode::Csv)
        .await
        .unwrap();
    let body = collect_bytes(stream).await.unwrap();
    assert_eq!(body, b"a,b\nc,d\n");
}

#[tokio::test]
async fn test_cancel_posts_control_action() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/services/search/jobs/1700000000.1/control"))
        .and(body_string_contains("action=cancel"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "messages": [{"type": "INFO", "text": "Search job cancelled."}]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = token_client(&mock_server);
    client.cancel_job("1700000000.1").await.unwrap();
}

#[tokio::test]
async fn test_app_context_scopes_job_paths() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/servicesNS/-/search/search/jobs"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(serde_json::json!({"sid": "app-sid"})),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let mut client = splunk_search_client::SplunkClient::builder()
        .base_url(mock_server.uri())
        .auth_strategy(splunk_search_client::AuthStrategy::ApiToken {
            token: secrecy::SecretString::new("t".to_string().into()),
        })
        .app(Some("search".to_string()))
        .build()
        .unwrap();

    assert_eq!(client.create_job(&request()).await.unwrap(), "app-sid");
}
