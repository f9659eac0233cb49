use std::time::Duration;

use dashboard_client::{ApiClient, ApiError, ClientSettings, HttpApiClient};
use pretty_assertions::assert_eq;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    }
}

#[tokio::test]
async fn upload_returns_receipt_with_server_assigned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(202).set_body_json(serde_json::json!({
            "job_id": "42"
        })))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let receipt = client
        .upload("report.pdf", b"%PDF-1.4".to_vec())
        .await
        .expect("upload ok");

    assert_eq!(receipt.job_id, "42");
    assert_eq!(receipt.filename, None);
    assert_eq!(receipt.status, None);
}

#[tokio::test]
async fn upload_rejection_maps_to_upload_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
            "error": "Only PDF uploads are supported"
        })))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let err = client.upload("notes.txt", b"hello".to_vec()).await.unwrap_err();
    assert_eq!(err, ApiError::UploadHttp(400));
}

#[tokio::test]
async fn successful_upload_without_job_id_is_missing_job_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "filename": "report.pdf"
        })))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let err = client
        .upload("report.pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::MissingJobId);
}

#[tokio::test]
async fn empty_job_id_counts_as_missing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "job_id": ""
        })))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let err = client
        .upload("report.pdf", b"%PDF-1.4".to_vec())
        .await
        .unwrap_err();
    assert_eq!(err, ApiError::MissingJobId);
}

#[tokio::test]
async fn status_fetch_parses_partial_bodies() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "done"
        })))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let update = client.fetch_status("42").await.expect("status ok");

    assert_eq!(update.status.as_deref(), Some("done"));
    assert_eq!(update.filename, None);
    assert_eq!(update.error_message, None);
}

#[tokio::test]
async fn status_fetch_keeps_error_message_field() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "failed",
            "error_message": "pipeline crashed"
        })))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let update = client.fetch_status("42").await.expect("status ok");
    assert_eq!(update.error_message.as_deref(), Some("pipeline crashed"));
}

#[tokio::test]
async fn status_fetch_maps_server_errors_to_poll_http() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let err = client.fetch_status("42").await.unwrap_err();
    assert_eq!(err, ApiError::PollHttp(500));
}

#[tokio::test]
async fn slow_status_fetch_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/42"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_millis(250))
                .set_body_json(serde_json::json!({ "status": "running" })),
        )
        .mount(&server)
        .await;

    let settings = ClientSettings {
        request_timeout: Duration::from_millis(50),
        ..settings_for(&server)
    };
    let client = HttpApiClient::new(settings).expect("client");
    let err = client.fetch_status("42").await.unwrap_err();
    assert_eq!(err, ApiError::Timeout);
}

#[tokio::test]
async fn garbage_body_on_success_is_invalid_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/status/42"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let client = HttpApiClient::new(settings_for(&server)).expect("client");
    let err = client.fetch_status("42").await.unwrap_err();
    assert!(matches!(err, ApiError::InvalidBody(_)));
}
