use std::io::Write;

use docassist_client::{
    ClientEvent, ClientSettings, FailureKind, HttpIngestService, IngestService, ServiceCommand,
    ServiceHandle,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn settings_for(server: &MockServer) -> ClientSettings {
    ClientSettings::new(server.uri())
}

#[tokio::test]
async fn file_upload_sends_multipart_and_returns_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "File handbook.pdf uploaded successfully and added to knowledge base"
        })))
        .mount(&server)
        .await;

    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(b"%PDF-1.4 stub").expect("write");

    let service = HttpIngestService::new(&settings_for(&server)).expect("service");
    let message = service.upload_file(file.path()).await.expect("upload ok");
    assert!(message.contains("added to knowledge base"));
}

#[tokio::test]
async fn file_upload_with_missing_file_fails_locally() {
    let server = MockServer::start().await;
    let service = HttpIngestService::new(&settings_for(&server)).expect("service");

    let err = service
        .upload_file(std::path::Path::new("/nonexistent/no.pdf"))
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::FileUnreadable);
    // Nothing was sent to the server.
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn url_upload_posts_json_and_returns_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_url"))
        .and(body_json(json!({"url": "https://example.com/paper.pdf"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "message": "Document from URL added successfully to knowledge base"
        })))
        .mount(&server)
        .await;

    let service = HttpIngestService::new(&settings_for(&server)).expect("service");
    let message = service
        .upload_url("https://example.com/paper.pdf")
        .await
        .expect("upload ok");
    assert_eq!(
        message,
        "Document from URL added successfully to knowledge base"
    );
}

#[tokio::test]
async fn server_rejection_carries_the_server_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_url"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "success": false,
            "message": "No URL provided"
        })))
        .mount(&server)
        .await;

    let service = HttpIngestService::new(&settings_for(&server)).expect("service");
    let err = service.upload_url("https://example.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Rejected);
    assert_eq!(err.message, "No URL provided");
}

#[tokio::test]
async fn upload_failure_without_contract_body_maps_to_http_status() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_url"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let service = HttpIngestService::new(&settings_for(&server)).expect("service");
    let err = service.upload_url("https://example.com").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(502));
}

#[tokio::test]
async fn service_handle_runs_uploads_concurrently() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/upload_url"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(100))
                .set_body_json(json!({"success": true, "message": "ingested"})),
        )
        .mount(&server)
        .await;

    let (handle, events) = ServiceHandle::new(settings_for(&server)).expect("handle");
    for job_id in 1..=3 {
        handle.submit(ServiceCommand::UploadUrl {
            job_id,
            url: "https://example.com/doc.pdf".to_string(),
        });
    }

    // Three 100ms uploads finishing well under 300ms only happens when they
    // overlap. Poll without blocking so the mock server keeps serving.
    let started = std::time::Instant::now();
    let mut completed = Vec::new();
    while completed.len() < 3 {
        assert!(
            started.elapsed() < std::time::Duration::from_secs(5),
            "timed out waiting for events"
        );
        match events.try_recv() {
            Ok(ClientEvent::UploadCompleted { job_id, result }) => {
                assert_eq!(result.unwrap(), "ingested");
                completed.push(job_id);
            }
            Ok(other) => panic!("unexpected event: {other:?}"),
            Err(_) => tokio::time::sleep(std::time::Duration::from_millis(5)).await,
        }
    }
    assert!(started.elapsed() < std::time::Duration::from_millis(300));
    completed.sort_unstable();
    assert_eq!(completed, vec![1, 2, 3]);
}
