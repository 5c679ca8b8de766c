//! Unit and mock HTTP tests for UploadClient and FileSink.
//!
//! These tests cover:
//! - Multipart request formatting
//! - Receipt and ping parsing
//! - Error handling for non-success statuses and rejected uploads
//! - Single in-flight sends against a slow receiver
//! - Controller → receiver integration

use std::time::Duration;

use image::{Rgb, RgbImage};
use wiremock::matchers::{header_regex, method, path};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use snappaste::camera::StillFrameSource;
use snappaste::controller::{Controller, ControllerSettings, Status};
use snappaste::transport::{
    Dispatcher, FileSink, SendOutcome, Transport, TransportError, UploadClient, DEFAULT_FILENAME,
    UPLOAD_PATH,
};

const PAYLOAD: &[u8] = b"fake-jpeg-bytes";

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

fn image_part(request: &Request) -> bool {
    contains(&request.body, b"name=\"image\"") && contains(&request.body, PAYLOAD)
}

fn accepted() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "success": true,
        "message": "Image copied to clipboard",
        "size": PAYLOAD.len()
    }))
}

// === Upload ===

#[tokio::test]
async fn test_upload_sends_multipart_image_field() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(header_regex("content-type", "^multipart/form-data; boundary="))
        .and(image_part)
        .respond_with(accepted())
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UploadClient::new(mock_server.uri()).unwrap();
    let receipt = client.upload(PAYLOAD.to_vec(), DEFAULT_FILENAME).await.unwrap();

    assert!(receipt.success);
    assert_eq!(receipt.message.as_deref(), Some("Image copied to clipboard"));
    assert_eq!(receipt.size, Some(PAYLOAD.len() as u64));
}

#[tokio::test]
async fn test_upload_sends_filename_hint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(|request: &Request| contains(&request.body, b"filename=\"IMG_0042.jpg\""))
        .respond_with(accepted())
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UploadClient::new(mock_server.uri()).unwrap();
    client.send(PAYLOAD.to_vec(), "IMG_0042.jpg").await.unwrap();
}

#[tokio::test]
async fn test_upload_error_status_keeps_body_verbatim() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(500).set_body_string("clipboard unavailable"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UploadClient::new(mock_server.uri()).unwrap();
    let result = client.upload(PAYLOAD.to_vec(), DEFAULT_FILENAME).await;

    match result {
        Err(TransportError::Status { status, body }) => {
            assert_eq!(status, 500);
            assert_eq!(body, "clipboard unavailable");
        }
        other => panic!("Expected Status error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_reported_failure_is_rejected() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false,
            "error": "No image file provided"
        })))
        .mount(&mock_server)
        .await;

    let client = UploadClient::new(mock_server.uri()).unwrap();
    let result = client.upload(PAYLOAD.to_vec(), DEFAULT_FILENAME).await;

    match result {
        Err(TransportError::Rejected(reason)) => assert_eq!(reason, "No image file provided"),
        other => panic!("Expected Rejected error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_upload_unreachable_receiver_is_http_error() {
    // Nothing listens on port 1
    let client = UploadClient::new("http://127.0.0.1:1").unwrap();
    let result = client.upload(PAYLOAD.to_vec(), DEFAULT_FILENAME).await;
    assert!(matches!(result, Err(TransportError::Http(_))));
}

// === Ping ===

#[tokio::test]
async fn test_ping_parses_health_response() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "ok",
            "service": "SnapPaste"
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UploadClient::new(mock_server.uri()).unwrap();
    let ping = client.ping().await.unwrap();
    assert_eq!(ping.status, "ok");
    assert_eq!(ping.service.as_deref(), Some("SnapPaste"));
}

#[tokio::test]
async fn test_ping_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/ping"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&mock_server)
        .await;

    let client = UploadClient::new(mock_server.uri()).unwrap();
    assert!(matches!(
        client.ping().await,
        Err(TransportError::Status { status: 404, .. })
    ));
}

// === Single in-flight ===

#[tokio::test]
async fn test_concurrent_sends_reach_receiver_once() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(accepted().set_delay(Duration::from_millis(200)))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = UploadClient::new(mock_server.uri()).unwrap();
    let dispatcher = Dispatcher::new(client);

    let (first, second) = tokio::join!(
        dispatcher.send(PAYLOAD.to_vec(), DEFAULT_FILENAME),
        dispatcher.send(PAYLOAD.to_vec(), DEFAULT_FILENAME)
    );

    let outcomes = [first.unwrap(), second.unwrap()];
    let sent = outcomes
        .iter()
        .filter(|o| matches!(o, SendOutcome::Sent(_)))
        .count();
    assert_eq!(sent, 1);
    assert!(outcomes.contains(&SendOutcome::Skipped));
    assert!(!dispatcher.is_sending());
}

#[tokio::test]
async fn test_failed_send_releases_gate() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("busy"))
        .expect(2)
        .mount(&mock_server)
        .await;

    let dispatcher = Dispatcher::new(UploadClient::new(mock_server.uri()).unwrap());
    assert!(dispatcher.send(PAYLOAD.to_vec(), DEFAULT_FILENAME).await.is_err());
    assert!(!dispatcher.is_sending());
    assert!(dispatcher.send(PAYLOAD.to_vec(), DEFAULT_FILENAME).await.is_err());
}

// === Controller integration ===

#[tokio::test]
async fn test_controller_uploads_edited_photo() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(UPLOAD_PATH))
        .and(|request: &Request| {
            // JPEG start-of-image marker inside the multipart body
            contains(&request.body, &[0xFF, 0xD8, 0xFF])
                && contains(&request.body, b"filename=\"photo.jpg\"")
        })
        .respond_with(accepted())
        .expect(1)
        .mount(&mock_server)
        .await;

    let source = StillFrameSource::new(RgbImage::from_pixel(160, 120, Rgb([200, 40, 40])));
    let client = UploadClient::new(mock_server.uri()).unwrap();
    let mut controller = Controller::new(source, client, ControllerSettings::default());

    controller.shutter().await.unwrap();
    controller.rotate();
    controller.toggle_crop();
    let outcome = controller.confirm().await.unwrap();

    assert!(matches!(outcome, SendOutcome::Sent(_)));
    assert_eq!(controller.status().current(), &Status::Sent);
}

// === File sink ===

#[tokio::test]
async fn test_file_sink_writes_payload() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("out.jpg");
    let sink = FileSink::new(&target);

    let receipt = sink.send(PAYLOAD.to_vec(), DEFAULT_FILENAME).await.unwrap();
    assert!(receipt.success);
    assert_eq!(receipt.size, Some(PAYLOAD.len() as u64));
    assert_eq!(std::fs::read(&target).unwrap(), PAYLOAD);
}

#[tokio::test]
async fn test_file_sink_target_is_directory_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let sink = FileSink::new(dir.path());
    let result = sink.send(PAYLOAD.to_vec(), DEFAULT_FILENAME).await;
    assert!(matches!(result, Err(TransportError::Io(_))));
}
