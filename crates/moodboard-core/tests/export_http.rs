//! Image download for export against a mock HTTP server.

use moodboard_core::{ExportError, ImageDownloader, ImageRecord};
use std::time::Duration;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const PNG: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

fn image(status: u16, content_type: &str, body: &[u8]) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_raw(body, content_type)
}

#[tokio::test]
async fn test_download_full_resolution() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/full.png"))
        .respond_with(image(200, "image/png", PNG))
        .expect(1)
        .mount(&server)
        .await;
    let record = ImageRecord::new("1", format!("{}/full.png", server.uri()), "Pexels")
        .with_title("Dune ridge")
        .with_photographer("Ana Lee");

    let payload = ImageDownloader::default().download(&record).await.unwrap();
    assert_eq!(payload.bytes, PNG);
    assert_eq!(payload.file_extension(), "png");
    assert_eq!(payload.node_name(), "Dune ridge (Pexels) by Ana Lee");

    let message = serde_json::to_value(payload.host_message()).unwrap();
    assert_eq!(message["type"], "insert-image");
    assert_eq!(message["bytes"], "iVBORw0KGgo=");
}

#[tokio::test]
async fn test_download_falls_back_to_thumbnail() {
    let server = MockServer::start().await;
    Mock::given(path("/full.jpg"))
        .respond_with(image(404, "text/plain", b"gone"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(path("/thumb.jpg"))
        .respond_with(image(200, "image/jpeg", &[0xFF, 0xD8, 0xFF]))
        .expect(1)
        .mount(&server)
        .await;
    let record = ImageRecord::new("1", format!("{}/full.jpg", server.uri()), "Pinterest")
        .with_thumbnail(Some(format!("{}/thumb.jpg", server.uri())));

    let payload = ImageDownloader::default().download(&record).await.unwrap();
    assert_eq!(payload.bytes, vec![0xFF, 0xD8, 0xFF]);
}

#[tokio::test]
async fn test_download_reports_status_when_both_fail() {
    // Nothing mounted: every path answers 404
    let server = MockServer::start().await;
    let record = ImageRecord::new("1", format!("{}/full.jpg", server.uri()), "Pexels")
        .with_thumbnail(Some(format!("{}/thumb.jpg", server.uri())));

    let err = ImageDownloader::default().download(&record).await.unwrap_err();
    assert!(matches!(err, ExportError::Status { status: 404, .. }));
}

#[tokio::test]
async fn test_download_empty_body_is_error() {
    let server = MockServer::start().await;
    Mock::given(path("/empty.jpg"))
        .respond_with(image(200, "image/jpeg", b""))
        .mount(&server)
        .await;
    let record = ImageRecord::new("1", format!("{}/empty.jpg", server.uri()), "Pexels");

    let err = ImageDownloader::default().download(&record).await.unwrap_err();
    assert!(matches!(err, ExportError::EmptyBody { .. }));
}

#[tokio::test]
async fn test_stalled_download_times_out() {
    let server = MockServer::start().await;
    Mock::given(path("/slow.png"))
        .respond_with(image(200, "image/png", PNG).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;
    let record = ImageRecord::new("1", format!("{}/slow.png", server.uri()), "Pexels");

    let err = ImageDownloader::default()
        .with_timeout(Duration::from_millis(100))
        .download(&record)
        .await
        .unwrap_err();
    assert!(matches!(err, ExportError::Timeout { timeout_ms: 100, .. }));
}
