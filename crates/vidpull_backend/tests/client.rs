use std::time::Duration;

use pretty_assertions::assert_eq;
use serde_json::json;
use vidpull_backend::{ApiError, BackendApi, BackendSettings, HttpBackend, StatusKind};
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn backend_for(server: &MockServer) -> HttpBackend {
    HttpBackend::new(BackendSettings {
        base_url: server.uri(),
        ..BackendSettings::default()
    })
    .expect("backend client")
}

#[tokio::test]
async fn start_download_posts_url_and_path_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .and(body_json(json!({
            "url": "https://x/v1",
            "output_path": "./vids",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "download_id": "abc",
            "message": "Download started",
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let id = backend
        .start_download("https://x/v1", "./vids")
        .await
        .expect("start ok");
    assert_eq!(id, "abc");
}

#[tokio::test]
async fn start_download_rejection_carries_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "URL is required" })),
        )
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend
        .start_download("", "./vids")
        .await
        .expect_err("rejected");
    assert_eq!(err, ApiError::Rejected("URL is required".to_string()));
}

#[tokio::test]
async fn start_download_rejection_without_payload_uses_fallback_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/download"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend
        .start_download("https://x/v1", "./vids")
        .await
        .expect_err("rejected");
    assert_eq!(
        err,
        ApiError::Rejected("failed to start download".to_string())
    );
}

#[tokio::test]
async fn unreachable_backend_is_a_transport_error() {
    // Bind a server to grab a free port, then shut it down. The builder
    // gives an exclusive (non-pooled) server that stops listening on drop.
    let uri = {
        let server = MockServer::builder().start().await;
        server.uri()
    };

    let backend = HttpBackend::new(BackendSettings {
        base_url: uri,
        connect_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_millis(500),
    })
    .expect("backend client");

    let err = backend
        .start_download("https://x/v1", "./vids")
        .await
        .expect_err("unreachable");
    assert!(matches!(err, ApiError::Transport(_)), "got {err:?}");
}

#[tokio::test]
async fn fetch_status_parses_downloading_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "downloading",
            "progress": 42.5,
            "message": "42.5% at 1.2MiB/s",
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let payload = backend.fetch_status("abc").await.expect("status ok");
    assert_eq!(payload.status, StatusKind::Downloading);
    assert_eq!(payload.progress, 42.5);
    assert_eq!(payload.message, "42.5% at 1.2MiB/s");
}

#[tokio::test]
async fn fetch_status_parses_not_found_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/gone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "not_found",
            "progress": 0,
            "message": "Download not found",
        })))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let payload = backend.fetch_status("gone").await.expect("status ok");
    assert_eq!(payload.status, StatusKind::NotFound);
}

#[tokio::test]
async fn fetch_status_garbage_body_is_a_payload_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/status/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let err = backend.fetch_status("abc").await.expect_err("bad payload");
    assert!(matches!(err, ApiError::Payload(_)), "got {err:?}");
}

#[tokio::test]
async fn list_videos_sends_path_query_and_parses_entries() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/videos"))
        .and(query_param("path", "./vids"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "filename": "a.mp4", "size": 1048576, "size_mb": 1.0 },
            { "filename": "b.mp4", "size": 3145728, "size_mb": 3.0 },
        ])))
        .mount(&server)
        .await;

    let backend = backend_for(&server);
    let videos = backend.list_videos("./vids").await.expect("listing ok");
    assert_eq!(videos.len(), 2);
    assert_eq!(videos[0].filename, "a.mp4");
    assert_eq!(videos[0].size, 1_048_576);
    assert_eq!(videos[1].size_mb, 3.0);
}

#[test]
fn bad_base_url_is_rejected_up_front() {
    let err = HttpBackend::new(BackendSettings {
        base_url: "not a url".to_string(),
        ..BackendSettings::default()
    })
    .expect_err("bad address");
    assert!(matches!(err, ApiError::BadAddress(_)), "got {err:?}");
}
