use std::time::Duration;

use axum::{
    Router,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
};
use rstest::*;
use vexil_net::{Headers, HttpClient, NetOptions};
use vexil_test_utils::TestHttpServer;

// ============================================================================
// Test endpoints
// ============================================================================

async fn body_endpoint() -> &'static str {
    "Hello, World!"
}

async fn require_header_endpoint(headers: HeaderMap) -> impl IntoResponse {
    if headers.get("X-Api-Token").is_some() {
        (StatusCode::OK, "authorized")
    } else {
        (StatusCode::BAD_REQUEST, "missing header")
    }
}

async fn slow_endpoint() -> &'static str {
    tokio::time::sleep(Duration::from_millis(500)).await;
    "Slow response"
}

fn router() -> Router {
    Router::new()
        .route("/body", get(body_endpoint))
        .route("/guarded", get(require_header_endpoint))
        .route("/slow", get(slow_endpoint))
        .route("/missing", get(|| async { StatusCode::NOT_FOUND }))
        .route(
            "/broken",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        )
}

// ============================================================================
// Tests
// ============================================================================

#[tokio::test]
async fn get_bytes_returns_full_body() {
    let server = TestHttpServer::new(router()).await;
    let client = HttpClient::new(NetOptions::default());

    let bytes = client.get_bytes(server.url("/body"), None).await.unwrap();

    assert_eq!(&bytes[..], b"Hello, World!");
}

#[tokio::test]
async fn get_bytes_sends_custom_headers() {
    let server = TestHttpServer::new(router()).await;
    let client = HttpClient::new(NetOptions::default());

    let mut headers = Headers::new();
    headers.insert("X-Api-Token", "secret");

    let bytes = client
        .get_bytes(server.url("/guarded"), Some(headers))
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"authorized");

    // Same endpoint without the header fails with 400.
    let err = client
        .get_bytes(server.url("/guarded"), None)
        .await
        .unwrap_err();
    assert_eq!(err.status_code(), Some(400));
}

#[rstest]
#[case::not_found("/missing", 404)]
#[case::server_error("/broken", 500)]
#[tokio::test]
async fn non_success_status_maps_to_http_status(#[case] path: &str, #[case] status: u16) {
    let server = TestHttpServer::new(router()).await;
    let client = HttpClient::new(NetOptions::default());

    let err = client.get_bytes(server.url(path), None).await.unwrap_err();

    assert_eq!(err.status_code(), Some(status));
}

#[tokio::test]
async fn request_timeout_surfaces_as_timeout() {
    let server = TestHttpServer::new(router()).await;
    let client = HttpClient::new(NetOptions {
        request_timeout: Duration::from_millis(50),
        pool_max_idle_per_host: 0,
    });

    let err = client
        .get_bytes(server.url("/slow"), None)
        .await
        .unwrap_err();

    assert!(err.is_timeout());
}
