//! Functional tests for inbound rate limiting

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use tower::ServiceExt;
use tryon_gateway::middleware::rate_limit::RateLimitLayer;
use tryon_gateway::response::TryOnResult;

fn create_test_app(rps: u32, burst: u32) -> Router {
    Router::new()
        .route("/health", axum::routing::get(|| async { "healthy" }))
        .route("/virtual-tryon", axum::routing::post(|| async { "OK" }))
        .layer(RateLimitLayer::new(rps, burst))
}

fn tryon_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/virtual-tryon")
        .body(Body::empty())
        .unwrap()
}

#[tokio::test]
async fn test_rate_limit_allows_within_limit() {
    let app = create_test_app(100, 100);

    let response = app.oneshot(tryon_request()).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_rate_limit_health_bypass() {
    let app = create_test_app(1, 1);

    // Spend the single token first
    let response = app.clone().oneshot(tryon_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    for _ in 0..5 {
        let response = app
            .clone()
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}

#[tokio::test]
async fn test_rate_limit_exceeded_returns_result_shape() {
    let app = create_test_app(1, 1);

    let response = app.clone().oneshot(tryon_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut limited = None;
    for _ in 0..10 {
        let response = app.clone().oneshot(tryon_request()).await.unwrap();
        if response.status() == StatusCode::TOO_MANY_REQUESTS {
            limited = Some(response);
            break;
        }
    }

    let response = limited.expect("Expected rate limiting to kick in");
    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let result: TryOnResult = serde_json::from_slice(&body).unwrap();
    assert!(!result.success);
    assert_eq!(result.code.as_deref(), Some("inbound_rate_limited"));
    assert!(result.image.is_none());
}

#[tokio::test]
async fn test_rate_limit_burst_capacity() {
    let app = create_test_app(1, 5);

    for _ in 0..5 {
        let response = app.clone().oneshot(tryon_request()).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
