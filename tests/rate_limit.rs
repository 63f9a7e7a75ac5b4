//! End-to-end tests for the rate-limit middleware.

mod common;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, Method, StatusCode};
use termhunt_security::security::rate_limit::RateLimiter;
use tower::ServiceExt;

#[tokio::test]
async fn exhausted_budget_returns_429_with_retry_after() {
    common::init_tracing();
    let limiter = Arc::new(RateLimiter::with_limits(Duration::from_secs(60), 3));
    let app = common::login_router(limiter);
    let addr: SocketAddr = "203.0.113.9:4711".parse().unwrap();

    for _ in 0..3 {
        let response = app
            .clone()
            .oneshot(common::request_from(addr, Method::POST, "/login"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .clone()
        .oneshot(common::request_from(addr, Method::POST, "/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let retry_after: u64 = response
        .headers()
        .get(header::RETRY_AFTER)
        .unwrap()
        .to_str()
        .unwrap()
        .parse()
        .unwrap();
    assert!(retry_after >= 1 && retry_after <= 60);

    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "too many attempts");
    assert_eq!(body["retry_after_secs"].as_u64(), Some(retry_after));
}

#[tokio::test]
async fn other_clients_are_unaffected() {
    common::init_tracing();
    let limiter = Arc::new(RateLimiter::with_limits(Duration::from_secs(60), 1));
    let app = common::login_router(limiter);

    let throttled: SocketAddr = "203.0.113.9:4711".parse().unwrap();
    let other: SocketAddr = "198.51.100.23:9000".parse().unwrap();

    app.clone()
        .oneshot(common::request_from(throttled, Method::POST, "/login"))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(common::request_from(throttled, Method::POST, "/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    let response = app
        .clone()
        .oneshot(common::request_from(other, Method::POST, "/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn window_expiry_restores_service() {
    common::init_tracing();
    let limiter = Arc::new(RateLimiter::with_limits(Duration::from_millis(100), 1));
    let app = common::login_router(limiter);
    let addr: SocketAddr = "203.0.113.9:4711".parse().unwrap();

    app.clone()
        .oneshot(common::request_from(addr, Method::POST, "/login"))
        .await
        .unwrap();
    let response = app
        .clone()
        .oneshot(common::request_from(addr, Method::POST, "/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

    tokio::time::sleep(Duration::from_millis(250)).await;

    let response = app
        .clone()
        .oneshot(common::request_from(addr, Method::POST, "/login"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
