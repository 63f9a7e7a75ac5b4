//! Shared utilities for middleware integration tests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    extract::connect_info::ConnectInfo,
    http::{Method, Request},
    middleware,
    routing::post,
    Router,
};
use termhunt_security::security::csrf::{csrf_middleware, CsrfState};
use termhunt_security::security::rate_limit::{rate_limit_middleware, RateLimiter};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "termhunt_security=debug".into()),
        )
        .try_init();
}

/// A login route guarded by the rate limiter.
#[allow(dead_code)]
pub fn login_router(limiter: Arc<RateLimiter>) -> Router {
    Router::new()
        .route("/login", post(|| async { "ok" }))
        .layer(middleware::from_fn_with_state(
            limiter,
            rate_limit_middleware,
        ))
}

/// A submission route guarded by the CSRF middleware.
#[allow(dead_code)]
pub fn submit_router(state: CsrfState) -> Router {
    Router::new()
        .route("/apps", post(|| async { "created" }).get(|| async { "listing" }))
        .layer(middleware::from_fn_with_state(state, csrf_middleware))
}

/// Build a request carrying the connection info the limiter keys on.
#[allow(dead_code)]
pub fn request_from(addr: SocketAddr, method: Method, uri: &str) -> Request<Body> {
    let mut request = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    request.extensions_mut().insert(ConnectInfo(addr));
    request
}
