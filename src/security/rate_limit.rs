//! Fixed-window rate limiting for sensitive operations.
//!
//! Attempts accumulate per opaque identifier (client IP, account key)
//! inside a fixed window. The count never resets on success; callers
//! that want forgiveness after a successful login must call
//! [`RateLimiter::clear`] themselves.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{header, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use crate::config::RateLimitConfig;
use crate::observability::metrics;

/// Attempts observed for one identifier in the current window.
struct AttemptRecord {
    count: u32,
    window_start: Instant,
}

/// Outcome of a check-and-record call.
#[derive(Debug, Clone, Copy)]
pub struct RateLimitDecision {
    pub allowed: bool,
    /// When the current window ends; set only on denial.
    pub reset_at: Option<Instant>,
}

impl RateLimitDecision {
    fn allowed() -> Self {
        Self {
            allowed: true,
            reset_at: None,
        }
    }

    fn denied(reset_at: Instant) -> Self {
        Self {
            allowed: false,
            reset_at: Some(reset_at),
        }
    }

    /// Time remaining until the window resets.
    pub fn retry_after(&self) -> Option<Duration> {
        self.reset_at
            .map(|at| at.saturating_duration_since(Instant::now()))
    }
}

/// In-memory fixed-window rate limiter.
///
/// One record per identifier, guarded by a single table lock; the
/// check/increment/write sequence is atomic relative to all callers.
pub struct RateLimiter {
    attempts: Mutex<HashMap<String, AttemptRecord>>,
    window: Duration,
    max_attempts: u32,
}

impl RateLimiter {
    pub fn new(config: &RateLimitConfig) -> Self {
        Self::with_limits(Duration::from_secs(config.window_secs), config.max_attempts)
    }

    pub fn with_limits(window: Duration, max_attempts: u32) -> Self {
        Self {
            attempts: Mutex::new(HashMap::new()),
            window,
            max_attempts,
        }
    }

    /// Record an attempt for `identifier` and decide whether it is
    /// still within budget.
    ///
    /// Any string is accepted as a distinct bucket; an unseen
    /// identifier is a normal case, not an error.
    pub fn check(&self, identifier: &str) -> RateLimitDecision {
        let now = Instant::now();
        let mut attempts = self.attempts.lock().expect("rate limiter mutex poisoned");

        match attempts.get_mut(identifier) {
            None => {
                attempts.insert(
                    identifier.to_string(),
                    AttemptRecord {
                        count: 1,
                        window_start: now,
                    },
                );
                RateLimitDecision::allowed()
            }
            // An expired window is replaced, never incremented.
            Some(record) if now.duration_since(record.window_start) > self.window => {
                *record = AttemptRecord {
                    count: 1,
                    window_start: now,
                };
                RateLimitDecision::allowed()
            }
            Some(record) => {
                record.count += 1;
                if record.count > self.max_attempts {
                    RateLimitDecision::denied(record.window_start + self.window)
                } else {
                    RateLimitDecision::allowed()
                }
            }
        }
    }

    /// Forget all attempts for `identifier`. No-op if unseen.
    ///
    /// Intended for use after a successful authenticated action.
    pub fn clear(&self, identifier: &str) {
        let mut attempts = self.attempts.lock().expect("rate limiter mutex poisoned");
        attempts.remove(identifier);
    }
}

/// Middleware guarding sensitive routes, keyed by client IP.
pub async fn rate_limit_middleware(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    State(limiter): State<Arc<RateLimiter>>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let key = addr.ip().to_string();
    let decision = limiter.check(&key);

    if decision.allowed {
        return next.run(request).await;
    }

    let retry_after_secs = decision
        .retry_after()
        .map(|d| d.as_secs().max(1))
        .unwrap_or(1);

    tracing::warn!(client = %key, retry_after_secs, "Rate limit exceeded");
    metrics::record_rate_limited();

    (
        StatusCode::TOO_MANY_REQUESTS,
        [(header::RETRY_AFTER, retry_after_secs.to_string())],
        Json(json!({
            "error": "too many attempts",
            "retry_after_secs": retry_after_secs,
        })),
    )
        .into_response()
}
