//! Per-session CSRF token issuance and validation.
//!
//! One active token per session: issuing again overwrites the previous
//! token, which becomes invalid immediately. Every issuance doubles as
//! an opportunistic sweep of expired records across all sessions.

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderMap, Method, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use dashmap::DashMap;
use rand::rngs::OsRng;
use rand::RngCore;
use serde_json::json;

use crate::config::CsrfConfig;
use crate::observability::metrics;

/// Token entropy in bytes; hex-encoded to twice as many characters.
const TOKEN_BYTES: usize = 32;

struct TokenRecord {
    token: String,
    issued_at: Instant,
}

/// Thread-safe store of per-session anti-forgery tokens.
pub struct CsrfTokenStore {
    tokens: DashMap<String, TokenRecord>,
    ttl: Duration,
}

impl CsrfTokenStore {
    pub fn new(config: &CsrfConfig) -> Self {
        Self::with_ttl(Duration::from_secs(config.token_ttl_secs))
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            tokens: DashMap::new(),
            ttl,
        }
    }

    /// Generate a fresh token for `session_id`, overwriting any prior
    /// token for that session.
    pub fn issue(&self, session_id: &str) -> String {
        let mut bytes = [0u8; TOKEN_BYTES];
        OsRng.fill_bytes(&mut bytes);
        let token = hex::encode(bytes);

        // Every issuance sweeps expired records, regardless of session.
        self.tokens
            .retain(|_, record| record.issued_at.elapsed() <= self.ttl);

        self.tokens.insert(
            session_id.to_string(),
            TokenRecord {
                token: token.clone(),
                issued_at: Instant::now(),
            },
        );

        metrics::record_csrf_token_issued();
        metrics::record_csrf_store_size(self.tokens.len());
        token
    }

    /// Check `candidate` against the stored token for `session_id`.
    ///
    /// An expired record is purged on the spot. A mismatch keeps the
    /// record, so a retry with the correct token still succeeds.
    pub fn validate(&self, session_id: &str, candidate: &str) -> bool {
        let Some(record) = self.tokens.get(session_id) else {
            return false;
        };

        if record.issued_at.elapsed() > self.ttl {
            // Release the shard lock before removing.
            drop(record);
            self.tokens.remove(session_id);
            return false;
        }

        record.token == candidate
    }

    /// Drop the token for `session_id`. No-op if absent.
    ///
    /// Called on logout so a stale token cannot outlive its session.
    pub fn remove(&self, session_id: &str) {
        self.tokens.remove(session_id);
    }

    /// Number of stored records, expired ones included.
    pub fn count(&self) -> usize {
        self.tokens.len()
    }
}

/// State required by the CSRF middleware.
#[derive(Clone)]
pub struct CsrfState {
    pub store: Arc<CsrfTokenStore>,
    pub config: CsrfConfig,
}

/// Middleware rejecting state-changing requests without a valid token.
///
/// Safe methods pass through untouched. Handlers issue tokens via
/// [`CsrfTokenStore::issue`] when rendering a page and call
/// [`CsrfTokenStore::remove`] on logout.
pub async fn csrf_middleware(
    State(state): State<CsrfState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if !is_state_changing(request.method()) {
        return next.run(request).await;
    }

    match check_request(request.headers(), &state) {
        Ok(()) => next.run(request).await,
        Err(reason) => {
            tracing::warn!(%reason, "CSRF validation failed");
            metrics::record_csrf_rejected(reason);
            (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "invalid or missing csrf token" })),
            )
                .into_response()
        }
    }
}

fn is_state_changing(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn check_request(headers: &HeaderMap, state: &CsrfState) -> Result<(), &'static str> {
    let session_id =
        cookie_value(headers, &state.config.cookie_name).ok_or("missing_session")?;

    let candidate = headers
        .get(state.config.header_name.as_str())
        .and_then(|value| value.to_str().ok())
        .ok_or("missing_token")?;

    if state.store.validate(session_id, candidate) {
        Ok(())
    } else {
        Err("invalid_token")
    }
}

fn cookie_value<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    let raw = headers.get(header::COOKIE)?.to_str().ok()?;
    raw.split(';')
        .map(str::trim)
        .find_map(|pair| pair.strip_prefix(name)?.strip_prefix('='))
}
