//! Termhunt security core.
//!
//! In-process request hardening for the Termhunt platform: a
//! fixed-window rate limiter for sensitive operations and a per-session
//! CSRF token store, plus the axum middleware that consults them.
//! All state is in-memory and single-instance; the hosting application
//! owns the tracing subscriber and the metrics recorder.

pub mod config;
pub mod observability;
pub mod security;

pub use config::SecurityConfig;
pub use security::csrf::CsrfTokenStore;
pub use security::rate_limit::RateLimiter;
