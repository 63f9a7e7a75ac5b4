//! Metrics collection.
//!
//! # Metrics
//! - `termhunt_rate_limited_total` (counter): requests rejected by the
//!   rate limiter
//! - `termhunt_csrf_rejected_total` (counter): requests rejected by the
//!   CSRF guard, labelled by reason
//! - `termhunt_csrf_tokens_issued_total` (counter): tokens issued
//! - `termhunt_csrf_tokens_active` (gauge): live entries in the token
//!   store after the last sweep

use metrics::{counter, gauge};

pub fn record_rate_limited() {
    counter!("termhunt_rate_limited_total").increment(1);
}

pub fn record_csrf_rejected(reason: &'static str) {
    counter!("termhunt_csrf_rejected_total", "reason" => reason).increment(1);
}

pub fn record_csrf_token_issued() {
    counter!("termhunt_csrf_tokens_issued_total").increment(1);
}

pub fn record_csrf_store_size(size: usize) {
    gauge!("termhunt_csrf_tokens_active").set(size as f64);
}
