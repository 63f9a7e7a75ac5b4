//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the security core.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SecurityConfig {
    /// Login / sensitive-operation rate limiting.
    pub rate_limit: RateLimitConfig,

    /// CSRF token issuance and validation.
    pub csrf: CsrfConfig,
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Window size in seconds. Attempts accumulate within a window and
    /// the count resets only when the window expires.
    pub window_secs: u64,

    /// Maximum attempts per identifier per window.
    pub max_attempts: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            window_secs: 15 * 60,
            max_attempts: 5,
        }
    }
}

/// CSRF protection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CsrfConfig {
    /// Token lifetime in seconds.
    pub token_ttl_secs: u64,

    /// Request header carrying the candidate token.
    pub header_name: String,

    /// Cookie identifying the caller's session.
    pub cookie_name: String,
}

impl Default for CsrfConfig {
    fn default() -> Self {
        Self {
            token_ttl_secs: 60 * 60,
            header_name: "x-csrf-token".to_string(),
            cookie_name: "termhunt_session".to_string(),
        }
    }
}
