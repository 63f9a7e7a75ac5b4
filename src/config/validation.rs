//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (windows and lifetimes > 0)
//! - Reject unusable header/cookie names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: SecurityConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use thiserror::Error;

use crate::config::schema::SecurityConfig;

/// A single semantic violation in the configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("rate_limit.window_secs must be greater than zero")]
    ZeroWindow,

    #[error("rate_limit.max_attempts must be greater than zero")]
    ZeroMaxAttempts,

    #[error("csrf.token_ttl_secs must be greater than zero")]
    ZeroTokenTtl,

    #[error("csrf.header_name must not be empty")]
    EmptyHeaderName,

    #[error("csrf.cookie_name must not be empty")]
    EmptyCookieName,
}

/// Validate a deserialized configuration, collecting every violation.
pub fn validate_config(config: &SecurityConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.rate_limit.window_secs == 0 {
        errors.push(ValidationError::ZeroWindow);
    }
    if config.rate_limit.max_attempts == 0 {
        errors.push(ValidationError::ZeroMaxAttempts);
    }
    if config.csrf.token_ttl_secs == 0 {
        errors.push(ValidationError::ZeroTokenTtl);
    }
    if config.csrf.header_name.trim().is_empty() {
        errors.push(ValidationError::EmptyHeaderName);
    }
    if config.csrf.cookie_name.trim().is_empty() {
        errors.push(ValidationError::EmptyCookieName);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
