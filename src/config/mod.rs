//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → SecurityConfig (validated, immutable)
//!     → shared via Arc to the security stores
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require restart
//! - All fields have defaults, so an empty file is a valid config
//! - Defaults match the platform's production limits (15-minute login
//!   window, 5 attempts, 1-hour CSRF token lifetime)
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::CsrfConfig;
pub use schema::RateLimitConfig;
pub use schema::SecurityConfig;
