//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming sensitive request:
//!     → rate_limit.rs (bound attempts per client)
//!     → csrf.rs (verify per-session token on state-changing methods)
//!     → Pass to handlers
//! ```
//!
//! # Design Decisions
//! - Fail closed: reject on any security check failure
//! - No trust in client input
//! - All state is in-process and non-persistent; a multi-instance
//!   deployment needs an external store instead

pub mod csrf;
pub mod rate_limit;
