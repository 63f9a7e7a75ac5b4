//! Observability subsystem.
//!
//! # Design Decisions
//! - Structured logging via tracing; the hosting application installs
//!   the subscriber
//! - Metrics are cheap (atomic increments behind the metrics facade);
//!   the hosting application installs the recorder/exporter

pub mod metrics;
