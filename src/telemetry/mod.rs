//! Telemetry, tracing, and metrics for birdnav.
//!
//! - Structured logging via the `tracing` crate
//! - Timing and success counters for remote storage calls and CLI commands
//!
//! # Feature Flags
//!
//! - `telemetry` (default): metrics collection and timing debug lines
//! - `release-logs`: Strip debug/trace at compile time
//! - `max-perf`: Disable all tracing for maximum performance

mod init;
pub mod metrics;

pub use init::{init_telemetry, TelemetryConfig, TelemetryGuard};
pub use metrics::{Metrics, MetricsSnapshot, OperationMetrics, RemoteMetrics, GLOBAL_METRICS};
