//! Prometheus metrics exporter.
//!
//! This module publishes the workload counters to an external monitoring
//! system by exposing them in Prometheus format via an HTTP endpoint.
//! The exporter is passive: it holds no state of its own beyond the
//! registered collectors and refreshes them from a counter snapshot on
//! every scrape.
//!
//! # Metrics Exposed
//!
//! - `worksim_requests_total` - Completed work cycles
//! - `worksim_errors_total` - Cycles flagged as simulated errors
//! - `worksim_last_response_time_ms` - Duration of the most recent cycle
//! - `worksim_error_rate_percent` - Share of cycles flagged as errors
//!
//! # Example
//!
//! ```
//! use worksim::export::MetricsExporter;
//! use worksim::telemetry::MetricsSnapshot;
//!
//! let exporter = MetricsExporter::new().expect("Failed to register metrics");
//!
//! let snapshot = MetricsSnapshot {
//!     request_count: 10,
//!     error_count: 2,
//!     last_response_time_ms: 57,
//! };
//! exporter.update(&snapshot);
//!
//! let output = exporter.encode().unwrap();
//! assert!(output.contains("worksim_requests_total 10"));
//! ```

mod registry;
mod server;

pub use registry::{ExportError, MetricsExporter, METRICS_NAMESPACE};
pub use server::{MetricsServer, MetricsServerConfig, ServerError};
