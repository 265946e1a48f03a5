//! Synthetic Request Workload Library
//!
//! Simulates request handling on a timer and tracks four runtime metrics
//! (request count, error count, last response time, derived error rate),
//! publishing them to a Prometheus registry served over HTTP for external
//! monitoring systems to scrape.
//!
//! # Architecture
//!
//! The system follows an explicit data flow:
//!
//! ```text
//! workload (cycle loop) → telemetry (shared counters) → export (HTTP scrape)
//! ```
//!
//! # Design Principles
//!
//! - **Single writer**: only the workload runner mutates the counters
//! - **Lock-free reads**: scrapes never block on the loop
//! - **Reproducible randomness**: seeded ChaCha20 drives the cycle plans
//! - **Run-until-cancelled**: the loop takes an explicit shutdown signal
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use std::time::Duration;
//! use worksim::{
//!     telemetry::WorkMetrics,
//!     workload::{
//!         CyclePlan, ScriptedCycleSource, ShutdownSignal, WorkloadConfig, WorkloadRunner,
//!     },
//! };
//!
//! let config = WorkloadConfig {
//!     cycle_interval_ms: 0,
//!     ..Default::default()
//! };
//!
//! let plans = vec![
//!     CyclePlan { work: Duration::ZERO, simulate_error: false },
//!     CyclePlan { work: Duration::ZERO, simulate_error: true },
//! ];
//!
//! let metrics = Arc::new(WorkMetrics::new());
//! let mut runner = WorkloadRunner::new(
//!     config,
//!     ScriptedCycleSource::new(plans),
//!     Arc::clone(&metrics),
//!     ShutdownSignal::new(),
//! );
//! runner.run_cycles(2);
//!
//! let snapshot = metrics.snapshot();
//! assert_eq!(snapshot.request_count, 2);
//! assert_eq!(snapshot.error_count, 1);
//! assert_eq!(snapshot.error_rate(), 50.0);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod export;
pub mod telemetry;
pub mod workload;

// Re-export commonly used types at crate root
pub use export::{MetricsExporter, MetricsServer, MetricsServerConfig};
pub use telemetry::{MetricsSnapshot, WorkMetrics};
pub use workload::{
    CyclePlan, CycleSource, RandomCycleSource, ScriptedCycleSource, ShutdownSignal,
    WorkloadConfig, WorkloadRunner,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
