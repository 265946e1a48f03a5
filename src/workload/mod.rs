//! Work simulation loop.
//!
//! This module drives the synthetic request cycles: each cycle sleeps
//! for a planned duration, optionally flags a simulated error, records
//! the outcome in the shared telemetry counters, and emits a status
//! line. Cycle planning sits behind a trait so tests can script exact
//! sequences instead of drawing from the seeded generator.

mod config;
mod runner;
mod shutdown;
mod source;

pub use config::{ConfigError, ExportConfig, FileConfig, WorkloadConfig};
pub use runner::WorkloadRunner;
pub use shutdown::ShutdownSignal;
pub use source::{CyclePlan, CycleSource, RandomCycleSource, ScriptedCycleSource};
