//! Shared runtime counters.
//!
//! This module holds the metrics entity shared between the workload
//! runner (the single writer) and the exporter scrape handlers
//! (arbitrary concurrent readers). All fields are atomics; reads never
//! block the loop and the loop never blocks a scrape.

mod counters;

pub use counters::{MetricsSnapshot, WorkMetrics};
