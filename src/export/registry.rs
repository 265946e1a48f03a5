//! Collector registration and encoding.

use crate::telemetry::MetricsSnapshot;
use prometheus::{Encoder, Gauge, IntCounter, IntGauge, Opts, Registry, TextEncoder};
use thiserror::Error;

/// Fixed namespace under which the workload metrics are registered.
pub const METRICS_NAMESPACE: &str = "worksim";

/// Errors that can occur during metrics operations.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("prometheus error: {0}")]
    Prometheus(#[from] prometheus::Error),
}

/// Prometheus exporter for the workload metrics.
///
/// Registers the four workload collectors under [`METRICS_NAMESPACE`].
/// Registration happens once at startup, before the workload loop
/// begins; a collision with an already-registered collector is an error
/// the caller treats as fatal.
pub struct MetricsExporter {
    registry: Registry,

    requests_total: IntCounter,
    errors_total: IntCounter,
    last_response_time_ms: IntGauge,
    error_rate_percent: Gauge,
}

impl MetricsExporter {
    /// Creates a registry and registers the workload collectors in it.
    pub fn new() -> Result<Self, ExportError> {
        Self::register(Registry::new())
    }

    /// Registers the workload collectors into an existing registry.
    ///
    /// Registering a second exporter into the same registry fails with
    /// a duplicate-collector error.
    pub fn register(registry: Registry) -> Result<Self, ExportError> {
        let requests_total = IntCounter::with_opts(
            Opts::new("requests_total", "Completed work cycles").namespace(METRICS_NAMESPACE),
        )?;
        let errors_total = IntCounter::with_opts(
            Opts::new("errors_total", "Cycles flagged as simulated errors")
                .namespace(METRICS_NAMESPACE),
        )?;
        let last_response_time_ms = IntGauge::with_opts(
            Opts::new(
                "last_response_time_ms",
                "Duration of the most recent cycle in milliseconds",
            )
            .namespace(METRICS_NAMESPACE),
        )?;
        let error_rate_percent = Gauge::with_opts(
            Opts::new(
                "error_rate_percent",
                "Share of cycles flagged as errors (0-100)",
            )
            .namespace(METRICS_NAMESPACE),
        )?;

        registry.register(Box::new(requests_total.clone()))?;
        registry.register(Box::new(errors_total.clone()))?;
        registry.register(Box::new(last_response_time_ms.clone()))?;
        registry.register(Box::new(error_rate_percent.clone()))?;

        Ok(Self {
            registry,
            requests_total,
            errors_total,
            last_response_time_ms,
            error_rate_percent,
        })
    }

    /// Updates all collectors from a counter snapshot.
    ///
    /// Counters advance by the difference since the previous update;
    /// gauges are set outright.
    pub fn update(&self, snapshot: &MetricsSnapshot) {
        let current = self.requests_total.get();
        if snapshot.request_count > current {
            self.requests_total.inc_by(snapshot.request_count - current);
        }

        let current = self.errors_total.get();
        if snapshot.error_count > current {
            self.errors_total.inc_by(snapshot.error_count - current);
        }

        self.last_response_time_ms
            .set(snapshot.last_response_time_ms as i64);
        self.error_rate_percent.set(snapshot.error_rate());
    }

    /// Returns the underlying Prometheus registry.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Encodes all metrics in Prometheus text format.
    pub fn encode(&self) -> Result<String, ExportError> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}
