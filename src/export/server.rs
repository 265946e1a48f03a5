//! HTTP server for the Prometheus metrics endpoint.

use super::MetricsExporter;
use crate::telemetry::WorkMetrics;
use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::CorsLayer;

/// Errors that can occur during metrics server operations.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind to address: {0}")]
    Bind(#[from] std::io::Error),

    #[error("server error: {0}")]
    Server(String),
}

/// Configuration for the metrics server.
#[derive(Debug, Clone)]
pub struct MetricsServerConfig {
    /// Address to bind the server to.
    pub bind_addr: SocketAddr,
}

impl Default for MetricsServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], 9090).into(),
        }
    }
}

impl MetricsServerConfig {
    /// Creates a config with a custom port.
    pub fn with_port(port: u16) -> Self {
        Self {
            bind_addr: ([0, 0, 0, 0], port).into(),
        }
    }
}

/// Shared state for the scrape handlers.
struct ExporterState {
    exporter: MetricsExporter,
    metrics: Arc<WorkMetrics>,
}

/// HTTP server exposing the workload metrics to scrapers.
pub struct MetricsServer {
    config: MetricsServerConfig,
    state: Arc<ExporterState>,
}

impl MetricsServer {
    /// Creates a new metrics server over the shared counters.
    pub fn new(
        config: MetricsServerConfig,
        exporter: MetricsExporter,
        metrics: Arc<WorkMetrics>,
    ) -> Self {
        Self {
            config,
            state: Arc::new(ExporterState { exporter, metrics }),
        }
    }

    /// Starts the HTTP server.
    ///
    /// This method runs the server until it is shut down.
    pub async fn run(self) -> Result<(), ServerError> {
        let app = Router::new()
            .route("/metrics", get(metrics_handler))
            .route("/health", get(health_handler))
            .layer(CorsLayer::permissive())
            .with_state(self.state);

        let listener = tokio::net::TcpListener::bind(self.config.bind_addr).await?;

        tracing::info!(
            addr = %self.config.bind_addr,
            "Metrics server listening"
        );

        axum::serve(listener, app)
            .await
            .map_err(|e| ServerError::Server(e.to_string()))?;

        Ok(())
    }
}

/// Handler for the /metrics endpoint.
///
/// Refreshes the collectors from a live counter snapshot so scrapers
/// always see current values, then returns the text exposition.
async fn metrics_handler(State(state): State<Arc<ExporterState>>) -> impl IntoResponse {
    state.exporter.update(&state.metrics.snapshot());

    match state.exporter.encode() {
        Ok(output) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            output,
        ),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [("content-type", "text/plain; charset=utf-8")],
            format!("Failed to encode metrics: {}", e),
        ),
    }
}

/// Handler for the /health endpoint.
async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = MetricsServerConfig::default();
        assert_eq!(config.bind_addr.port(), 9090);
    }

    #[test]
    fn test_config_with_port() {
        let config = MetricsServerConfig::with_port(8080);
        assert_eq!(config.bind_addr.port(), 8080);
    }

    #[tokio::test]
    async fn test_scrape_sees_live_counters() {
        let metrics = Arc::new(WorkMetrics::new());
        metrics.record_cycle(31, true);
        metrics.record_cycle(12, false);

        let state = Arc::new(ExporterState {
            exporter: MetricsExporter::new().unwrap(),
            metrics: Arc::clone(&metrics),
        });

        let response = metrics_handler(State(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let output = String::from_utf8(body.to_vec()).unwrap();

        assert!(output.contains("worksim_requests_total 2"));
        assert!(output.contains("worksim_errors_total 1"));
        assert!(output.contains("worksim_last_response_time_ms 12"));
        assert!(output.contains("worksim_error_rate_percent 50"));
    }

    #[tokio::test]
    async fn test_health_endpoint_is_ok() {
        let response = health_handler().await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
