//! Workload configuration.
//!
//! The work duration range and the error draw are fixed at startup so
//! seeded runs reproduce the same cycle sequence.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the work simulation loop.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkloadConfig {
    /// Minimum simulated work duration in milliseconds (inclusive).
    pub min_work_ms: u64,
    /// Maximum simulated work duration in milliseconds (exclusive).
    pub max_work_ms: u64,
    /// Width of the error draw: one cycle in `error_window` is flagged
    /// as a simulated error.
    pub error_window: u64,
    /// Pause between cycles in milliseconds (0 disables pacing).
    pub cycle_interval_ms: u64,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        Self {
            min_work_ms: 10,
            max_work_ms: 110,
            error_window: 10, // 1-in-10 cycles
            cycle_interval_ms: 2000,
        }
    }
}

impl WorkloadConfig {
    /// Validates the configuration parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_work_ms >= self.max_work_ms {
            return Err(ConfigError::InvalidWorkRange);
        }
        if self.error_window == 0 {
            return Err(ConfigError::InvalidErrorWindow);
        }
        Ok(())
    }
}

/// Configuration validation errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("work duration range is empty (min_work_ms must be below max_work_ms)")]
    InvalidWorkRange,
    #[error("error window must be at least 1")]
    InvalidErrorWindow,
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Metrics export configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    /// Port for the metrics HTTP server.
    pub port: u16,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { port: 9090 }
    }
}

/// Full configuration file format.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// `[workload]` section.
    #[serde(default)]
    pub workload: WorkloadConfig,
    /// `[export]` section.
    #[serde(default)]
    pub export: ExportConfig,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.workload.validate()?;
        Ok(config)
    }
}
