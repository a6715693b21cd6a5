//! Configuration and constants for the analysis tools.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Records per sequential read batch and per parallel aggregation chunk
pub const DEFAULT_CHUNK_CAPACITY: usize = 1024;

/// Upper bound on records per batch (16 MiB read buffer)
pub const MAX_CHUNK_CAPACITY: usize = 1 << 20;

/// Upper bound on the aggregation worker pool
pub const MAX_WORKERS: usize = 256;

/// Current frequency report schema version
pub const REPORT_VERSION: &str = "1.0.0";

/// Tunables shared by the analysis commands
///
/// Loaded from TOML, e.g.
/// ```toml
/// chunk_capacity = 4096
/// workers = 8
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// Records per read batch / chunk
    #[serde(default = "default_chunk_capacity")]
    pub chunk_capacity: usize,

    /// Aggregation workers (None = available parallelism)
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_chunk_capacity() -> usize {
    DEFAULT_CHUNK_CAPACITY
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            chunk_capacity: DEFAULT_CHUNK_CAPACITY,
            workers: None,
        }
    }
}

impl AnalysisConfig {
    /// Check that the values are usable
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.chunk_capacity == 0 || self.chunk_capacity > MAX_CHUNK_CAPACITY {
            return Err(ConfigError::Invalid(format!(
                "chunk_capacity must be between 1 and {} (got {})",
                MAX_CHUNK_CAPACITY, self.chunk_capacity
            )));
        }

        if let Some(workers) = self.workers {
            if workers == 0 || workers > MAX_WORKERS {
                return Err(ConfigError::Invalid(format!(
                    "workers must be between 1 and {} (got {})",
                    MAX_WORKERS, workers
                )));
            }
        }

        Ok(())
    }

    /// Worker count to actually use
    pub fn resolved_workers(&self) -> usize {
        self.workers.unwrap_or_else(|| {
            std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(1)
                .min(MAX_WORKERS)
        })
    }
}

/// Load analysis configuration from a TOML file
///
/// # Errors
/// * `ConfigError::ReadFailed` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If values are out of range
pub fn load_config(path: impl AsRef<Path>) -> Result<AnalysisConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AnalysisConfig = toml::from_str(&contents)?;
    config.validate()?;
    Ok(config)
}
