//! Engine configuration for docrank
//!
//! Configuration is stored in `.docrank/config.toml`. Every field has a
//! default, so partial files load cleanly.

pub mod types;

use std::fs;
use std::path::Path;

use chrono::Duration;
use tracing::debug;

use crate::error::{DocrankError, Result};
use crate::metrics::MetricSet;

pub use types::{
    CacheSettings, EngineConfig, RecommendationSettings, SimilaritySettings,
    WORKSPACE_FORMAT_VERSION,
};

impl EngineConfig {
    /// Load configuration from a file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let mut config: EngineConfig = toml::from_str(&content)?;

        if config.version > WORKSPACE_FORMAT_VERSION {
            return Err(DocrankError::InvalidStore {
                reason: format!(
                    "config version {} is newer than supported version {}",
                    config.version, WORKSPACE_FORMAT_VERSION
                ),
            });
        }

        config.normalize_metrics();
        Ok(config)
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DocrankError::Other(format!("failed to serialize config: {}", e)))?;
        fs::write(path, content)?;
        Ok(())
    }

    /// The configured metrics as a normalized set
    pub fn metric_set(&self) -> MetricSet {
        MetricSet::from_metrics(self.metrics.clone())
    }

    /// Replace the metrics with an already-normalized set
    pub fn set_metric_set(&mut self, metrics: &MetricSet) {
        self.metrics = metrics.as_slice().to_vec();
    }

    /// Repair ids and weights in place
    pub fn normalize_metrics(&mut self) {
        let set = self.metric_set();
        self.set_metric_set(&set);
    }
}

impl CacheSettings {
    pub fn default_ttl(&self) -> Duration {
        Duration::seconds(self.default_ttl_secs.max(0))
    }

    pub fn content_ttl(&self) -> Duration {
        Duration::seconds(self.content_ttl_secs.max(0))
    }

    pub fn vector_ttl(&self) -> Duration {
        Duration::seconds(self.vector_ttl_secs.max(0))
    }
}
