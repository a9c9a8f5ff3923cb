//! Predictor configuration

use readiness_lib::ArtifactStore;
use serde::Deserialize;
use std::path::PathBuf;
use tracing::debug;

/// Predictor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct PredictorConfig {
    /// Model artifact written by the trainer
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,
}

fn default_artifact_path() -> PathBuf {
    ArtifactStore::default_path()
}

impl Default for PredictorConfig {
    fn default() -> Self {
        Self {
            artifact_path: default_artifact_path(),
        }
    }
}

impl PredictorConfig {
    /// Load from `READINESS_*` environment variables. Never fails; a broken
    /// environment falls back to defaults.
    pub fn load() -> Self {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("READINESS"))
            .build()
            .and_then(|c| c.try_deserialize())
            .unwrap_or_else(|e| {
                debug!(error = %e, "Invalid configuration, using defaults");
                Self::default()
            })
    }
}
