//! Trainer configuration

use anyhow::{Context, Result};
use readiness_lib::{ArtifactStore, TrainingConfig};
use serde::Deserialize;
use std::path::PathBuf;

/// Trainer configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TrainerConfig {
    /// Where the fitted pipeline is written
    #[serde(default = "default_artifact_path")]
    pub artifact_path: PathBuf,

    /// Inverse L2 regularization strength
    #[serde(default = "default_regularization")]
    pub regularization: f64,

    /// Newton iteration cap
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,

    /// Convergence threshold on the largest parameter step
    #[serde(default = "default_tolerance")]
    pub tolerance: f64,
}

fn default_artifact_path() -> PathBuf {
    ArtifactStore::default_path()
}

fn default_regularization() -> f64 {
    TrainingConfig::default().regularization
}

fn default_max_iterations() -> usize {
    TrainingConfig::default().max_iterations
}

fn default_tolerance() -> f64 {
    TrainingConfig::default().tolerance
}

impl TrainerConfig {
    /// Load configuration from `READINESS_*` environment variables
    pub fn load() -> Result<Self> {
        let config = config::Config::builder()
            .add_source(config::Environment::with_prefix("READINESS"))
            .build()
            .context("Failed to read READINESS_* environment")?;

        config
            .try_deserialize()
            .context("Invalid trainer configuration")
    }

    pub fn training(&self) -> TrainingConfig {
        TrainingConfig {
            regularization: self.regularization,
            max_iterations: self.max_iterations,
            tolerance: self.tolerance,
        }
    }
}
