//! Pipeline training
//!
//! Fits the scaler and classifier on a labeled set and writes the result
//! through an [`ArtifactStore`]. Errors surface to the operator unchanged.

use crate::artifact::{ArtifactMetadata, ArtifactStore, ModelArtifact};
use crate::error::TrainError;
use crate::models::TrainingExample;
use crate::observability::ReadinessLogger;
use crate::pipeline::{Pipeline, SolverSettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Training hyperparameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    /// Inverse L2 regularization strength
    pub regularization: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        let solver = SolverSettings::default();
        Self {
            regularization: solver.regularization,
            max_iterations: solver.max_iterations,
            tolerance: solver.tolerance,
        }
    }
}

impl From<TrainingConfig> for SolverSettings {
    fn from(config: TrainingConfig) -> Self {
        Self {
            regularization: config.regularization,
            max_iterations: config.max_iterations,
            tolerance: config.tolerance,
        }
    }
}

/// Summary of a completed training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub artifact_path: PathBuf,
    pub checksum: String,
    pub examples: usize,
    pub training_accuracy: f64,
    pub iterations: usize,
    pub converged: bool,
}

pub struct Trainer {
    config: TrainingConfig,
    logger: ReadinessLogger,
}

impl Trainer {
    pub fn new(config: TrainingConfig) -> Self {
        Self {
            config,
            logger: ReadinessLogger::new("trainer"),
        }
    }

    /// Fit the pipeline and package it as an artifact
    pub fn train(&self, examples: &[TrainingExample]) -> Result<(ModelArtifact, TrainingReport), TrainError> {
        let (pipeline, summary) =
            Pipeline::fit(examples, &self.config.into()).map_err(TrainError::Fit)?;
        pipeline.validate().map_err(TrainError::Fit)?;

        let training_accuracy = pipeline.accuracy(examples);
        let artifact = ModelArtifact::new(
            pipeline,
            ArtifactMetadata::new(examples.len(), training_accuracy),
        );

        let report = TrainingReport {
            artifact_path: PathBuf::new(),
            checksum: artifact.checksum.clone(),
            examples: examples.len(),
            training_accuracy,
            iterations: summary.iterations,
            converged: summary.converged,
        };
        self.logger.log_training_complete(&report);

        Ok((artifact, report))
    }

    /// Fit and write the artifact, replacing any previous one
    pub fn train_and_save(
        &self,
        examples: &[TrainingExample],
        store: &ArtifactStore,
    ) -> Result<TrainingReport, TrainError> {
        let (artifact, mut report) = self.train(examples)?;
        store.save(&artifact)?;
        self.logger.log_artifact_saved(store.path(), &artifact.checksum);

        report.artifact_path = store.path().to_path_buf();
        Ok(report)
    }
}

impl Default for Trainer {
    fn default() -> Self {
        Self::new(TrainingConfig::default())
    }
}
