//! Learner readiness classification library
//!
//! This crate provides the core functionality for:
//! - The embedded reference training set
//! - A standard-scaler + logistic-regression pipeline
//! - Versioned, checksummed model artifacts
//! - Input validation and total (never failing) prediction
//! - Structured logging helpers

pub mod artifact;
pub mod dataset;
pub mod error;
pub mod models;
pub mod observability;
pub mod pipeline;
pub mod predictor;
pub mod trainer;
pub mod validation;

pub use artifact::{ArtifactMetadata, ArtifactStore, ModelArtifact, ARTIFACT_FORMAT_VERSION};
pub use error::{ArtifactError, PredictError, Stage, TrainError};
pub use models::*;
pub use observability::ReadinessLogger;
pub use predictor::{PredictionOutput, ReadinessPredictor, FAILURE_TOKEN};
pub use trainer::{Trainer, TrainingConfig, TrainingReport};
