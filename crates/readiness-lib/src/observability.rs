//! Structured logging for training and prediction events
//!
//! Events carry an `event` field plus typed key/value pairs so the JSON
//! output of the binaries can be filtered without parsing messages.

use crate::error::PredictError;
use crate::models::{Prediction, ReadinessRequest};
use crate::trainer::TrainingReport;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Structured logger for readiness events
#[derive(Clone)]
pub struct ReadinessLogger {
    component: String,
}

impl ReadinessLogger {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
        }
    }

    /// Log a successful prediction
    pub fn log_prediction(&self, request: &ReadinessRequest, prediction: &Prediction, elapsed: Duration) {
        info!(
            event = "prediction_generated",
            component = %self.component,
            average_score = request.average_score,
            difficulty = request.difficulty.level(),
            label = prediction.readiness.label(),
            confidence = prediction.confidence,
            elapsed_us = elapsed.as_micros() as u64,
            "Generated readiness prediction"
        );
    }

    /// Log a failure that is about to be collapsed to the failure token
    pub fn log_prediction_failed(&self, error: &PredictError) {
        match error {
            PredictError::Artifact(_) | PredictError::Prediction(_) => warn!(
                event = "prediction_failed",
                component = %self.component,
                kind = error.kind(),
                stage = error.stage().as_str(),
                error = %error,
                "Prediction failed, emitting failure token"
            ),
            _ => debug!(
                event = "prediction_rejected",
                component = %self.component,
                kind = error.kind(),
                stage = error.stage().as_str(),
                error = %error,
                "Input rejected, emitting failure token"
            ),
        }
    }

    /// Log the end of a training run
    pub fn log_training_complete(&self, report: &TrainingReport) {
        if report.converged {
            info!(
                event = "training_complete",
                component = %self.component,
                examples = report.examples,
                training_accuracy = report.training_accuracy,
                iterations = report.iterations,
                "Pipeline fitted"
            );
        } else {
            warn!(
                event = "training_complete",
                component = %self.component,
                examples = report.examples,
                training_accuracy = report.training_accuracy,
                iterations = report.iterations,
                "Solver hit the iteration limit before converging"
            );
        }
    }

    /// Log an artifact write
    pub fn log_artifact_saved(&self, path: &Path, checksum: &str) {
        info!(
            event = "artifact_saved",
            component = %self.component,
            path = %path.display(),
            checksum = %checksum,
            "Model artifact written"
        );
    }
}
