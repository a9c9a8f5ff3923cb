//! Normalize-then-classify pipeline

mod logistic;
mod scaler;

pub use logistic::{sigmoid, FitSummary, LogisticRegression, SolverSettings};
pub use scaler::StandardScaler;

use crate::models::{Readiness, TrainingExample, NUM_FEATURES};
use serde::{Deserialize, Serialize};

/// Fitted scaler and classifier, persisted as one unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    pub scaler: StandardScaler,
    pub classifier: LogisticRegression,
}

/// Raw classifier output for one feature vector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub readiness: Readiness,
    pub probability_ready: f64,
}

impl Pipeline {
    /// Fit the scaler on the raw features, then the classifier on the
    /// scaled features.
    pub fn fit(
        examples: &[TrainingExample],
        settings: &SolverSettings,
    ) -> Result<(Self, FitSummary), String> {
        let raw: Vec<[f64; NUM_FEATURES]> = examples.iter().map(|e| e.features()).collect();
        let targets: Vec<f64> = examples.iter().map(|e| e.label.target()).collect();

        let scaler = StandardScaler::fit(&raw).ok_or_else(|| "no training examples".to_string())?;
        let scaled: Vec<_> = raw.iter().map(|r| scaler.transform(r)).collect();
        let (classifier, summary) = LogisticRegression::fit(&scaled, &targets, settings)?;

        Ok((Self { scaler, classifier }, summary))
    }

    /// Label is Ready iff the decision value is strictly positive
    pub fn classify(&self, features: &[f64; NUM_FEATURES]) -> Result<Classification, String> {
        let z = self.scaler.transform(features);
        let decision = self.classifier.decision_function(&z);
        if !decision.is_finite() {
            return Err(format!("non-finite decision value {}", decision));
        }
        let readiness = if decision > 0.0 {
            Readiness::Ready
        } else {
            Readiness::NotReady
        };
        Ok(Classification {
            readiness,
            probability_ready: sigmoid(decision),
        })
    }

    /// Fraction of examples the pipeline labels correctly
    pub fn accuracy(&self, examples: &[TrainingExample]) -> f64 {
        if examples.is_empty() {
            return 0.0;
        }
        let correct = examples
            .iter()
            .filter(|e| {
                self.classify(&e.features())
                    .map(|c| c.readiness == e.label)
                    .unwrap_or(false)
            })
            .count();
        correct as f64 / examples.len() as f64
    }

    /// Parameters in checksum order: mean, scale, weights, intercept
    pub fn parameters(&self) -> Vec<f64> {
        let mut params = Vec::with_capacity(3 * NUM_FEATURES + 1);
        params.extend_from_slice(&self.scaler.mean);
        params.extend_from_slice(&self.scaler.scale);
        params.extend_from_slice(&self.classifier.weights);
        params.push(self.classifier.intercept);
        params
    }

    pub fn validate(&self) -> Result<(), String> {
        self.scaler.validate()?;
        self.classifier.validate()
    }
}
