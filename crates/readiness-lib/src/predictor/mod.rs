//! Single-shot readiness prediction
//!
//! Each call validates the raw arguments, loads the artifact fresh from
//! disk and classifies. `predict` exposes the typed error; `respond` is the
//! total boundary that logs any failure and turns it into the failure token.

mod output;

pub use output::{confidence_percent, OutputParseError, PredictionOutput, FAILURE_TOKEN};

use crate::artifact::ArtifactStore;
use crate::error::{PredictError, Stage};
use crate::models::Prediction;
use crate::observability::ReadinessLogger;
use crate::validation::parse_request;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;
use tracing::debug;

/// Predictor bound to one artifact location
pub struct ReadinessPredictor {
    store: ArtifactStore,
    logger: ReadinessLogger,
}

impl ReadinessPredictor {
    pub fn new(store: ArtifactStore) -> Self {
        Self {
            store,
            logger: ReadinessLogger::new("predictor"),
        }
    }

    /// Validate, load and classify
    pub fn predict<S: AsRef<str>>(&self, args: &[S]) -> Result<Prediction, PredictError> {
        let start = Instant::now();

        let request = parse_request(args)?;
        debug!(
            stage = Stage::Loading.as_str(),
            average_score = request.average_score,
            difficulty = %request.difficulty,
            "Input validated"
        );

        let artifact = self.store.load()?;

        let classification = artifact
            .pipeline
            .classify(&request.features())
            .map_err(PredictError::Prediction)?;

        let confidence = confidence_percent(classification.probability_ready);
        if !(0.0..=100.0).contains(&confidence) {
            return Err(PredictError::Prediction(format!(
                "confidence {} outside [0, 100]",
                confidence
            )));
        }

        let prediction = Prediction {
            readiness: classification.readiness,
            probability_ready: classification.probability_ready,
            confidence,
        };
        self.logger.log_prediction(&request, &prediction, start.elapsed());
        Ok(prediction)
    }

    /// Never fails: any error or panic becomes the failure token
    pub fn respond<S: AsRef<str>>(&self, args: &[S]) -> PredictionOutput {
        let result = panic::catch_unwind(AssertUnwindSafe(|| self.predict(args)))
            .unwrap_or_else(|_| Err(PredictError::Prediction("internal panic".to_string())));

        match result {
            Ok(prediction) => PredictionOutput::Success(prediction),
            Err(e) => {
                self.logger.log_prediction_failed(&e);
                PredictionOutput::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{ArtifactMetadata, ModelArtifact};
    use crate::dataset::reference_examples;
    use crate::models::Readiness;
    use crate::pipeline::{Pipeline, SolverSettings};
    use tempfile::TempDir;

    fn trained_predictor(dir: &TempDir) -> ReadinessPredictor {
        let store = ArtifactStore::new(dir.path().join("model.json"));
        let (pipeline, _) = Pipeline::fit(reference_examples(), &SolverSettings::default()).unwrap();
        store
            .save(&ModelArtifact::new(pipeline, ArtifactMetadata::new(15, 0.93)))
            .unwrap();
        ReadinessPredictor::new(store)
    }

    #[test]
    fn test_predict_ready() {
        let dir = TempDir::new().unwrap();
        let predictor = trained_predictor(&dir);

        let prediction = predictor.predict(&["9.0", "3"]).unwrap();
        assert_eq!(prediction.readiness, Readiness::Ready);
        assert_eq!(prediction.confidence, 97.87);
    }

    #[test]
    fn test_confidence_is_probability_of_ready() {
        let dir = TempDir::new().unwrap();
        let predictor = trained_predictor(&dir);

        // Not ready, so the confidence is the low P(ready), not P(predicted)
        let prediction = predictor.predict(&["3.0", "1"]).unwrap();
        assert_eq!(prediction.readiness, Readiness::NotReady);
        assert_eq!(prediction.confidence, 6.2);
    }

    #[test]
    fn test_validation_runs_before_loading() {
        let dir = TempDir::new().unwrap();
        let predictor = ReadinessPredictor::new(ArtifactStore::new(dir.path().join("absent.json")));

        let err = predictor.predict(&["11.0", "2"]).unwrap_err();
        assert_eq!(err.stage(), Stage::Validating);

        let err = predictor.predict(&["9.0", "3"]).unwrap_err();
        assert_eq!(err.stage(), Stage::Loading);
    }

    #[test]
    fn test_respond_collapses_errors() {
        let dir = TempDir::new().unwrap();
        let predictor = trained_predictor(&dir);

        assert_eq!(predictor.respond(&["9.0", "3"]).to_string(), "1,97.87");
        assert_eq!(predictor.respond(&["7.0", "4"]).to_string(), FAILURE_TOKEN);
        assert_eq!(predictor.respond(&["9.0"]).to_string(), FAILURE_TOKEN);
        assert_eq!(predictor.respond::<&str>(&[]).to_string(), FAILURE_TOKEN);
    }
}
