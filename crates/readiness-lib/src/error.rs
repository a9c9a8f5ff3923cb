//! Error types for training and prediction

use std::path::PathBuf;

/// Stage of a prediction at which it failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Validating,
    Loading,
    Predicting,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Validating => "validating",
            Stage::Loading => "loading",
            Stage::Predicting => "predicting",
        }
    }
}

/// Everything that can go wrong between raw arguments and a prediction.
///
/// None of these reach the caller of the predict binary; they are logged
/// and collapsed to the failure token.
#[derive(thiserror::Error, Debug)]
pub enum PredictError {
    #[error("expected 2 arguments, got {actual}")]
    ArgumentCount { actual: usize },

    #[error("cannot parse {field} from {raw:?}")]
    Parse { field: &'static str, raw: String },

    #[error("{field} {value} outside accepted range {expected}")]
    Range {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("artifact error: {0}")]
    Artifact(#[from] ArtifactError),

    #[error("prediction error: {0}")]
    Prediction(String),
}

impl PredictError {
    /// Short machine-readable kind, used as a log field
    pub fn kind(&self) -> &'static str {
        match self {
            PredictError::ArgumentCount { .. } => "argument_count",
            PredictError::Parse { .. } => "parse",
            PredictError::Range { .. } => "range",
            PredictError::Artifact(_) => "artifact",
            PredictError::Prediction(_) => "prediction",
        }
    }

    pub fn stage(&self) -> Stage {
        match self {
            PredictError::ArgumentCount { .. }
            | PredictError::Parse { .. }
            | PredictError::Range { .. } => Stage::Validating,
            PredictError::Artifact(_) => Stage::Loading,
            PredictError::Prediction(_) => Stage::Predicting,
        }
    }
}

/// Failures reading or writing a model artifact
#[derive(thiserror::Error, Debug)]
pub enum ArtifactError {
    #[error("model artifact not found: {}", .0.display())]
    Missing(PathBuf),

    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed artifact: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unsupported artifact format version {found}, expected {expected}")]
    UnsupportedVersion { found: u32, expected: u32 },

    #[error("checksum mismatch: expected {expected}, got {actual}")]
    ChecksumMismatch { expected: String, actual: String },

    #[error("invalid pipeline parameters: {0}")]
    InvalidParameters(String),
}

/// Failures while fitting or persisting the pipeline
#[derive(thiserror::Error, Debug)]
pub enum TrainError {
    #[error("fit failed: {0}")]
    Fit(String),

    #[error(transparent)]
    Artifact(#[from] ArtifactError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages() {
        assert_eq!(PredictError::ArgumentCount { actual: 1 }.stage(), Stage::Validating);
        assert_eq!(
            PredictError::Artifact(ArtifactError::Missing(PathBuf::from("m.json"))).stage(),
            Stage::Loading
        );
        assert_eq!(PredictError::Prediction("nan".into()).stage(), Stage::Predicting);
    }

    #[test]
    fn test_messages() {
        let err = PredictError::Range {
            field: "difficulty",
            value: "4".into(),
            expected: "{1, 2, 3}",
        };
        assert_eq!(err.kind(), "range");
        assert_eq!(err.to_string(), "difficulty 4 outside accepted range {1, 2, 3}");
    }
}
