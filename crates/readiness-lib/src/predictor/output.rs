//! Prediction output formatting
//!
//! The wire format is a single `<label>,<confidence>` line. Failures are
//! always the literal `0,0`.

use crate::models::{Prediction, Readiness};
use std::fmt;
use std::str::FromStr;

/// Emitted for every failure, whatever its cause
pub const FAILURE_TOKEN: &str = "0,0";

/// Round P(ready) to a percentage with two decimals, half away from zero
pub fn confidence_percent(probability_ready: f64) -> f64 {
    (probability_ready * 100.0 * 100.0).round() / 100.0
}

/// One line of predictor output
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PredictionOutput {
    Success(Prediction),
    Failure,
}

impl PredictionOutput {
    pub fn label(&self) -> u8 {
        match self {
            PredictionOutput::Success(p) => p.readiness.label(),
            PredictionOutput::Failure => 0,
        }
    }

    pub fn confidence(&self) -> f64 {
        match self {
            PredictionOutput::Success(p) => p.confidence,
            PredictionOutput::Failure => 0.0,
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, PredictionOutput::Failure)
    }
}

impl fmt::Display for PredictionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PredictionOutput::Success(p) => write!(f, "{},{:.2}", p.readiness.label(), p.confidence),
            PredictionOutput::Failure => f.write_str(FAILURE_TOKEN),
        }
    }
}

/// Error parsing a predictor output line
#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("malformed prediction line: {0:?}")]
pub struct OutputParseError(pub String);

impl FromStr for PredictionOutput {
    type Err = OutputParseError;

    /// Parse a line as a host would read it off stdout
    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        if line == FAILURE_TOKEN {
            return Ok(PredictionOutput::Failure);
        }

        let malformed = || OutputParseError(line.to_string());
        let (label, confidence) = line.split_once(',').ok_or_else(malformed)?;

        let readiness = label
            .parse::<u8>()
            .ok()
            .and_then(Readiness::from_label)
            .ok_or_else(malformed)?;
        let confidence = confidence
            .parse::<f64>()
            .ok()
            .filter(|c| (0.0..=100.0).contains(c))
            .ok_or_else(malformed)?;

        Ok(PredictionOutput::Success(Prediction {
            readiness,
            probability_ready: confidence / 100.0,
            confidence,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn success(readiness: Readiness, probability_ready: f64) -> PredictionOutput {
        PredictionOutput::Success(Prediction {
            readiness,
            probability_ready,
            confidence: confidence_percent(probability_ready),
        })
    }

    #[test]
    fn test_confidence_rounding() {
        assert_eq!(confidence_percent(0.9787355304538026), 97.87);
        assert_eq!(confidence_percent(0.06204271414194612), 6.2);
        assert_eq!(confidence_percent(0.0), 0.0);
        assert_eq!(confidence_percent(1.0), 100.0);
        assert_eq!(confidence_percent(0.123456), 12.35);
        assert_eq!(confidence_percent(0.123449), 12.34);
    }

    #[test]
    fn test_success_line_has_two_decimals() {
        assert_eq!(success(Readiness::Ready, 0.9787355304538026).to_string(), "1,97.87");
        assert_eq!(success(Readiness::NotReady, 0.06204271414194612).to_string(), "0,6.20");
        assert_eq!(success(Readiness::Ready, 1.0).to_string(), "1,100.00");
    }

    #[test]
    fn test_failure_token() {
        assert_eq!(PredictionOutput::Failure.to_string(), "0,0");
        assert_eq!(PredictionOutput::Failure.label(), 0);
        assert_eq!(PredictionOutput::Failure.confidence(), 0.0);
    }

    #[test]
    fn test_parse_lines() {
        let parsed: PredictionOutput = "1,87.42\n".parse().unwrap();
        assert_eq!(parsed.label(), 1);
        assert_eq!(parsed.confidence(), 87.42);

        assert!("0,0".parse::<PredictionOutput>().unwrap().is_failure());
        assert!(!"0,0.00".parse::<PredictionOutput>().unwrap().is_failure());
    }

    #[test]
    fn test_parse_rejects_malformed() {
        for line in ["", "1", "2,50.00", "1,abc", "1,101.00", "1;50.00"] {
            assert!(line.parse::<PredictionOutput>().is_err(), "{:?} should not parse", line);
        }
    }
}
