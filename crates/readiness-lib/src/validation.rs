//! Validation of raw, untrusted prediction arguments
//!
//! Runs before any model access. The bounds here match the domain of the
//! embedded training set so the classifier never extrapolates.

use crate::error::PredictError;
use crate::models::{Difficulty, ReadinessRequest};

/// Number of positional arguments a prediction takes
pub const EXPECTED_ARGS: usize = 2;

/// Inclusive lower bound for the average score
pub const MIN_SCORE: f64 = 0.0;

/// Inclusive upper bound for the average score
pub const MAX_SCORE: f64 = 10.0;

pub fn score_in_range(score: f64) -> bool {
    (MIN_SCORE..=MAX_SCORE).contains(&score)
}

/// Validate `[average_score, difficulty]` into a request
pub fn parse_request<S: AsRef<str>>(args: &[S]) -> Result<ReadinessRequest, PredictError> {
    if args.len() != EXPECTED_ARGS {
        return Err(PredictError::ArgumentCount { actual: args.len() });
    }

    let average_score = parse_score(args[0].as_ref())?;
    let level = parse_level(args[1].as_ref())?;

    if !score_in_range(average_score) {
        return Err(PredictError::Range {
            field: "average_score",
            value: average_score.to_string(),
            expected: "[0, 10]",
        });
    }

    let difficulty = Difficulty::from_level(level).ok_or_else(|| PredictError::Range {
        field: "difficulty",
        value: level.to_string(),
        expected: "{1, 2, 3}",
    })?;

    Ok(ReadinessRequest {
        average_score,
        difficulty,
    })
}

fn parse_score(raw: &str) -> Result<f64, PredictError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| PredictError::Parse {
            field: "average_score",
            raw: raw.to_string(),
        })
}

fn parse_level(raw: &str) -> Result<i64, PredictError> {
    raw.trim().parse::<i64>().map_err(|_| PredictError::Parse {
        field: "difficulty",
        raw: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(args: &[&str]) -> &'static str {
        parse_request(args).unwrap_err().kind()
    }

    #[test]
    fn test_valid_request() {
        let request = parse_request(&["9.0", "3"]).unwrap();
        assert_eq!(request.average_score, 9.0);
        assert_eq!(request.difficulty, Difficulty::Hard);

        let request = parse_request(&[" 7 ", "2\n"]).unwrap();
        assert_eq!(request.average_score, 7.0);
        assert_eq!(request.difficulty, Difficulty::Medium);
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(parse_request(&["0", "1"]).is_ok());
        assert!(parse_request(&["10", "3"]).is_ok());
        assert!(parse_request(&["10.0", "1"]).is_ok());
    }

    #[test]
    fn test_argument_count() {
        assert_eq!(kind(&[]), "argument_count");
        assert_eq!(kind(&["9.0"]), "argument_count");
        assert_eq!(kind(&["9.0", "3", "extra"]), "argument_count");
    }

    #[test]
    fn test_parse_failures() {
        assert_eq!(kind(&["", "2"]), "parse");
        assert_eq!(kind(&["abc", "2"]), "parse");
        assert_eq!(kind(&["NaN", "2"]), "parse");
        assert_eq!(kind(&["inf", "2"]), "parse");
        assert_eq!(kind(&["5.0", "2.5"]), "parse");
        assert_eq!(kind(&["5.0", "medium"]), "parse");
    }

    #[test]
    fn test_range_failures() {
        assert_eq!(kind(&["11.0", "2"]), "range");
        assert_eq!(kind(&["-0.5", "2"]), "range");
        assert_eq!(kind(&["10.01", "2"]), "range");
        assert_eq!(kind(&["7.0", "4"]), "range");
        assert_eq!(kind(&["7.0", "0"]), "range");
        assert_eq!(kind(&["7.0", "-1"]), "range");
    }

    #[test]
    fn test_parse_checked_before_range() {
        // An unparsable difficulty wins over an out-of-range score.
        assert_eq!(kind(&["42", "x"]), "parse");
    }
}
