//! Core data models for readiness classification

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of features the pipeline consumes
pub const NUM_FEATURES: usize = 2;

/// Positional feature names, in the order they enter the pipeline
pub const FEATURE_NAMES: [&str; NUM_FEATURES] = ["average_score", "difficulty_level"];

/// Ordinal difficulty level of the assessed material
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Difficulty {
    Easy = 1,
    Medium = 2,
    Hard = 3,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Map a raw level onto the closed set {1, 2, 3}
    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Difficulty::Easy),
            2 => Some(Difficulty::Medium),
            3 => Some(Difficulty::Hard),
            _ => None,
        }
    }

    pub fn level(self) -> i64 {
        self as i64
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = String;

    fn try_from(level: i64) -> Result<Self, Self::Error> {
        Difficulty::from_level(level).ok_or_else(|| format!("difficulty level {} not in 1..=3", level))
    }
}

impl From<Difficulty> for i64 {
    fn from(difficulty: Difficulty) -> Self {
        difficulty.level()
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Binary readiness class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Readiness {
    NotReady,
    Ready,
}

impl Readiness {
    /// Numeric class label as written on the wire (0 or 1)
    pub fn label(self) -> u8 {
        match self {
            Readiness::NotReady => 0,
            Readiness::Ready => 1,
        }
    }

    pub fn from_label(label: u8) -> Option<Self> {
        match label {
            0 => Some(Readiness::NotReady),
            1 => Some(Readiness::Ready),
            _ => None,
        }
    }

    /// Regression target for the classifier
    pub fn target(self) -> f64 {
        f64::from(self.label())
    }
}

/// One labeled training example
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainingExample {
    pub average_score: f64,
    pub difficulty: Difficulty,
    pub label: Readiness,
}

impl TrainingExample {
    pub const fn new(average_score: f64, difficulty: Difficulty, label: Readiness) -> Self {
        Self {
            average_score,
            difficulty,
            label,
        }
    }

    pub fn features(&self) -> [f64; NUM_FEATURES] {
        feature_vector(self.average_score, self.difficulty)
    }
}

/// A validated inference request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReadinessRequest {
    pub average_score: f64,
    pub difficulty: Difficulty,
}

impl ReadinessRequest {
    /// Feature vector in the fixed `[average_score, difficulty]` order
    pub fn features(&self) -> [f64; NUM_FEATURES] {
        feature_vector(self.average_score, self.difficulty)
    }
}

/// Outcome of a successful inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub readiness: Readiness,
    /// Probability of the ready class, 0.0-1.0
    pub probability_ready: f64,
    /// P(ready) as a percentage rounded to two decimals
    pub confidence: f64,
}

fn feature_vector(average_score: f64, difficulty: Difficulty) -> [f64; NUM_FEATURES] {
    [average_score, difficulty.level() as f64]
}
