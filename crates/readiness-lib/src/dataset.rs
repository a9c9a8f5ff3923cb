//! Embedded reference training set
//!
//! Features are `[average_score (0-10), difficulty (1-3)]`; labels are
//! 0 = not ready, 1 = ready.

use crate::models::{Difficulty, Readiness, TrainingExample};

use Difficulty::{Easy, Hard, Medium};
use Readiness::{NotReady, Ready};

/// The 15 labeled examples the shipped model is fit on
pub const REFERENCE_EXAMPLES: [TrainingExample; 15] = [
    TrainingExample::new(3.0, Easy, NotReady),
    TrainingExample::new(4.5, Easy, NotReady),
    TrainingExample::new(5.0, Medium, NotReady),
    TrainingExample::new(6.0, Medium, Ready),
    TrainingExample::new(6.5, Medium, Ready),
    TrainingExample::new(7.0, Medium, Ready),
    TrainingExample::new(7.5, Hard, Ready),
    TrainingExample::new(8.0, Hard, Ready),
    TrainingExample::new(8.5, Hard, Ready),
    TrainingExample::new(9.0, Hard, Ready),
    TrainingExample::new(4.0, Easy, NotReady),
    TrainingExample::new(5.5, Medium, NotReady),
    TrainingExample::new(6.8, Medium, Ready),
    TrainingExample::new(7.2, Hard, Ready),
    TrainingExample::new(9.5, Hard, Ready),
];

pub fn reference_examples() -> &'static [TrainingExample] {
    &REFERENCE_EXAMPLES
}
