//! Arithmetic progression validation, next-term prediction, and echo history.
//!
//! # Example
//!
//! ```rust
//! use echo_chamber::predictor::SequencePredictor;
//!
//! let mut predictor = SequencePredictor::new();
//!
//! let result = predictor.predict(&[3.0, 6.0, 9.0, 12.0]);
//! assert_eq!(result.prediction(), Some(15.0));
//! assert_eq!(result.common_difference(), Some(3.0));
//!
//! // Rejected sequences leave the history untouched
//! assert!(!predictor.predict(&[1.0, 2.0, 4.0, 8.0]).is_success());
//! assert_eq!(predictor.count(), 1);
//!
//! assert_eq!(predictor.clear(), 1);
//! assert_eq!(predictor.count(), 0);
//! ```
//!
//! Differences are compared with exact equality. Float sequences whose
//! deltas pick up rounding error (`0.1, 0.2, 0.3`) are rejected. A difference
//! or prediction that overflows `f64` is reported as
//! [`SequenceError::NumericOverflow`] and never recorded.

use crate::error::{SequenceError, MIN_SEQUENCE_LEN};
use crate::sequence;
use chrono::{DateTime, Local};
use serde::Serialize;
use serde_json::Value;

/// Outcome of [`SequencePredictor::validate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ValidationResult {
    /// The sequence is an arithmetic progression.
    Valid {
        common_difference: f64,
        /// Consecutive deltas, one fewer than the sequence length.
        differences: Vec<f64>,
    },
    /// The sequence was rejected.
    Invalid { error: SequenceError },
}

impl ValidationResult {
    /// Returns true for [`ValidationResult::Valid`].
    #[must_use]
    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid { .. })
    }

    /// The rejection reason, if any.
    #[must_use]
    pub fn error(&self) -> Option<&SequenceError> {
        match self {
            Self::Valid { .. } => None,
            Self::Invalid { error } => Some(error),
        }
    }

    /// Human readable summary.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Valid { .. } => "Valid arithmetic progression detected!".to_string(),
            Self::Invalid { error } => error.to_string(),
        }
    }
}

impl From<Result<(f64, Vec<f64>), SequenceError>> for ValidationResult {
    fn from(result: Result<(f64, Vec<f64>), SequenceError>) -> Self {
        match result {
            Ok((common_difference, differences)) => Self::Valid {
                common_difference,
                differences,
            },
            Err(error) => Self::Invalid { error },
        }
    }
}

/// Outcome of [`SequencePredictor::predict`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PredictionResult {
    /// The next term was predicted and an echo recorded.
    Success {
        sequence: Vec<f64>,
        common_difference: f64,
        prediction: f64,
    },
    /// Validation failed; nothing was recorded.
    Failure { error: SequenceError },
}

impl PredictionResult {
    /// Returns true for [`PredictionResult::Success`].
    #[must_use]
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// The predicted next term.
    #[must_use]
    pub fn prediction(&self) -> Option<f64> {
        match self {
            Self::Success { prediction, .. } => Some(*prediction),
            Self::Failure { .. } => None,
        }
    }

    /// The common difference of a successful prediction.
    #[must_use]
    pub fn common_difference(&self) -> Option<f64> {
        match self {
            Self::Success {
                common_difference, ..
            } => Some(*common_difference),
            Self::Failure { .. } => None,
        }
    }

    /// The validation error behind a failure.
    #[must_use]
    pub fn error(&self) -> Option<&SequenceError> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    /// Human readable summary. For failures this is the validation
    /// message unchanged.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Success { prediction, .. } => {
                format!("The next number in the sequence is: {prediction}")
            }
            Self::Failure { error } => error.to_string(),
        }
    }
}

/// Immutable record of one successful prediction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Echo {
    timestamp: DateTime<Local>,
    sequence: Vec<f64>,
    common_difference: f64,
    prediction: f64,
}

impl Echo {
    pub(crate) fn recorded_at(
        timestamp: DateTime<Local>,
        sequence: Vec<f64>,
        common_difference: f64,
        prediction: f64,
    ) -> Self {
        Self {
            timestamp,
            sequence,
            common_difference,
            prediction,
        }
    }

    /// Wall-clock time the prediction was made.
    #[must_use]
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    /// Copy of the input sequence.
    #[must_use]
    pub fn sequence(&self) -> &[f64] {
        &self.sequence
    }

    #[must_use]
    pub fn common_difference(&self) -> f64 {
        self.common_difference
    }

    #[must_use]
    pub fn prediction(&self) -> f64 {
        self.prediction
    }
}

/// Validates arithmetic progressions and remembers every successful
/// prediction in insertion order.
///
/// Not synchronized; callers sharing one across threads must serialize
/// access themselves.
#[derive(Debug, Default)]
pub struct SequencePredictor {
    history: Vec<Echo>,
}

impl SequencePredictor {
    /// Create a predictor with an empty history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether `sequence` is an arithmetic progression.
    #[must_use]
    pub fn validate(&self, sequence: &[f64]) -> ValidationResult {
        analyze(sequence).into()
    }

    /// Like [`validate`](Self::validate), for loosely typed JSON input.
    #[must_use]
    pub fn validate_value(&self, value: &Value) -> ValidationResult {
        decode(value).and_then(|seq| analyze(&seq)).into()
    }

    /// Predict the term following `sequence` and record an [`Echo`].
    pub fn predict(&mut self, sequence: &[f64]) -> PredictionResult {
        let (common_difference, _) = match analyze(sequence) {
            Ok(progression) => progression,
            Err(error) => return PredictionResult::Failure { error },
        };

        // analyze() guarantees at least MIN_SEQUENCE_LEN elements
        let prediction = sequence[sequence.len() - 1] + common_difference;
        if !prediction.is_finite() {
            return PredictionResult::Failure {
                error: SequenceError::NumericOverflow {
                    quantity: "prediction",
                },
            };
        }

        self.history.push(Echo::recorded_at(
            Local::now(),
            sequence.to_vec(),
            common_difference,
            prediction,
        ));

        PredictionResult::Success {
            sequence: sequence.to_vec(),
            common_difference,
            prediction,
        }
    }

    /// Like [`predict`](Self::predict), for loosely typed JSON input.
    pub fn predict_value(&mut self, value: &Value) -> PredictionResult {
        match decode(value) {
            Ok(seq) => self.predict(&seq),
            Err(error) => PredictionResult::Failure { error },
        }
    }

    /// All echoes, oldest first.
    #[must_use]
    pub fn history(&self) -> &[Echo] {
        &self.history
    }

    /// The most recent echo.
    #[must_use]
    pub fn last(&self) -> Option<&Echo> {
        self.history.last()
    }

    /// Number of successful predictions since the last clear.
    #[must_use]
    pub fn count(&self) -> usize {
        self.history.len()
    }

    /// Forget every echo. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.history.len();
        self.history.clear();
        removed
    }
}

/// Length, element, overflow, then progression checks. Returns the common
/// difference and the full list of deltas.
fn analyze(sequence: &[f64]) -> Result<(f64, Vec<f64>), SequenceError> {
    if sequence.len() < MIN_SEQUENCE_LEN {
        return Err(SequenceError::InsufficientLength {
            len: sequence.len(),
        });
    }
    sequence::check_elements(sequence)?;

    let differences = sequence::differences(sequence);
    if differences.iter().any(|d| !d.is_finite()) {
        return Err(SequenceError::NumericOverflow {
            quantity: "common difference",
        });
    }
    let common_difference = differences[0];
    if differences.iter().all(|d| *d == common_difference) {
        Ok((common_difference, differences))
    } else {
        Err(SequenceError::NotArithmetic { differences })
    }
}

/// Arrays that are too short are reported before their elements are
/// inspected, matching the order used for typed input.
fn decode(value: &Value) -> Result<Vec<f64>, SequenceError> {
    if let Value::Array(items) = value {
        if items.len() < MIN_SEQUENCE_LEN {
            return Err(SequenceError::InsufficientLength { len: items.len() });
        }
    }
    sequence::from_json(value)
}
