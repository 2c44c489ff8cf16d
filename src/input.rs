//! Interpreting user-supplied sequence text.
//!
//! Text that looks like JSON (`[3, 6, 9]`, `{...}`, `"..."`, `true`, `null`)
//! goes through the JSON boundary so type errors are reported as such;
//! everything else is read as a comma separated list.

use crate::error::{ChamberError, Result};
use crate::predictor::{PredictionResult, SequencePredictor, ValidationResult};
use crate::sequence;
use serde_json::Value;

/// A sequence as typed by the user, not yet validated.
#[derive(Debug, Clone, PartialEq)]
pub enum SequenceInput {
    /// Comma separated numbers, e.g. `3, 6, 9`.
    List(String),
    /// A JSON document.
    Json(Value),
}

impl SequenceInput {
    /// Classify `text`. Only malformed JSON is an error here; everything
    /// else is left for validation to judge.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if looks_like_json(trimmed) {
            let value = serde_json::from_str(trimmed)
                .map_err(|e| ChamberError::input(format!("malformed JSON sequence: {e}")))?;
            Ok(Self::Json(value))
        } else {
            Ok(Self::List(trimmed.to_string()))
        }
    }

    /// Decoded numbers, when the input is well-formed.
    #[must_use]
    pub fn values(&self) -> Option<Vec<f64>> {
        match self {
            Self::List(text) => sequence::parse_list(text).ok(),
            Self::Json(value) => sequence::from_json(value).ok(),
        }
    }

    pub fn validate(&self, predictor: &SequencePredictor) -> ValidationResult {
        match self {
            Self::List(text) => match sequence::parse_list(text) {
                Ok(seq) => predictor.validate(&seq),
                Err(error) => ValidationResult::Invalid { error },
            },
            Self::Json(value) => predictor.validate_value(value),
        }
    }

    pub fn predict(&self, predictor: &mut SequencePredictor) -> PredictionResult {
        match self {
            Self::List(text) => match sequence::parse_list(text) {
                Ok(seq) => predictor.predict(&seq),
                Err(error) => PredictionResult::Failure { error },
            },
            Self::Json(value) => predictor.predict_value(value),
        }
    }
}

fn looks_like_json(text: &str) -> bool {
    text.starts_with(['[', '{', '"']) || matches!(text, "true" | "false" | "null")
}
