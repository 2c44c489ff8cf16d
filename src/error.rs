//! Custom error types for Echo Chamber.
//!
//! [`SequenceError`] is the validation taxonomy. It never escapes the core
//! as an `Err`: the predictor folds it into its result values. [`ChamberError`]
//! covers the failures of the surrounding harness (configuration, input
//! handling, I/O).

use serde::Serialize;
use std::path::PathBuf;
use thiserror::Error;

/// Minimum number of elements needed to derive a common difference.
pub const MIN_SEQUENCE_LEN: usize = 2;

/// Why a sequence was rejected.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SequenceError {
    /// The input is not an ordered collection of numbers
    #[error("Input must be an array of numbers, got {found}")]
    InvalidInputType { found: String },

    /// Fewer than two elements
    #[error("Sequence must contain at least 2 numbers (got {len})")]
    InsufficientLength { len: usize },

    /// An element is not a finite real number
    #[error("Element {index} is not a valid number: {found}")]
    NonNumericElement { index: usize, found: String },

    /// Consecutive differences are not all equal
    #[error(
        "Not an arithmetic progression. Differences are: {}",
        join_numbers(.differences)
    )]
    NotArithmetic { differences: Vec<f64> },

    /// Arithmetic on finite input left the finite range
    #[error("The {quantity} overflows the range of finite numbers")]
    NumericOverflow { quantity: &'static str },
}

impl SequenceError {
    /// Create a non-numeric element error
    pub fn non_numeric(index: usize, found: impl Into<String>) -> Self {
        Self::NonNumericElement {
            index,
            found: found.into(),
        }
    }

    /// Create an invalid input type error
    pub fn invalid_input(found: impl Into<String>) -> Self {
        Self::InvalidInputType {
            found: found.into(),
        }
    }

    /// Stable tag for machine-readable output.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidInputType { .. } => "invalid_input_type",
            Self::InsufficientLength { .. } => "insufficient_length",
            Self::NonNumericElement { .. } => "non_numeric_element",
            Self::NotArithmetic { .. } => "not_arithmetic",
            Self::NumericOverflow { .. } => "numeric_overflow",
        }
    }
}

/// Render numbers as a comma separated list, e.g. `1, 2, 4`.
pub fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Main error type for the Echo Chamber harness
#[derive(Error, Debug)]
pub enum ChamberError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Failed to load configuration
    #[error("Configuration error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {reason}")]
    InvalidConfig { field: String, reason: String },

    // =========================================================================
    // Input Errors
    // =========================================================================
    /// Malformed command or sequence input from the user
    #[error("Input error: {message}")]
    Input { message: String },

    // =========================================================================
    // Wrapped Errors
    // =========================================================================
    /// IO error wrapper
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON error wrapper
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ChamberError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            path: None,
        }
    }

    /// Create a configuration error with path
    pub fn config_with_path(message: impl Into<String>, path: PathBuf) -> Self {
        Self::Config {
            message: message.into(),
            path: Some(path),
        }
    }

    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Get error code for exit status
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Input { .. } => 2,
            Self::Config { .. } | Self::InvalidConfig { .. } => 7,
            _ => 1,
        }
    }
}

/// Type alias for Echo Chamber results
pub type Result<T> = std::result::Result<T, ChamberError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_arithmetic_lists_differences() {
        let err = SequenceError::NotArithmetic {
            differences: vec![1.0, 2.0, 4.0],
        };
        assert_eq!(
            err.to_string(),
            "Not an arithmetic progression. Differences are: 1, 2, 4"
        );
    }

    #[test]
    fn test_join_numbers_keeps_fractions() {
        assert_eq!(join_numbers(&[0.5, -1.0, 2.25]), "0.5, -1, 2.25");
        assert_eq!(join_numbers(&[]), "");
    }

    #[test]
    fn test_sequence_error_kinds() {
        assert_eq!(
            SequenceError::invalid_input("object").kind(),
            "invalid_input_type"
        );
        assert_eq!(
            SequenceError::InsufficientLength { len: 1 }.kind(),
            "insufficient_length"
        );
        assert_eq!(
            SequenceError::non_numeric(2, "true").kind(),
            "non_numeric_element"
        );
        assert_eq!(
            SequenceError::NotArithmetic {
                differences: vec![]
            }
            .kind(),
            "not_arithmetic"
        );
    }

    #[test]
    fn test_sequence_error_serializes_with_kind_tag() {
        let err = SequenceError::InsufficientLength { len: 0 };
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "insufficient_length");
        assert_eq!(json["len"], 0);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(ChamberError::input("bad").exit_code(), 2);
        assert_eq!(ChamberError::config("test").exit_code(), 7);
        assert_eq!(
            ChamberError::InvalidConfig {
                field: "timestampFormat".into(),
                reason: "empty".into()
            }
            .exit_code(),
            7
        );
        let io = std::io::Error::other("boom");
        assert_eq!(ChamberError::from(io).exit_code(), 1);
    }

    #[test]
    fn test_config_with_path() {
        let path = PathBuf::from("/test/config.json");
        let err = ChamberError::config_with_path("failed to parse", path.clone());
        if let ChamberError::Config {
            message,
            path: opt_path,
        } = err
        {
            assert_eq!(message, "failed to parse");
            assert_eq!(opt_path, Some(path));
        } else {
            panic!("Wrong error variant");
        }
    }

    #[test]
    fn test_numeric_overflow_message() {
        let err = SequenceError::NumericOverflow {
            quantity: "prediction",
        };
        assert_eq!(err.kind(), "numeric_overflow");
        assert_eq!(
            err.to_string(),
            "The prediction overflows the range of finite numbers"
        );
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "numeric_overflow");
        assert_eq!(json["quantity"], "prediction");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "access denied");
        let err: ChamberError = io_err.into();
        assert!(matches!(err, ChamberError::Io(_)));
        assert!(err.to_string().contains("access denied"));
    }
}
