//! Built-in sample sequences used by the `samples` listing and the self-test.

use serde::Serialize;

/// A sequence that must be accepted, with its expected outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleCase {
    pub name: &'static str,
    pub sequence: Vec<f64>,
    pub expected_difference: f64,
    pub expected_next: f64,
}

impl SampleCase {
    fn new(name: &'static str, sequence: &[f64], expected_difference: f64, expected_next: f64) -> Self {
        Self {
            name,
            sequence: sequence.to_vec(),
            expected_difference,
            expected_next,
        }
    }
}

/// A sequence that must be rejected, tagged with the expected
/// [`SequenceError::kind`](crate::error::SequenceError::kind).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RejectionCase {
    pub name: &'static str,
    pub sequence: Vec<f64>,
    pub expected_kind: &'static str,
}

impl RejectionCase {
    fn new(name: &'static str, sequence: &[f64], expected_kind: &'static str) -> Self {
        Self {
            name,
            sequence: sequence.to_vec(),
            expected_kind,
        }
    }
}

/// Arithmetic progressions with known continuations.
#[must_use]
pub fn standard_cases() -> Vec<SampleCase> {
    vec![
        SampleCase::new("Basic arithmetic progression", &[3.0, 6.0, 9.0, 12.0], 3.0, 15.0),
        SampleCase::new("Even numbers", &[2.0, 4.0, 6.0, 8.0, 10.0], 2.0, 12.0),
        SampleCase::new("Decreasing sequence", &[20.0, 15.0, 10.0, 5.0], -5.0, 0.0),
        SampleCase::new("Large numbers", &[100.0, 200.0, 300.0, 400.0], 100.0, 500.0),
        SampleCase::new("Negative numbers", &[-10.0, -5.0, 0.0, 5.0, 10.0], 5.0, 15.0),
        SampleCase::new("Difference of 1", &[5.0, 6.0, 7.0, 8.0], 1.0, 9.0),
        SampleCase::new("Two numbers only", &[5.0, 10.0], 5.0, 15.0),
        SampleCase::new("All same numbers", &[7.0, 7.0, 7.0, 7.0], 0.0, 7.0),
    ]
}

/// Sequences that the predictor must refuse.
#[must_use]
pub fn rejection_cases() -> Vec<RejectionCase> {
    vec![
        RejectionCase::new("Powers of 2", &[1.0, 2.0, 4.0, 8.0], "not_arithmetic"),
        RejectionCase::new("Single number", &[5.0], "insufficient_length"),
        RejectionCase::new("Empty sequence", &[], "insufficient_length"),
        RejectionCase::new("Mixed progression", &[1.0, 3.0, 5.0, 8.0], "not_arithmetic"),
    ]
}
