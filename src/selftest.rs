//! Self-check runner.
//!
//! Replays the built-in samples through a predictor and verifies both the
//! predictions and the history bookkeeping.

use crate::predictor::{PredictionResult, SequencePredictor};
use crate::samples::{rejection_cases, standard_cases};
use serde::Serialize;
use tracing::debug;

/// Result of one self-test case.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CaseOutcome {
    pub name: String,
    pub passed: bool,
    /// What happened, in words.
    pub detail: String,
}

/// Summary of a self-test run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SelfTestReport {
    pub outcomes: Vec<CaseOutcome>,
    pub passed: usize,
    pub failed: usize,
}

impl SelfTestReport {
    fn record(&mut self, name: impl Into<String>, passed: bool, detail: impl Into<String>) {
        let outcome = CaseOutcome {
            name: name.into(),
            passed,
            detail: detail.into(),
        };
        debug!(case = %outcome.name, passed, detail = %outcome.detail, "self-test case");
        if passed {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
        self.outcomes.push(outcome);
    }

    /// Total number of cases run.
    #[must_use]
    pub fn total(&self) -> usize {
        self.passed + self.failed
    }

    /// Percentage of passing cases (0-100). Zero when nothing ran.
    #[must_use]
    pub fn success_rate(&self) -> f64 {
        if self.total() == 0 {
            return 0.0;
        }
        self.passed as f64 / self.total() as f64 * 100.0
    }

    #[must_use]
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.total() > 0
    }
}

/// Runs the samples against a caller-owned predictor.
pub struct SelfTest;

impl SelfTest {
    /// Run every sample, then check that the history grew by exactly the
    /// number of accepted sequences.
    pub fn run(predictor: &mut SequencePredictor) -> SelfTestReport {
        let mut report = SelfTestReport::default();
        let initial_count = predictor.count();
        let mut accepted = 0usize;

        for case in standard_cases() {
            match predictor.predict(&case.sequence) {
                PredictionResult::Success {
                    common_difference,
                    prediction,
                    ..
                } => {
                    accepted += 1;
                    let passed = prediction == case.expected_next
                        && common_difference == case.expected_difference;
                    report.record(
                        case.name,
                        passed,
                        format!(
                            "predicted {prediction} (expected {}), difference {common_difference} (expected {})",
                            case.expected_next, case.expected_difference
                        ),
                    );
                }
                PredictionResult::Failure { error } => {
                    report.record(case.name, false, error.to_string());
                }
            }
        }

        for case in rejection_cases() {
            match predictor.predict(&case.sequence) {
                PredictionResult::Failure { error } => {
                    let passed = error.kind() == case.expected_kind;
                    report.record(
                        case.name,
                        passed,
                        format!("rejected ({}): {error}", error.kind()),
                    );
                }
                PredictionResult::Success { prediction, .. } => {
                    accepted += 1;
                    report.record(
                        case.name,
                        false,
                        format!("accepted with prediction {prediction}, expected {}", case.expected_kind),
                    );
                }
            }
        }

        let expected_count = initial_count + accepted;
        let actual_count = predictor.count();
        report.record(
            "History bookkeeping",
            actual_count == expected_count,
            format!("{actual_count} echoes stored (expected {expected_count})"),
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_self_test_passes_on_fresh_predictor() {
        let mut predictor = SequencePredictor::new();
        let report = SelfTest::run(&mut predictor);
        assert!(report.all_passed(), "{:?}", report.outcomes);
        assert_eq!(report.total(), 13);
        assert_eq!(report.success_rate(), 100.0);
        assert_eq!(predictor.count(), 8);
    }

    #[test]
    fn test_self_test_accounts_for_existing_history() {
        let mut predictor = SequencePredictor::new();
        predictor.predict(&[1.0, 2.0]);
        let report = SelfTest::run(&mut predictor);
        assert!(report.all_passed());
        assert_eq!(predictor.count(), 9);
    }

    #[test]
    fn test_empty_report() {
        let report = SelfTestReport::default();
        assert_eq!(report.success_rate(), 0.0);
        assert!(!report.all_passed());
    }

    #[test]
    fn test_success_rate() {
        let mut report = SelfTestReport::default();
        report.record("a", true, "");
        report.record("b", true, "");
        report.record("c", false, "");
        assert_eq!(report.failed, 1);
        assert!((report.success_rate() - 66.666_666).abs() < 0.001);
    }
}
