//! Terminal rendering for predictions, history, samples, and self-test runs.
//!
//! Renderers return strings so the binary decides where they go. Coloring
//! goes through `colored`; the binary disables it globally for `--no-color`.

use crate::config::ChamberConfig;
use crate::error::join_numbers;
use crate::predictor::{Echo, PredictionResult, ValidationResult};
use crate::samples::{RejectionCase, SampleCase};
use crate::selftest::SelfTestReport;
use colored::Colorize;

const RULE_WIDTH: usize = 60;

/// Render a sequence as `[3, 6, 9, 12]`.
#[must_use]
pub fn format_sequence(sequence: &[f64]) -> String {
    format!("[{}]", join_numbers(sequence))
}

fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH)
}

/// Builds display text using the configured timestamp format.
#[derive(Debug, Clone)]
pub struct Renderer {
    timestamp_format: String,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(&ChamberConfig::default())
    }
}

impl Renderer {
    pub fn new(config: &ChamberConfig) -> Self {
        Self {
            timestamp_format: config.timestamp_format.clone(),
        }
    }

    /// Welcome banner shown when an interactive session starts.
    pub fn banner(&self) -> String {
        let mut out = vec![
            rule('═'),
            format!("{}", "  Welcome to the Echo Chamber of Numeria".cyan().bold()),
            rule('═'),
            "Every echo hides an arithmetic progression: consecutive numbers".to_string(),
            "differ by the same constant. Enter a sequence and the chamber".to_string(),
            "predicts what comes next, remembering each successful echo.".to_string(),
        ];
        out.push(String::new());
        out.join("\n")
    }

    pub fn prediction(&self, result: &PredictionResult) -> String {
        match result {
            PredictionResult::Success {
                sequence,
                common_difference,
                prediction,
            } => [
                format!("{} {}", "OK".green().bold(), result.message()),
                format!("   Sequence: {}", format_sequence(sequence)),
                format!("   Common Difference: {common_difference}"),
                format!("   Next Number: {prediction}"),
            ]
            .join("\n"),
            PredictionResult::Failure { error } => {
                format!("{} {error}", "Error:".red().bold())
            }
        }
    }

    pub fn validation(&self, sequence: &[f64], result: &ValidationResult) -> String {
        match result {
            ValidationResult::Valid {
                common_difference,
                differences,
            } => [
                format!("{} {}", "OK".green().bold(), result.message()),
                format!("   Sequence: {}", format_sequence(sequence)),
                format!("   Differences: {}", format_sequence(differences)),
                format!("   Common Difference: {common_difference}"),
            ]
            .join("\n"),
            ValidationResult::Invalid { error } => {
                format!("{} {error}", "Error:".red().bold())
            }
        }
    }

    pub fn timestamp(&self, echo: &Echo) -> String {
        echo.timestamp().format(&self.timestamp_format).to_string()
    }

    /// Full history listing, oldest first.
    pub fn history(&self, history: &[Echo]) -> String {
        if history.is_empty() {
            return format!("{} The Echo Chamber has no memories yet.", "Note:".yellow());
        }

        let mut out = vec![
            format!("{}", "Memories of the Echo Chamber".bold()),
            rule('━'),
        ];
        for (index, echo) in history.iter().enumerate() {
            out.push(format!(
                "Echo #{} ({}):",
                index + 1,
                self.timestamp(echo)
            ));
            out.push(format!("   Sequence: {}", format_sequence(echo.sequence())));
            out.push(format!("   Common Difference: {}", echo.common_difference()));
            out.push(format!("   Next Number: {}", echo.prediction()));
        }
        out.push(rule('━'));
        out.join("\n")
    }

    pub fn cleared(&self, removed: usize) -> String {
        format!(
            "{} Cleared {removed} memories from the Echo Chamber.",
            "OK".green().bold()
        )
    }

    pub fn count(&self, count: usize) -> String {
        format!("The Echo Chamber holds {count} memories.")
    }

    pub fn samples(&self, cases: &[SampleCase], rejections: &[RejectionCase]) -> String {
        let mut out = vec![format!("{}", "Sample sequences".bold()), rule('═')];
        for (index, case) in cases.iter().enumerate() {
            out.push(format!("{}. {}", index + 1, case.name));
            out.push(format!("   Sequence: {}", format_sequence(&case.sequence)));
            out.push(format!("   Common Difference: {}", case.expected_difference));
            out.push(format!("   Next Number: {}", case.expected_next));
        }
        if !rejections.is_empty() {
            out.push(String::new());
            out.push(format!("{}", "Sequences the chamber rejects".bold()));
            for case in rejections {
                out.push(format!(
                    "   {} {} ({})",
                    format_sequence(&case.sequence),
                    case.name,
                    case.expected_kind
                ));
            }
        }
        out.push(rule('═'));
        out.join("\n")
    }

    pub fn self_test(&self, report: &SelfTestReport) -> String {
        let mut out = vec![format!("{}", "Self-test".bold()), rule('═')];
        for (index, outcome) in report.outcomes.iter().enumerate() {
            let status = if outcome.passed {
                "PASSED".green().bold()
            } else {
                "FAILED".red().bold()
            };
            out.push(format!("Test {}: {} ... {status}", index + 1, outcome.name));
            out.push(format!("   {}", outcome.detail));
        }
        out.push(rule('═'));
        out.push(format!("   Passed: {}", report.passed));
        out.push(format!("   Failed: {}", report.failed));
        out.push(format!("   Success Rate: {:.2}%", report.success_rate()));
        out.join("\n")
    }

    pub fn help(&self) -> String {
        [
            "Commands:",
            "  predict <a, b, c, ...>   predict the next number (a bare sequence works too)",
            "  validate <a, b, c, ...>  check a sequence without storing it",
            "  history                  show all stored echoes",
            "  count                    number of stored echoes",
            "  clear                    forget all echoes",
            "  samples                  show sample sequences",
            "  check                    run the self-test",
            "  help                     show this help",
            "  quit                     leave the Echo Chamber",
        ]
        .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SequenceError;
    use crate::samples::{rejection_cases, standard_cases};
    use crate::selftest::SelfTest;
    use crate::predictor::SequencePredictor;
    use chrono::{Local, TimeZone};

    fn echo_at(h: u32, m: u32, s: u32, seq: &[f64], d: f64, next: f64) -> Echo {
        let ts = Local
            .with_ymd_and_hms(2024, 3, 14, h, m, s)
            .earliest()
            .unwrap();
        Echo::recorded_at(ts, seq.to_vec(), d, next)
    }

    #[test]
    fn test_format_sequence() {
        assert_eq!(format_sequence(&[3.0, 6.0, 9.0]), "[3, 6, 9]");
        assert_eq!(format_sequence(&[-0.5]), "[-0.5]");
        assert_eq!(format_sequence(&[]), "[]");
    }

    #[test]
    fn test_prediction_success() {
        let text = Renderer::default().prediction(&PredictionResult::Success {
            sequence: vec![3.0, 6.0, 9.0, 12.0],
            common_difference: 3.0,
            prediction: 15.0,
        });
        assert!(text.contains("The next number in the sequence is: 15"));
        assert!(text.contains("Sequence: [3, 6, 9, 12]"));
        assert!(text.contains("Common Difference: 3"));
    }

    #[test]
    fn test_prediction_failure_shows_message() {
        let text = Renderer::default().prediction(&PredictionResult::Failure {
            error: SequenceError::NotArithmetic {
                differences: vec![1.0, 2.0, 4.0],
            },
        });
        assert!(text.contains("Differences are: 1, 2, 4"));
    }

    #[test]
    fn test_validation_lists_differences() {
        let text = Renderer::default().validation(
            &[2.0, 4.0, 6.0],
            &ValidationResult::Valid {
                common_difference: 2.0,
                differences: vec![2.0, 2.0],
            },
        );
        assert!(text.contains("Differences: [2, 2]"));
    }

    #[test]
    fn test_history_empty() {
        assert!(Renderer::default()
            .history(&[])
            .contains("has no memories yet"));
    }

    #[test]
    fn test_history_uses_timestamp_format() {
        let history = vec![
            echo_at(9, 5, 0, &[1.0, 2.0], 1.0, 3.0),
            echo_at(9, 6, 30, &[20.0, 15.0], -5.0, 10.0),
        ];
        let text = Renderer::default().history(&history);
        assert!(text.contains("Echo #1 (09:05:00):"));
        assert!(text.contains("Echo #2 (09:06:30):"));
        assert!(text.contains("Common Difference: -5"));

        let config = ChamberConfig {
            timestamp_format: "%Y-%m-%d".to_string(),
            ..ChamberConfig::default()
        };
        assert!(Renderer::new(&config)
            .history(&history)
            .contains("Echo #1 (2024-03-14):"));
    }

    #[test]
    fn test_samples_listing() {
        let text = Renderer::default().samples(&standard_cases(), &rejection_cases());
        assert!(text.contains("1. Basic arithmetic progression"));
        assert!(text.contains("[20, 15, 10, 5]"));
        assert!(text.contains("Powers of 2 (not_arithmetic)"));
    }

    #[test]
    fn test_self_test_summary() {
        let mut predictor = SequencePredictor::new();
        let report = SelfTest::run(&mut predictor);
        let text = Renderer::default().self_test(&report);
        assert!(text.contains("Success Rate: 100.00%"));
        assert!(text.contains("Test 13: History bookkeeping"));
    }

    #[test]
    fn test_cleared_and_count() {
        let renderer = Renderer::default();
        assert!(renderer.cleared(3).contains("Cleared 3 memories"));
        assert_eq!(renderer.count(0), "The Echo Chamber holds 0 memories.");
    }
}
