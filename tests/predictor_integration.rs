//! Integration tests for the public predictor API

use echo_chamber::samples::{rejection_cases, standard_cases};
use echo_chamber::{PredictionResult, SequenceError, SequencePredictor, ValidationResult};
use serde_json::json;

#[test]
fn test_samples_round_through_one_predictor() {
    let mut predictor = SequencePredictor::new();

    for case in standard_cases() {
        let result = predictor.predict(&case.sequence);
        assert_eq!(result.prediction(), Some(case.expected_next), "{}", case.name);
        assert_eq!(
            result.common_difference(),
            Some(case.expected_difference),
            "{}",
            case.name
        );
    }
    for case in rejection_cases() {
        let result = predictor.predict(&case.sequence);
        assert_eq!(
            result.error().map(SequenceError::kind),
            Some(case.expected_kind),
            "{}",
            case.name
        );
    }

    assert_eq!(predictor.count(), standard_cases().len());
    let recorded: Vec<&[f64]> = predictor.history().iter().map(|e| e.sequence()).collect();
    let expected: Vec<Vec<f64>> = standard_cases().into_iter().map(|c| c.sequence).collect();
    assert_eq!(
        recorded,
        expected.iter().map(Vec::as_slice).collect::<Vec<_>>()
    );
}

#[test]
fn test_interleaved_successes_and_failures() {
    let mut predictor = SequencePredictor::new();
    let inputs: [&[f64]; 7] = [
        &[1.0, 2.0],
        &[1.0],
        &[3.0, 1.0, -1.0],
        &[1.0, 2.0, 4.0],
        &[],
        &[0.25, 0.5, 0.75],
        &[1.0, 1.0, 2.0],
    ];
    let successes = inputs
        .iter()
        .map(|seq| predictor.predict(seq))
        .filter(PredictionResult::is_success)
        .count();

    assert_eq!(successes, 3);
    assert_eq!(predictor.count(), 3);
    assert_eq!(predictor.last().map(|e| e.prediction()), Some(1.0));
}

#[test]
fn test_failure_carries_validation_message() {
    let mut predictor = SequencePredictor::new();
    for seq in [vec![], vec![5.0], vec![1.0, 2.0, 4.0, 8.0]] {
        let validation = predictor.validate(&seq);
        let prediction = predictor.predict(&seq);
        assert_eq!(validation.error(), prediction.error());
        assert_eq!(validation.message(), prediction.message());
    }
}

#[test]
fn test_json_boundary() {
    let mut predictor = SequencePredictor::new();
    assert_eq!(
        predictor.validate_value(&json!(42)),
        ValidationResult::Invalid {
            error: SequenceError::invalid_input("number")
        }
    );
    assert_eq!(
        predictor.predict_value(&json!([3, 6, 9, 12])).prediction(),
        Some(15.0)
    );
    assert_eq!(
        predictor.predict_value(&json!([0, 1, false])).error(),
        Some(&SequenceError::non_numeric(2, "boolean false"))
    );
    assert_eq!(predictor.count(), 1);
}

#[test]
fn test_history_serializes() {
    let mut predictor = SequencePredictor::new();
    predictor.predict(&[3.0, 6.0, 9.0, 12.0]);
    let json = serde_json::to_value(predictor.history()).unwrap();
    assert_eq!(json[0]["sequence"], json!([3.0, 6.0, 9.0, 12.0]));
    assert_eq!(json[0]["prediction"], 15.0);
    assert!(json[0]["timestamp"].is_string());
}
