//! Sequence input boundary.
//!
//! The core works on `&[f64]`, so the element type already rules out
//! booleans and other non-numeric values there. Loosely typed input
//! (comma separated text from a prompt, JSON documents) is converted here,
//! and anything that is not a finite real number is rejected with the
//! position of the offending element. Integer literals must also survive the
//! conversion to `f64` unchanged: `9007199254740993` would silently become
//! `9007199254740992`, so it is rejected instead.

use crate::error::SequenceError;
use serde_json::Value;

/// Parse a comma separated list such as `"3, 6, 9, 12"`.
///
/// A blank string is the empty sequence. Each token must parse as a finite
/// number; a trailing comma therefore yields an empty, invalid token.
pub fn parse_list(text: &str) -> Result<Vec<f64>, SequenceError> {
    let text = text.trim();
    if text.is_empty() {
        return Ok(Vec::new());
    }

    text.split(',')
        .enumerate()
        .map(|(index, token)| {
            let token = token.trim();
            let value = match token.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => return Err(SequenceError::non_numeric(index, describe_token(token))),
            };
            if is_integer_literal(token) && !token_is_exact(token, value) {
                return Err(SequenceError::non_numeric(index, inexact(token)));
            }
            Ok(value)
        })
        .collect()
}

/// Convert a JSON value into a sequence.
///
/// Only arrays are accepted. Booleans are rejected explicitly even though
/// some languages treat them as numbers.
pub fn from_json(value: &Value) -> Result<Vec<f64>, SequenceError> {
    let items = match value {
        Value::Array(items) => items,
        other => return Err(SequenceError::invalid_input(json_kind(other))),
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Number(n) => {
                let value = n
                    .as_f64()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| SequenceError::non_numeric(index, n.to_string()))?;
                let exact = match (n.as_i64(), n.as_u64()) {
                    (Some(int), _) => int_is_exact(i128::from(int), value),
                    (None, Some(uint)) => int_is_exact(i128::from(uint), value),
                    // Already a float in the document
                    (None, None) => true,
                };
                if exact {
                    Ok(value)
                } else {
                    Err(SequenceError::non_numeric(index, inexact(&n.to_string())))
                }
            }
            Value::Bool(b) => Err(SequenceError::non_numeric(index, format!("boolean {b}"))),
            Value::String(s) => Err(SequenceError::non_numeric(index, format!("string {s:?}"))),
            other => Err(SequenceError::non_numeric(index, json_kind(other))),
        })
        .collect()
}

/// Reject NaN and infinite elements.
pub fn check_elements(sequence: &[f64]) -> Result<(), SequenceError> {
    match sequence.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SequenceError::non_numeric(
            index,
            sequence[index].to_string(),
        )),
        None => Ok(()),
    }
}

/// Consecutive deltas: `differences[i] = sequence[i + 1] - sequence[i]`.
#[must_use]
pub fn differences(sequence: &[f64]) -> Vec<f64> {
    sequence.windows(2).map(|pair| pair[1] - pair[0]).collect()
}

/// Name of a JSON value's type, as shown in error messages.
#[must_use]
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn is_integer_literal(token: &str) -> bool {
    let digits = token.strip_prefix(['+', '-']).unwrap_or(token);
    !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())
}

/// An integer token outside the `i128` range is never exact: `f64` holds
/// every integer only up to 2^53.
fn token_is_exact(token: &str, value: f64) -> bool {
    token
        .parse::<i128>()
        .is_ok_and(|int| int_is_exact(int, value))
}

fn int_is_exact(int: i128, value: f64) -> bool {
    // `as` saturates, so out-of-range floats compare unequal
    value as i128 == int
}

fn inexact(literal: &str) -> String {
    format!("{literal} (not exactly representable)")
}

fn describe_token(token: &str) -> String {
    if token.is_empty() {
        "empty value".to_string()
    } else {
        format!("{token:?}")
    }
}
