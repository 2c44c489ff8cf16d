//! Echo Chamber - arithmetic progression predictor
//!
//! Validates whether a sequence of numbers is an arithmetic progression,
//! predicts the next term, and keeps an in-memory history ("echoes") of
//! every successful prediction.
//!
//! # Architecture
//!
//! - [`predictor`] - [`SequencePredictor`], the validation/prediction core
//! - [`sequence`] - Conversion of loosely typed input into `f64` sequences
//! - [`error`] - Validation taxonomy and harness errors
//! - [`input`] - Classification of user-typed sequence text
//! - [`samples`] - Built-in sample sequences
//! - [`selftest`] - Self-check runner over the samples
//! - [`report`] - Terminal rendering
//! - [`config`] - Configuration loading and validation
//! - [`server`] - HTTP API over a shared predictor
//!
//! # Example
//!
//! ```rust
//! use echo_chamber::SequencePredictor;
//!
//! let mut predictor = SequencePredictor::new();
//! let result = predictor.predict(&[20.0, 15.0, 10.0, 5.0]);
//! assert_eq!(result.prediction(), Some(0.0));
//! assert_eq!(predictor.count(), 1);
//! ```

pub mod config;
pub mod error;
pub mod input;
pub mod predictor;
pub mod report;
pub mod samples;
pub mod selftest;
pub mod sequence;
pub mod server;

// Re-export commonly used types
pub use error::{ChamberError, Result, SequenceError};

pub use predictor::{Echo, PredictionResult, SequencePredictor, ValidationResult};

pub use config::{ChamberConfig, ConfigLoader, ConfigSource};
pub use input::SequenceInput;
pub use report::Renderer;
pub use selftest::{SelfTest, SelfTestReport};
pub use server::{ServerConfig, ServerState};
