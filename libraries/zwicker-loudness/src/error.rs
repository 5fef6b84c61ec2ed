//! Error types for loudness computation

use thiserror::Error;

/// Result type for loudness operations
pub type Result<T> = std::result::Result<T, LoudnessError>;

/// Errors that can occur while computing loudness
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LoudnessError {
    /// Input has the wrong number of bands
    #[error("Invalid spectrum shape: expected {expected} bands, got {actual}")]
    Shape { expected: usize, actual: usize },

    /// Non-finite or physically impossible numeric value
    #[error("Value out of domain: {0}")]
    Domain(String),

    /// Unrecognized configuration value (e.g. an unknown field type)
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Recognized but unimplemented computation mode
    #[error("Unsupported loudness method: {0}")]
    Unsupported(String),
}

impl LoudnessError {
    pub(crate) fn shape(actual: usize) -> Self {
        Self::Shape {
            expected: crate::NUM_THIRD_OCTAVE_BANDS,
            actual,
        }
    }
}
