//! Error types for essay-core.

use thiserror::Error;

/// Result type alias using NormalizeError.
pub type Result<T> = std::result::Result<T, NormalizeError>;

/// Errors that can occur while normalizing an AI response.
#[derive(Debug, Error, PartialEq)]
pub enum NormalizeError {
    /// The response is an explicit error envelope from the grading client.
    #[error("AI service error ({kind}): {message}")]
    Upstream { kind: String, message: String },

    /// The response could not be read as a grading object.
    #[error("malformed AI response: {0}")]
    Malformed(String),
}
