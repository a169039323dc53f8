//! Core essay grading library used by the backend.
//!
//! Provides:
//! - The grading prompt sent to the AI service
//! - Normalization of the AI's raw text into a fixed report shape
//! - Storage encoding for the report's list fields

pub mod codec;
pub mod error;
pub mod normalizer;
pub mod prompt;
pub mod types;

pub use codec::{join_grammar_errors, join_list, split_grammar_errors, split_list};
pub use error::{NormalizeError, Result};
pub use normalizer::normalize;
pub use prompt::build_prompt;
pub use types::{GradingReport, UpstreamFailure, PARSE_FAILED};
