//! Core types for essay grading.

use serde::{Deserialize, Serialize};

/// Text written into every field of a report whose AI response could not be parsed.
pub const PARSE_FAILED: &str = "AI解析失败";

/// Grading outcome as read from the AI response.
///
/// Every field is optional: a field the AI left out stays unset instead of
/// failing the whole report.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GradingReport {
    pub grammar_errors: Option<Vec<String>>,
    pub fluency_analysis: Option<String>,
    pub logic_evaluation: Option<String>,
    pub writing_suggestions: Option<Vec<String>>,
    pub vocabulary_recommendations: Option<Vec<String>>,
    pub overall_score: Option<i32>,
}

impl GradingReport {
    /// Report stored when the AI response is unreadable.
    pub fn parse_failed() -> Self {
        Self {
            grammar_errors: Some(vec![PARSE_FAILED.to_string()]),
            fluency_analysis: Some(PARSE_FAILED.to_string()),
            logic_evaluation: Some(PARSE_FAILED.to_string()),
            writing_suggestions: Some(vec![PARSE_FAILED.to_string()]),
            vocabulary_recommendations: Some(vec![PARSE_FAILED.to_string()]),
            overall_score: Some(0),
        }
    }
}

/// Error envelope the grading client returns in place of AI text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpstreamFailure {
    pub error: String,
    pub message: String,
}

impl UpstreamFailure {
    pub const REQUEST_FAILED: &'static str = "REQUEST_FAILED";
    pub const HTTP_ERROR: &'static str = "HTTP_ERROR";
    pub const INVALID_RESPONSE: &'static str = "INVALID_RESPONSE";
    pub const SERVICE_UNAVAILABLE: &'static str = "AI_SERVICE_UNAVAILABLE";

    pub fn new(kind: &str, message: impl Into<String>) -> Self {
        Self {
            error: kind.to_string(),
            message: message.into(),
        }
    }

    /// Encode as the JSON text handed back to the caller.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"error":"{}","message":""}}"#, self.error)
        })
    }
}
