//! Normalization of raw AI output into a [`GradingReport`].
//!
//! # Expected input
//! ```json
//! {
//!   "grammarErrors": ["..."],
//!   "fluencyAnalysis": "...",
//!   "logicEvaluation": "...",
//!   "writingSuggestions": ["..."],
//!   "vocabularyRecommendations": ["..."],
//!   "overallScore": 80
//! }
//! ```
//!
//! Fields are read one at a time; a missing or mistyped field is left unset.
//! Deciding what to do with an unreadable response is up to the caller.

use serde_json::{Map, Value};

use crate::error::{NormalizeError, Result};
use crate::types::GradingReport;

const ERROR_KEY: &str = "error";

/// Normalize the raw text returned by the grading client.
pub fn normalize(raw: &str) -> Result<GradingReport> {
    let value: Value = serde_json::from_str(raw.trim())
        .map_err(|e| NormalizeError::Malformed(e.to_string()))?;

    let object = match value {
        Value::Object(object) => object,
        other => {
            return Err(NormalizeError::Malformed(format!(
                "expected a JSON object, got {}",
                kind_of(&other)
            )))
        }
    };

    if let Some(kind) = object.get(ERROR_KEY) {
        return Err(NormalizeError::Upstream {
            kind: text(kind).unwrap_or_default(),
            message: object.get("message").and_then(text).unwrap_or_default(),
        });
    }

    Ok(GradingReport {
        grammar_errors: list(&object, "grammarErrors"),
        fluency_analysis: object.get("fluencyAnalysis").and_then(text),
        logic_evaluation: object.get("logicEvaluation").and_then(text),
        writing_suggestions: list(&object, "writingSuggestions"),
        vocabulary_recommendations: list(&object, "vocabularyRecommendations"),
        overall_score: object.get("overallScore").and_then(score),
    })
}

fn list(object: &Map<String, Value>, key: &str) -> Option<Vec<String>> {
    let items = object.get(key)?.as_array()?;
    Some(
        items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
    )
}

fn text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn score(value: &Value) -> Option<i32> {
    let whole = match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(truncate)),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().and_then(truncate))
        }
        _ => None,
    };
    whole.and_then(|v| i32::try_from(v).ok())
}

/// Drop the fraction; non-finite or out-of-range values have no score.
fn truncate(f: f64) -> Option<i64> {
    let whole = f.trunc();
    (whole.is_finite() && whole >= i64::MIN as f64 && whole < i64::MAX as f64)
        .then_some(whole as i64)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
