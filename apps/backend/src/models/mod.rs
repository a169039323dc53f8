//! Database models and API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use essay_core::{
    join_grammar_errors, join_list, split_grammar_errors, split_list, GradingReport,
};

// === Database Entity Types ===

/// Registered account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub id: i64,
    pub username: String,
    /// Stored as given. Never sent back to clients.
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Submitted essay
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Essay {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Grading result as stored in PostgreSQL, list fields still joined
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbGradingResult {
    pub id: i64,
    pub essay_id: i64,
    pub grammar_errors: Option<String>,
    pub fluency_analysis: Option<String>,
    pub logic_evaluation: Option<String>,
    pub writing_suggestions: Option<String>,
    pub vocabulary_recommendations: Option<String>,
    pub overall_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl DbGradingResult {
    /// Convert to the API shape, splitting list fields back apart
    pub fn to_view(&self, essay_title: Option<String>) -> GradingResultView {
        GradingResultView {
            id: self.id,
            essay_id: self.essay_id,
            essay_title,
            grammar_errors: self.grammar_errors.as_deref().map(split_grammar_errors),
            fluency_analysis: self.fluency_analysis.clone(),
            logic_evaluation: self.logic_evaluation.clone(),
            writing_suggestions: self.writing_suggestions.as_deref().map(split_list),
            vocabulary_recommendations: self
                .vocabulary_recommendations
                .as_deref()
                .map(split_list),
            overall_score: self.overall_score,
            created_at: self.created_at,
        }
    }
}

// === Insert Drafts ===

#[derive(Debug, Clone)]
pub struct NewAccount {
    pub username: String,
    pub password: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewEssay {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewGradingResult {
    pub essay_id: i64,
    pub grammar_errors: Option<String>,
    pub fluency_analysis: Option<String>,
    pub logic_evaluation: Option<String>,
    pub writing_suggestions: Option<String>,
    pub vocabulary_recommendations: Option<String>,
    pub overall_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl NewGradingResult {
    /// Flatten a report into its storage columns
    pub fn from_report(essay_id: i64, report: &GradingReport, created_at: DateTime<Utc>) -> Self {
        Self {
            essay_id,
            grammar_errors: report.grammar_errors.as_deref().map(join_grammar_errors),
            fluency_analysis: report.fluency_analysis.clone(),
            logic_evaluation: report.logic_evaluation.clone(),
            writing_suggestions: report.writing_suggestions.as_deref().map(join_list),
            vocabulary_recommendations: report
                .vocabulary_recommendations
                .as_deref()
                .map(join_list),
            overall_score: report.overall_score,
            created_at,
        }
    }
}

// === API Envelope ===

/// Uniform body of every API response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self::with_message("Success", data)
    }

    pub fn with_message(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

// === API Request/Response Types ===

// Essay types
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitEssayRequest {
    pub user_id: i64,
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateEssayRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EssaySearchQuery {
    #[serde(default)]
    pub title: String,
}

/// Grading result with list fields restored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingResultView {
    pub id: i64,
    pub essay_id: i64,
    pub essay_title: Option<String>,
    pub grammar_errors: Option<Vec<String>>,
    pub fluency_analysis: Option<String>,
    pub logic_evaluation: Option<String>,
    pub writing_suggestions: Option<Vec<String>>,
    pub vocabulary_recommendations: Option<Vec<String>>,
    pub overall_score: Option<i32>,
    pub created_at: DateTime<Utc>,
}

// Account types
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub user: Account,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateAccountRequest {
    pub username: String,
    pub password: String,
    pub email: String,
}
