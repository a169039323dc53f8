//! Essay lifecycle: submission, edits, and grading.
//!
//! Grading runs at most once per essay. The first stored result is returned
//! on every later request, including the parse-failure placeholder.

use std::collections::HashMap;

use chrono::Utc;

use essay_core::{normalize, GradingReport, NormalizeError};

use crate::db::Store;
use crate::error::{ApiError, Result};
use crate::models::{Essay, GradingResultView, NewEssay, NewGradingResult};
use crate::services::grading_client::Grader;

fn essay_not_found(id: i64) -> ApiError {
    ApiError::NotFound(format!("Essay {} does not exist", id))
}

/// Store a new essay. Title and content are taken as given.
pub async fn submit(store: &dyn Store, user_id: i64, title: &str, content: &str) -> Result<Essay> {
    let essay = store
        .create_essay(&NewEssay {
            user_id,
            title: title.to_string(),
            content: content.to_string(),
            created_at: Utc::now(),
        })
        .await?;

    tracing::info!("Essay {} submitted by user {}", essay.id, user_id);
    Ok(essay)
}

pub async fn list_by_owner(store: &dyn Store, user_id: i64) -> Result<Vec<Essay>> {
    store.get_essays_by_user(user_id).await
}

pub async fn search_by_title(store: &dyn Store, user_id: i64, fragment: &str) -> Result<Vec<Essay>> {
    store.search_essays_by_title(user_id, fragment).await
}

pub async fn fetch(store: &dyn Store, id: i64) -> Result<Essay> {
    store.get_essay(id).await?.ok_or_else(|| essay_not_found(id))
}

/// Grade an essay, reusing a stored result when one exists.
///
/// An explicit error from the AI service fails the request and stores
/// nothing. Output that cannot be parsed is stored as the placeholder report.
pub async fn grade(store: &dyn Store, grader: &dyn Grader, essay_id: i64) -> Result<GradingResultView> {
    let essay = fetch(store, essay_id).await?;

    if let Some(existing) = store.get_result_by_essay(essay_id).await? {
        tracing::debug!("Essay {} already graded, returning result {}", essay_id, existing.id);
        return Ok(existing.to_view(Some(essay.title)));
    }

    tracing::info!("Requesting AI grading for essay {}", essay_id);
    let raw = grader.analyze(&essay.content).await;

    let report = match normalize(&raw) {
        Ok(report) => report,
        Err(NormalizeError::Upstream { kind, message }) => {
            tracing::warn!("AI service rejected essay {}: {} {}", essay_id, kind, message);
            return Err(ApiError::Upstream(format!("{}: {}", kind, message)));
        }
        Err(err @ NormalizeError::Malformed(_)) => {
            tracing::warn!("Storing placeholder result for essay {}: {}", essay_id, err);
            GradingReport::parse_failed()
        }
    };

    let stored = store
        .insert_result(&NewGradingResult::from_report(essay_id, &report, Utc::now()))
        .await?;

    Ok(stored.to_view(Some(essay.title)))
}

/// Stored results for every graded essay of a user, newest essay first.
pub async fn results_by_owner(store: &dyn Store, user_id: i64) -> Result<Vec<GradingResultView>> {
    let essays = store.get_essays_by_user(user_id).await?;
    let ids: Vec<i64> = essays.iter().map(|e| e.id).collect();

    // First stored result per essay, same as the grading lookup
    let mut by_essay = HashMap::new();
    for result in store.get_results_by_essays(&ids).await? {
        by_essay.entry(result.essay_id).or_insert(result);
    }

    Ok(essays
        .into_iter()
        .filter_map(|essay| {
            by_essay
                .remove(&essay.id)
                .map(|result| result.to_view(Some(essay.title)))
        })
        .collect())
}

/// Overwrite title and content, refreshing the modification time.
pub async fn update(store: &dyn Store, id: i64, title: &str, content: &str) -> Result<Essay> {
    store
        .update_essay(id, title, content, Utc::now())
        .await?
        .ok_or_else(|| essay_not_found(id))
}

/// Remove an essay. Its grading result, if any, is left in place.
pub async fn delete(store: &dyn Store, id: i64) -> Result<()> {
    if !store.essay_exists(id).await? {
        return Err(essay_not_found(id));
    }
    store.delete_essay(id).await?;
    tracing::info!("Essay {} deleted", id);
    Ok(())
}
