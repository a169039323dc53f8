//! Essay endpoints

use axum::{
    extract::State,
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::extract::{ApiJson, ApiPath, ApiQuery};
use crate::services::essays;
use crate::AppState;

/// POST /essay/submit
pub async fn submit(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SubmitEssayRequest>,
) -> Result<Json<ApiResponse<Essay>>> {
    let essay = essays::submit(
        state.store.as_ref(),
        payload.user_id,
        &payload.title,
        &payload.content,
    )
    .await?;
    Ok(Json(ApiResponse::with_message("Essay submitted", essay)))
}

/// GET /essay/user/:user_id
pub async fn list_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Vec<Essay>>>> {
    let essays = essays::list_by_owner(state.store.as_ref(), user_id).await?;
    Ok(Json(ApiResponse::ok(essays)))
}

/// GET /essay/user/:user_id/search?title=
pub async fn search(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
    ApiQuery(query): ApiQuery<EssaySearchQuery>,
) -> Result<Json<ApiResponse<Vec<Essay>>>> {
    let essays = essays::search_by_title(state.store.as_ref(), user_id, &query.title).await?;
    Ok(Json(ApiResponse::ok(essays)))
}

/// GET /essay/user/:user_id/results
pub async fn results_by_user(
    State(state): State<AppState>,
    ApiPath(user_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Vec<GradingResultView>>>> {
    let results = essays::results_by_owner(state.store.as_ref(), user_id).await?;
    Ok(Json(ApiResponse::ok(results)))
}

/// GET /essay/:id
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Essay>>> {
    let essay = essays::fetch(state.store.as_ref(), id).await?;
    Ok(Json(ApiResponse::ok(essay)))
}

/// POST /essay/check/:essay_id
pub async fn check(
    State(state): State<AppState>,
    ApiPath(essay_id): ApiPath<i64>,
) -> Result<Json<ApiResponse<GradingResultView>>> {
    let result = essays::grade(state.store.as_ref(), state.grader.as_ref(), essay_id).await?;
    Ok(Json(ApiResponse::with_message("Grading complete", result)))
}

/// PUT /essay/:id
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateEssayRequest>,
) -> Result<Json<ApiResponse<Essay>>> {
    let essay = essays::update(state.store.as_ref(), id, &payload.title, &payload.content).await?;
    Ok(Json(ApiResponse::with_message("Essay updated", essay)))
}

/// DELETE /essay/:id
pub async fn delete(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<()>>> {
    essays::delete(state.store.as_ref(), id).await?;
    Ok(Json(ApiResponse::with_message("Essay deleted", ())))
}
