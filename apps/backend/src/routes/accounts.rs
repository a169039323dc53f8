//! Account endpoints

use axum::{
    extract::State,
    Json,
};

use crate::error::Result;
use crate::models::*;
use crate::routes::extract::{ApiJson, ApiPath};
use crate::services::accounts;
use crate::AppState;

/// POST /user/register
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> Result<Json<ApiResponse<Account>>> {
    let account = accounts::register(
        state.store.as_ref(),
        &payload.username,
        &payload.password,
        &payload.email,
    )
    .await?;
    Ok(Json(ApiResponse::with_message("Registration successful", account)))
}

/// POST /user/login
/// Returns the account and a placeholder token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<Json<ApiResponse<LoginResponse>>> {
    let user = accounts::login(state.store.as_ref(), &payload.username, &payload.password).await?;
    let token = accounts::session_token(&user);
    Ok(Json(ApiResponse::with_message(
        "Login successful",
        LoginResponse { user, token },
    )))
}

/// GET /user/:id
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<ApiResponse<Account>>> {
    let account = accounts::fetch(state.store.as_ref(), id).await?;
    Ok(Json(ApiResponse::ok(account)))
}

/// PUT /user/:id
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(payload): ApiJson<UpdateAccountRequest>,
) -> Result<Json<ApiResponse<Account>>> {
    let account = accounts::update(
        state.store.as_ref(),
        id,
        &payload.username,
        &payload.password,
        &payload.email,
    )
    .await?;
    Ok(Json(ApiResponse::with_message("Profile updated", account)))
}
