// handlers/public/auth/register.rs - POST /api/register/ handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::api::UserResponse;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::Registration;
use crate::state::AppState;

/// POST /api/register/ - Create an API account
///
/// Body `{username, email?, password}`; responds `201 {id, username, email}`
/// or `400` with per-field messages.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<Registration>, JsonRejection>,
) -> ApiResult<UserResponse> {
    let Json(registration) = payload?;
    let user = state.auth.register(registration).await?;
    Ok(ApiResponse::created(user.into()))
}
