// handlers/public/auth/refresh.rs - POST /api/token/refresh/ handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::{Deserialize, Serialize};

use super::require;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::FieldErrors;

#[derive(Debug, Default, Deserialize)]
pub struct RefreshRequest {
    pub refresh: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccessToken {
    pub access: String,
}

/// POST /api/token/refresh/ - New access token from a valid refresh token
pub async fn refresh_post(
    State(state): State<AppState>,
    payload: Result<Json<RefreshRequest>, JsonRejection>,
) -> ApiResult<AccessToken> {
    let Json(request) = payload?;

    let mut errors = FieldErrors::new();
    let Some(refresh) = require(request.refresh, "refresh", &mut errors) else {
        return Err(ApiError::validation_error("Invalid input", Some(errors)));
    };

    let access = state.auth.refresh(refresh.trim()).await?;
    Ok(ApiResponse::success(AccessToken { access }))
}
