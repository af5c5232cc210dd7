// handlers/public/auth/token.rs - POST /api/token/ handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Deserialize;

use super::require;
use crate::auth::TokenPair;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;
use crate::validation::FieldErrors;

#[derive(Debug, Default, Deserialize)]
pub struct TokenRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

/// POST /api/token/ - Exchange credentials for an access and a refresh token
///
/// ```json
/// {"username": "admin", "password": "..."}
/// ```
///
/// Responds `200 {"access": "...", "refresh": "..."}`, `400` when a field is
/// missing, `401` when the credentials do not match an active account.
pub async fn token_post(
    State(state): State<AppState>,
    payload: Result<Json<TokenRequest>, JsonRejection>,
) -> ApiResult<TokenPair> {
    let Json(request) = payload?;

    let mut errors = FieldErrors::new();
    let username = require(request.username, "username", &mut errors);
    let password = require(request.password, "password", &mut errors);
    let (Some(username), Some(password)) = (username, password) else {
        return Err(ApiError::validation_error("Invalid input", Some(errors)));
    };

    let pair = state.auth.obtain_pair(&username, &password).await?;
    Ok(ApiResponse::success(pair))
}
