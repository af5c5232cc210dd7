use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

use crate::auth::{bearer_token, AuthError, Claims};
use crate::error::ApiError;
use crate::state::AppState;

/// Authenticated caller extracted from the access token
#[derive(Clone, Debug)]
pub struct AuthUser {
    pub user_id: i64,
    pub username: String,
}

impl TryFrom<Claims> for AuthUser {
    type Error = AuthError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: claims.user_id()?,
            username: claims.username,
        })
    }
}

/// JWT authentication middleware that validates tokens and extracts user context.
///
/// Installed with `route_layer`, so it runs before any body or path extraction.
pub async fn jwt_auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .map(|value| value.to_str().map_err(|_| AuthError::MalformedHeader))
        .transpose()?;

    let token = bearer_token(header).map_err(|e| {
        tracing::debug!("Rejected request to {}: {}", request.uri().path(), e);
        e
    })?;

    let claims = state.auth.authenticate(token).map_err(|e| {
        tracing::warn!("Rejected bearer token: {}", e);
        e
    })?;

    let auth_user = AuthUser::try_from(claims)?;
    request.extensions_mut().insert(auth_user);

    Ok(next.run(request).await)
}
