// handlers/protected/employees/record.rs - /api/employees/:id/ handlers
//
// Ids arrive as strings so a non-integer id is a 404 rather than a
// path rejection.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use tracing::info;

use crate::api::EmployeeResponse;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::state::AppState;
use crate::validation::EmployeePayload;

/// GET /api/employees/:id/
pub async fn retrieve(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<EmployeeResponse> {
    let employee = state.employees.retrieve(&id).await?;
    Ok(ApiResponse::success(employee.into()))
}

/// PUT /api/employees/:id/ - Full replace of the mutable fields
pub async fn update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<EmployeeResponse> {
    let Json(payload) = payload?;
    let employee = state.employees.update(&id, payload, false).await?;
    info!("{} replaced employee {}", user.username, employee.id);
    Ok(ApiResponse::success(employee.into()))
}

/// PATCH /api/employees/:id/ - Only the supplied fields change
pub async fn partial_update(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<EmployeeResponse> {
    let Json(payload) = payload?;
    let employee = state.employees.update(&id, payload, true).await?;
    info!("{} patched employee {}", user.username, employee.id);
    Ok(ApiResponse::success(employee.into()))
}

/// DELETE /api/employees/:id/
pub async fn destroy(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<()> {
    state.employees.delete(&id).await?;
    info!("{} deleted employee {}", user.username, id);
    Ok(ApiResponse::no_content())
}
