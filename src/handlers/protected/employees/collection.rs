// handlers/protected/employees/collection.rs - GET/POST /api/employees/

use axum::{
    extract::{rejection::JsonRejection, OriginalUri, RawQuery, State},
    Extension, Json,
};
use tracing::info;

use crate::api::{EmployeeResponse, Page};
use crate::filter::EmployeeQuery;
use crate::middleware::{ApiResponse, ApiResult, AuthUser};
use crate::services::ListParams;
use crate::state::AppState;
use crate::validation::EmployeePayload;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub department: Option<String>,
    pub role: Option<String>,
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub page: Option<String>,
    pub page_size: Option<String>,
}

impl ListQuery {
    /// Decode a raw query string. A repeated key keeps its last value and
    /// unknown keys are ignored, so this never rejects.
    pub fn from_query(raw: Option<&str>) -> Self {
        let mut query = ListQuery::default();
        for (key, value) in url::form_urlencoded::parse(raw.unwrap_or("").as_bytes()) {
            let slot = match key.as_ref() {
                "department" => &mut query.department,
                "role" => &mut query.role,
                "search" => &mut query.search,
                "ordering" => &mut query.ordering,
                "page" => &mut query.page,
                "page_size" => &mut query.page_size,
                _ => continue,
            };
            *slot = Some(value.into_owned());
        }
        query
    }
}

impl From<ListQuery> for ListParams {
    fn from(q: ListQuery) -> Self {
        ListParams {
            query: EmployeeQuery::from_params(
                q.department.as_deref(),
                q.role.as_deref(),
                q.search.as_deref(),
                q.ordering.as_deref(),
            ),
            page: q.page,
            page_size: q.page_size,
        }
    }
}

/// GET /api/employees/ - Filtered, searched, paginated listing
///
/// Query parameters: `department`, `role`, `search`, `ordering`, `page`,
/// `page_size`. Responds with `{count, next, previous, results}`.
pub async fn list(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    RawQuery(raw): RawQuery,
) -> ApiResult<Page<EmployeeResponse>> {
    let query = ListQuery::from_query(raw.as_deref());

    let slice = state.employees.list(query.into()).await?;
    let page = Page::from_slice(slice.map(EmployeeResponse::from), uri.path(), uri.query());
    Ok(ApiResponse::success(page))
}

/// POST /api/employees/ - Create an employee; `date_joined` is set to today
pub async fn create(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<EmployeePayload>, JsonRejection>,
) -> ApiResult<EmployeeResponse> {
    let Json(payload) = payload?;
    let employee = state.employees.create(payload).await?;
    info!("{} created employee {} <{}>", user.username, employee.id, employee.email);
    Ok(ApiResponse::created(employee.into()))
}
