// HTTP API Error Types
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde_json::{json, Value};

use crate::auth::AuthError;
use crate::database::DatabaseError;
use crate::services::EmployeeError;
use crate::validation::FieldErrors;

/// HTTP API error with appropriate status codes and client-friendly messages
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    ValidationError {
        message: String,
        field_errors: Option<FieldErrors>,
    },
    DuplicateEmail {
        message: String,
        field_errors: FieldErrors,
    },
    InvalidJson(String),

    // 401 Unauthorized
    Unauthorized(String),

    // 404 Not Found
    NotFound(String),

    // 500 Internal Server Error
    InternalServerError(String),

    // 503 Service Unavailable
    ServiceUnavailable(String),
}

impl ApiError {
    /// Get HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::ValidationError { .. } => StatusCode::BAD_REQUEST,
            ApiError::DuplicateEmail { .. } => StatusCode::BAD_REQUEST,
            ApiError::InvalidJson(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Get client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::ValidationError { message, .. } => message,
            ApiError::DuplicateEmail { message, .. } => message,
            ApiError::InvalidJson(msg) => msg,
            ApiError::Unauthorized(msg) => msg,
            ApiError::NotFound(msg) => msg,
            ApiError::InternalServerError(msg) => msg,
            ApiError::ServiceUnavailable(msg) => msg,
        }
    }

    /// Get error code for client handling
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::ValidationError { .. } => "VALIDATION_ERROR",
            ApiError::DuplicateEmail { .. } => "DUPLICATE_EMAIL",
            ApiError::InvalidJson(_) => "INVALID_JSON",
            ApiError::Unauthorized(_) => "UNAUTHORIZED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
            ApiError::ServiceUnavailable(_) => "SERVICE_UNAVAILABLE",
        }
    }

    pub fn field_errors(&self) -> Option<&FieldErrors> {
        match self {
            ApiError::ValidationError { field_errors, .. } => field_errors.as_ref(),
            ApiError::DuplicateEmail { field_errors, .. } => Some(field_errors),
            _ => None,
        }
    }

    /// Convert to JSON response body
    pub fn to_json(&self) -> Value {
        let mut response = json!({
            "error": true,
            "code": self.error_code(),
            "message": self.message(),
        });

        if let Some(field_errors) = self.field_errors() {
            response["field_errors"] = json!(field_errors);
        }

        response
    }
}

impl ApiError {
    pub fn validation_error(message: impl Into<String>, field_errors: Option<FieldErrors>) -> Self {
        ApiError::ValidationError {
            message: message.into(),
            field_errors,
        }
    }

    pub fn duplicate_email(field_errors: FieldErrors) -> Self {
        ApiError::DuplicateEmail {
            message: "An employee with this email already exists".to_string(),
            field_errors,
        }
    }

    pub fn invalid_json(message: impl Into<String>) -> Self {
        ApiError::InvalidJson(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        ApiError::Unauthorized(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn internal_server_error(message: impl Into<String>) -> Self {
        ApiError::InternalServerError(message.into())
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        ApiError::ServiceUnavailable(message.into())
    }
}

// Convert other error types to ApiError
impl From<DatabaseError> for ApiError {
    fn from(err: DatabaseError) -> Self {
        if err.is_connection_failure() {
            tracing::error!("Database unavailable: {}", err);
            return ApiError::service_unavailable("Database temporarily unavailable");
        }
        match err {
            DatabaseError::DuplicateEmail => {
                ApiError::duplicate_email(FieldErrors::single(
                    "email",
                    crate::services::employee_service::DUPLICATE_EMAIL,
                ))
            }
            DatabaseError::DuplicateUsername => ApiError::validation_error(
                "Invalid registration",
                Some(FieldErrors::single(
                    "username",
                    crate::services::auth_service::USERNAME_TAKEN,
                )),
            ),
            DatabaseError::ConfigMissing(key) => {
                tracing::error!("Store not configured: {}", key);
                ApiError::service_unavailable("Database is not configured")
            }
            other => {
                // Log the real error but return generic message
                tracing::error!("Store error: {}", other);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
        }
    }
}

impl From<EmployeeError> for ApiError {
    fn from(err: EmployeeError) -> Self {
        match err {
            EmployeeError::NotFound(_) => ApiError::not_found("Not found."),
            EmployeeError::InvalidField(errors) => {
                ApiError::validation_error("Invalid input", Some(errors))
            }
            EmployeeError::DuplicateEmail(errors) => ApiError::duplicate_email(errors),
            EmployeeError::Store(e) => e.into(),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(errors) => {
                ApiError::validation_error("Invalid registration", Some(errors))
            }
            AuthError::Store(e) => e.into(),
            AuthError::Crypto(msg) => {
                tracing::error!("Auth crypto failure: {}", msg);
                ApiError::internal_server_error("An error occurred while processing your request")
            }
            AuthError::TokenInvalid(detail) => {
                tracing::debug!("Invalid token: {}", detail);
                ApiError::unauthorized("Given token not valid for any token type")
            }
            other => ApiError::unauthorized(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::invalid_json(rejection.body_text())
    }
}

// Standard error trait implementations
impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

// Automatic HTTP response conversion for Axum
impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn duplicate_email_body_carries_field_errors() {
        let err: ApiError = EmployeeError::DuplicateEmail(FieldErrors::single("email", "taken")).into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            err.to_json(),
            json!({
                "error": true,
                "code": "DUPLICATE_EMAIL",
                "message": "An employee with this email already exists",
                "field_errors": {"email": ["taken"]}
            })
        );
    }

    #[test]
    fn not_found_has_no_field_errors() {
        let err: ApiError = EmployeeError::NotFound("abc".into()).into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.to_json().get("field_errors").is_none());
    }

    #[test]
    fn auth_failures_are_unauthorized() {
        for err in [AuthError::MissingToken, AuthError::TokenExpired, AuthError::WrongTokenType] {
            assert_eq!(ApiError::from(err).status_code(), StatusCode::UNAUTHORIZED);
        }
        let err = ApiError::from(AuthError::Validation(FieldErrors::single("password", "short")));
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
    }

    #[test]
    fn store_failures_are_hidden() {
        let err = ApiError::from(DatabaseError::InvalidRow("bad department".into()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!err.message().contains("department"));
    }
}
