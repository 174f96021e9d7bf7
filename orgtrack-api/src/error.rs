//! Error handling for the API server.
//!
//! A unified error type that maps to HTTP responses. Handlers return
//! `ApiResult<T>` and errors convert to status codes with a JSON
//! `{error, message}` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use orgtrack_shared::error::DaoError;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::services::ServiceError;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400) - missing id segment, missing required field
    BadRequest(String),

    /// Not found (404)
    NotFound(String),

    /// Conflict (409) - constraint violation
    Conflict(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g. "bad_request", "not_found")
    pub error: String,

    /// Human-readable error message
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "conflict", msg),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    return ApiError::Conflict(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert data-access errors to API errors
impl From<DaoError> for ApiError {
    fn from(err: DaoError) -> Self {
        match err {
            DaoError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            DaoError::WriteFailed(_) => ApiError::InternalError(err.to_string()),
            DaoError::Database(db_err) => ApiError::from(db_err),
        }
    }
}

/// Convert service errors to API errors
impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::MissingField(field) => {
                ApiError::BadRequest(format!("Missing required field: {}", field))
            }
            ServiceError::Dao(dao_err) => ApiError::from(dao_err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("Department not found".to_string());
        assert_eq!(err.to_string(), "Not found: Department not found");
    }

    #[test]
    fn test_dao_not_found_maps_to_404() {
        let err = ApiError::from(DaoError::not_found("task", 7));
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_service_missing_field_maps_to_400() {
        let err = ApiError::from(ServiceError::MissingField("department"));
        assert!(matches!(err, ApiError::BadRequest(_)));
    }
}
