//! API error types with HTTP status code mapping.
//!
//! [`ApiError`] is the unified error type for all API endpoints. It implements
//! `axum::response::IntoResponse` to produce structured JSON error responses
//! with appropriate HTTP status codes.

use axum::extract::path::ErrorKind;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use todo_storage::StorageError;

/// Structured error detail in API responses.
#[derive(Debug, Clone, Serialize)]
pub struct ApiErrorDetail {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_FAILED").
    pub code: String,
    /// Human-readable error message.
    pub message: String,
    /// Per-field validation errors.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldError>>,
}

/// One problem with one field of a request body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path of the offending field or route parameter, or `"body"`, `"path"`
    /// or `"query"` when it cannot be pinned down.
    pub field: String,
    pub message: String,
}

/// API errors with HTTP status code mapping.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Entity not found (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Request body could not be read as JSON at all (400).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Request body, route parameter, or query string was well-formed but of
    /// the wrong shape (422).
    #[error("validation failed")]
    ValidationFailed(Vec<FieldError>),

    /// Internal server error (500).
    #[error("internal error: {0}")]
    InternalError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound(message) => (
                StatusCode::NOT_FOUND,
                ApiErrorDetail {
                    code: "NOT_FOUND".to_string(),
                    message,
                    details: None,
                },
            ),
            ApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ApiErrorDetail {
                    code: "BAD_REQUEST".to_string(),
                    message,
                    details: None,
                },
            ),
            ApiError::ValidationFailed(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ApiErrorDetail {
                    code: "VALIDATION_FAILED".to_string(),
                    message: format!("{} validation error(s)", errors.len()),
                    details: Some(errors),
                },
            ),
            ApiError::InternalError(message) => {
                tracing::error!(%message, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ApiErrorDetail {
                        code: "INTERNAL_ERROR".to_string(),
                        message,
                        details: None,
                    },
                )
            }
        };

        let body = serde_json::json!({
            "success": false,
            "error": detail,
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match &err {
            StorageError::TodoNotFound(_) => ApiError::NotFound(err.to_string()),
            _ => ApiError::InternalError(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(err) => {
                ApiError::ValidationFailed(vec![field_error(&err.body_text())])
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        match rejection {
            PathRejection::FailedToDeserializePathParams(err) => {
                let field = match err.kind() {
                    ErrorKind::ParseErrorAtKey { key, .. } => key.clone(),
                    ErrorKind::InvalidUtf8InPathParam { key } => key.clone(),
                    _ => "path".to_string(),
                };
                ApiError::ValidationFailed(vec![FieldError {
                    field,
                    message: err.kind().to_string(),
                }])
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        match rejection {
            QueryRejection::FailedToDeserializeQueryString(err) => {
                ApiError::ValidationFailed(vec![FieldError {
                    field: "query".to_string(),
                    message: err.body_text(),
                }])
            }
            other => ApiError::BadRequest(other.body_text()),
        }
    }
}

/// Pulls the offending field out of a JSON deserialization message.
///
/// Messages look like `"<prefix>: missing field `text` at line 1 column 2"`
/// for absent fields and `"<prefix>: completed: invalid type: ..."` for
/// mistyped ones.
fn field_error(body_text: &str) -> FieldError {
    let message = body_text
        .split_once(": ")
        .map_or(body_text, |(_, rest)| rest);

    if let Some(rest) = message.split_once("missing field `").map(|(_, rest)| rest) {
        if let Some((field, _)) = rest.split_once('`') {
            return FieldError {
                field: field.to_string(),
                message: message.to_string(),
            };
        }
    }

    if let Some((path, reason)) = message.split_once(": ") {
        let is_path = !path.is_empty()
            && path
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '[' | ']'));
        if is_path {
            return FieldError {
                field: path.to_string(),
                message: reason.to_string(),
            };
        }
    }

    FieldError {
        field: "body".to_string(),
        message: message.to_string(),
    }
}
