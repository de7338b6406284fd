//! API error types

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::error::{FieldError, MyBudgetError};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<FieldError>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::InternalError(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        let (error, fields) = match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::Unauthorized(msg)
            | ApiError::Forbidden(msg)
            | ApiError::Conflict(msg) => (msg, Vec::new()),
            ApiError::Validation(fields) => ("Validation failed".to_string(), fields),
            // Details stay in the server log
            ApiError::InternalError(msg) => {
                tracing::error!(error = %msg, "request failed");
                ("Internal server error".to_string(), Vec::new())
            }
        };

        let body = ErrorResponse {
            error,
            code: code.to_string(),
            fields,
        };

        (status, Json(body)).into_response()
    }
}

impl From<MyBudgetError> for ApiError {
    fn from(err: MyBudgetError) -> Self {
        match err {
            MyBudgetError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            MyBudgetError::Validation(fields) => ApiError::Validation(fields),
            MyBudgetError::Forbidden(msg) => ApiError::Forbidden(msg),
            MyBudgetError::Unauthenticated(msg) => ApiError::Unauthorized(msg),
            MyBudgetError::Duplicate { .. } => ApiError::Conflict(err.to_string()),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

/// API result type
pub type ApiResult<T> = Result<T, ApiError>;
