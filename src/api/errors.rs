//! # API Errors
//!
//! Error-to-status mapping and the `{errors: [...]}` envelope. Write-path
//! store failures are client errors (400); read-path store failures are
//! server errors (500). A rejection carries the full ordered field-error
//! list and never partially applies.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::Logger;
use crate::prestador::validation::{FieldError, ValidationError};
use crate::store::StoreError;

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

/// API errors
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ApiError {
    /// One or more validation rules failed
    #[error("validation rejected")]
    Validation(Vec<FieldError>),

    /// A store write failed (malformed id, unique-index conflict)
    #[error("store write failed: {0}")]
    StoreWrite(#[source] StoreError),

    /// A store read failed (includes store failures inside validation)
    #[error("store read failed: {0}")]
    StoreRead(#[source] StoreError),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreWrite(_) => StatusCode::BAD_REQUEST,
            ApiError::StoreRead(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The field errors carried in the response envelope
    fn into_errors(self) -> Vec<FieldError> {
        match self {
            ApiError::Validation(errors) => errors,
            ApiError::StoreWrite(err) => vec![FieldError::message(format!("Error: {}", err))],
            ApiError::StoreRead(err) => vec![FieldError::message(format!("Error: {}", err))],
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        match err {
            ValidationError::Rejected(errors) => ApiError::Validation(errors),
            // A store failure during validation is a server fault, not a
            // rejection
            ValidationError::Store(err) => ApiError::StoreRead(err),
        }
    }
}

/// Error response envelope
#[derive(Debug, Clone, Serialize)]
pub struct ErrorEnvelope {
    pub errors: Vec<FieldError>,
}

impl ErrorEnvelope {
    pub fn new(errors: Vec<FieldError>) -> Self {
        Self { errors }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = self.to_string();

        if status.is_server_error() {
            Logger::error("REQUEST_FAILED", &[("detail", detail.as_str())]);
        } else {
            Logger::warn("REQUEST_REJECTED", &[("detail", detail.as_str())]);
        }

        let body = Json(ErrorEnvelope::new(self.into_errors()));
        (status, body).into_response()
    }
}
