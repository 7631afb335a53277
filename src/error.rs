//! Application error type and its HTTP mapping.
//!
//! Every failure the core reports is a value of [`AppError`]. The HTTP
//! boundary only maps the variant to a status code; the body is always
//! `{ "detail": "<message>" }`, which is the shape the web client reads.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::repositories::StoreError;

/// Serialized error body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Input is not an absolute `http`/`https` URL.
    #[error("{message}")]
    InvalidUrl { message: String, details: Value },

    /// Malformed request body or query string.
    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    /// Code allocation gave up after the bounded number of attempts, or the
    /// sequence strategy produced a code that already exists.
    #[error("{message}")]
    AllocationFailed { message: String, details: Value },

    /// The mapping store cannot be reached.
    #[error("{message}")]
    Unavailable { message: String, details: Value },

    #[error("{message}")]
    Internal { message: String, details: Value },
}

impl AppError {
    pub fn invalid_url(message: impl Into<String>, details: Value) -> Self {
        Self::InvalidUrl {
            message: message.into(),
            details,
        }
    }
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }
    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }
    pub fn allocation_failed(message: impl Into<String>, details: Value) -> Self {
        Self::AllocationFailed {
            message: message.into(),
            details,
        }
    }
    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::Unavailable {
            message: message.into(),
            details,
        }
    }
    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            message: message.into(),
            details,
        }
    }

    /// HTTP status code for this error kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidUrl { .. } | AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::AllocationFailed { .. } | AppError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Machine-readable error kind, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::InvalidUrl { .. } => "invalid_url",
            AppError::Validation { .. } => "validation_error",
            AppError::NotFound { .. } => "not_found",
            AppError::AllocationFailed { .. } => "allocation_failed",
            AppError::Unavailable { .. } => "unavailable",
            AppError::Internal { .. } => "internal_error",
        }
    }

    pub fn details(&self) -> &Value {
        match self {
            AppError::InvalidUrl { details, .. }
            | AppError::Validation { details, .. }
            | AppError::NotFound { details, .. }
            | AppError::AllocationFailed { details, .. }
            | AppError::Unavailable { details, .. }
            | AppError::Internal { details, .. } => details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(
                kind = self.kind(),
                details = %self.details(),
                "{}",
                self
            );
        }

        let body = ErrorBody {
            detail: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound => AppError::not_found("URL not found", json!({})),
            StoreError::Unavailable(reason) => AppError::unavailable(
                "Storage is temporarily unavailable",
                json!({ "reason": reason }),
            ),
            StoreError::Database(reason) => {
                AppError::internal("Database error", json!({ "reason": reason }))
            }
            // Callers resolve these two before they reach the HTTP boundary.
            conflict @ (StoreError::CodeCollision | StoreError::DuplicateUrl) => AppError::internal(
                "Unresolved uniqueness conflict",
                json!({ "reason": conflict.to_string() }),
            ),
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let fields: Vec<String> = e.field_errors().keys().map(|k| k.to_string()).collect();
        AppError::bad_request(
            format!("Invalid request: {}", e).replace('\n', "; "),
            json!({ "fields": fields }),
        )
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::bad_request(
            rejection.body_text(),
            json!({ "status": rejection.status().as_u16() }),
        )
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::bad_request(rejection.body_text(), json!({}))
    }
}
