//! Error types for the currency service
//!
//! Business code returns typed `ServiceError` values. Status codes and the
//! response envelope are only decided in the `IntoResponse` impl.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::models::ErrorResponse;

// == Field Violation ==
/// A single failed input constraint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

// == Service Error Enum ==
/// Unified error type for the currency service.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Input failed one or more constraints
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<FieldViolation>),

    /// Malformed path parameter or request body
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Entity does not exist in the entity store
    #[error("Not found: {0}")]
    NotFound(String),

    /// Key absent from the cache store
    #[error("Cache miss: {0}")]
    CacheMiss(String),

    /// Cache backend failure
    #[error("Cache error: {0}")]
    Cache(String),

    /// Entity store failure
    #[error("Persistence error: {0}")]
    Persistence(String),
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join(", ")
}

impl ServiceError {
    /// HTTP status this error maps to at the boundary.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) | ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) | ServiceError::CacheMiss(_) => StatusCode::NOT_FOUND,
            ServiceError::Cache(_) | ServiceError::Persistence(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::Persistence(err.to_string())
    }
}

impl From<redis::RedisError> for ServiceError {
    fn from(err: redis::RedisError) -> Self {
        ServiceError::Cache(err.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        } else {
            tracing::debug!(error = %self, "request rejected");
        }

        let data = match &self {
            ServiceError::Validation(violations) => serde_json::to_value(violations).ok(),
            _ => None,
        };

        let body = ErrorResponse::new(status.as_u16(), self.to_string().to_lowercase(), data);
        (status, Json(body)).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the currency service.
pub type Result<T> = std::result::Result<T, ServiceError>;
