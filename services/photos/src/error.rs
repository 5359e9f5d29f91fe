//! Custom error types for the photos service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Custom error type for the photos service
///
/// The `message` field of every 4xx body is matched by clients, so the
/// display strings of those variants are part of the HTTP contract.
#[derive(Error, Debug)]
pub enum ApiError {
    /// No authorization header, or the token subject does not exist
    #[error("Unauthorized")]
    Unauthorized,

    /// Empty, malformed or unverifiable bearer token
    #[error("Invalid token")]
    InvalidToken,

    /// Request payload failed a validation rule
    #[error("{0}")]
    Validation(String),

    /// Login with an unknown email or a wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// No record for the requested id
    #[error("Data not found")]
    NotFound,

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] common::error::DatabaseError),
}

impl ApiError {
    /// HTTP status for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized | ApiError::InvalidToken | ApiError::InvalidCredentials => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::InternalServerError | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match self {
            ApiError::Database(e) => {
                tracing::error!("Database error: {}", e);
                "Database error".to_string()
            }
            other => other.to_string(),
        };

        let body = Json(json!({
            "message": message,
        }));

        (status, body).into_response()
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
