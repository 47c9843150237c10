//! Error responses in the `{"error": message}` shape

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::DomainError;

/// Message returned for failures whose details must not reach the client
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

const PROVIDER_ERROR_MESSAGE: &str = "LLM provider request failed";

/// Error response body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

/// API error with status code
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Client errors keep their message; everything else collapses to
    /// [`INTERNAL_ERROR_MESSAGE`]
    pub fn redacted(err: DomainError) -> Self {
        if err.is_client_error() {
            err.into()
        } else {
            error!(error = %err, "Request failed");
            Self::internal(INTERNAL_ERROR_MESSAGE)
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ApiErrorResponse {
                error: self.message,
            }),
        )
            .into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Configuration { message } => Self::bad_request(message),
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Transport {
                provider,
                status,
                message,
            } => {
                error!(
                    provider = %provider,
                    status = ?status,
                    detail = %message,
                    "Upstream provider failure"
                );
                Self::internal(PROVIDER_ERROR_MESSAGE)
            }
            DomainError::Cancelled => Self::internal("Request cancelled"),
            DomainError::Internal { message } => {
                error!(detail = %message, "Internal error");
                Self::internal(INTERNAL_ERROR_MESSAGE)
            }
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for ApiError {}
