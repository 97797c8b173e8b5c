//! Shared error taxonomy and the response composer.
//!
//! Every response of the connector — success, ignored, or error — uses the
//! same JSON shape so the upstream audit trail never has to branch on
//! transport-level signals. This module performs only the mapping from a
//! typed error to (status, body); no business logic lives here.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use utoipa::ToSchema;
use wtl_client::WtlError;

/// Error classification shared with the upstream system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorType {
    ValidationError,
    AuthenticationError,
    ServiceError,
    ConnectionError,
    RateLimitError,
    InternalError,
}

/// Standard response body, used for every `/process-event` answer.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable outcome description.
    pub message: String,

    /// Technical error detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Error classification.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub error_type: Option<ErrorType>,
}

/// Error surfaced to the inbound HTTP caller.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing or wrong inbound bearer token.
    #[error("Invalid access token")]
    InvalidToken,

    /// Inbound payload failed schema validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Unknown path.
    #[error("Resource not found")]
    NotFound,

    /// Known path, wrong method.
    #[error("Method not allowed")]
    MethodNotAllowed,

    /// Failure from the outbound WTL call, already classified.
    #[error(transparent)]
    Wtl(#[from] WtlError),

    /// Unexpected local fault.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ApiError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidToken => StatusCode::UNAUTHORIZED,
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Wtl(err) => match err {
                WtlError::Connection { .. } => StatusCode::SERVICE_UNAVAILABLE,
                WtlError::RateLimit { .. } => StatusCode::TOO_MANY_REQUESTS,
                WtlError::Service { .. }
                | WtlError::Authentication { .. }
                | WtlError::InvalidRequest(_)
                | WtlError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            },
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Taxonomy tag for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            ApiError::InvalidToken => ErrorType::AuthenticationError,
            ApiError::Validation(_) | ApiError::NotFound | ApiError::MethodNotAllowed => {
                ErrorType::ValidationError
            }
            ApiError::Wtl(err) => match err {
                WtlError::Service { .. } => ErrorType::ServiceError,
                WtlError::Connection { .. } => ErrorType::ConnectionError,
                WtlError::Authentication { .. } => ErrorType::AuthenticationError,
                WtlError::RateLimit { .. } => ErrorType::RateLimitError,
                WtlError::InvalidRequest(_) | WtlError::Internal { .. } => ErrorType::InternalError,
            },
            ApiError::Internal(_) => ErrorType::InternalError,
        }
    }

    /// The response body for this error.
    pub fn body(&self) -> ErrorResponse {
        let (message, error) = match self {
            ApiError::InvalidToken => {
                ("Invalid access token".to_string(), "Unauthorized".to_string())
            }
            ApiError::Validation(detail) => ("Validation failed".to_string(), detail.clone()),
            ApiError::NotFound => ("Resource not found".to_string(), "Not found".to_string()),
            ApiError::MethodNotAllowed => (
                "Method not allowed".to_string(),
                "Method not allowed".to_string(),
            ),
            ApiError::Wtl(err) => (err.message().to_string(), err.detail().to_string()),
            ApiError::Internal(detail) => ("Internal server error".to_string(), detail.clone()),
        };

        ErrorResponse {
            message,
            error: Some(error),
            error_type: Some(self.error_type()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(self.body());

        if status == StatusCode::UNAUTHORIZED {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
