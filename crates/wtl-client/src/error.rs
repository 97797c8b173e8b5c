//! WTL client error types.
//!
//! Every failure of the outbound call is re-classified into one of these
//! variants at the client boundary; raw `reqwest` errors never escape this
//! crate. Each variant carries the caller-facing `message` and the
//! technical `error` detail separately so the response composer can map
//! them straight into the shared response shape.

use thiserror::Error;

/// Error from the WTL API client.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WtlError {
    /// The external system returned a business-level failure or an
    /// unexpected HTTP status.
    #[error("{message}: {error}")]
    Service { message: String, error: String },

    /// The external system was unreachable or the call timed out.
    #[error("{message}: {error}")]
    Connection { message: String, error: String },

    /// The external system rejected our credentials.
    #[error("{message}: {error}")]
    Authentication { message: String, error: String },

    /// The external system throttled the request.
    #[error("{message}: {error}")]
    RateLimit { message: String, error: String },

    /// The request failed local validation before any call was attempted.
    #[error("invalid sync request: {0}")]
    InvalidRequest(String),

    /// Unexpected local fault.
    #[error("{message}: {error}")]
    Internal { message: String, error: String },
}

impl WtlError {
    /// Create a service error with the standard caller-facing message.
    pub fn service(error: impl Into<String>) -> Self {
        WtlError::Service {
            message: "WTL service error".to_string(),
            error: error.into(),
        }
    }

    /// Create a connection error for an unreachable external system.
    pub fn connection(error: impl Into<String>) -> Self {
        WtlError::Connection {
            message: "Core service is not available".to_string(),
            error: error.into(),
        }
    }

    /// Create a timeout error. The fixed detail string is part of the
    /// response contract.
    pub fn timeout() -> Self {
        Self::connection("Connection timeout")
    }

    /// Create an authentication error for rejected external credentials.
    pub fn authentication(error: impl Into<String>) -> Self {
        WtlError::Authentication {
            message: "WTL API authentication failed".to_string(),
            error: error.into(),
        }
    }

    /// Create a rate-limit error.
    pub fn rate_limited() -> Self {
        WtlError::RateLimit {
            message: "Too many requests to API Core".to_string(),
            error: "Rate limit exceeded".to_string(),
        }
    }

    /// Create an internal error.
    pub fn internal(error: impl Into<String>) -> Self {
        WtlError::Internal {
            message: "Internal server error".to_string(),
            error: error.into(),
        }
    }

    /// The caller-facing message for this error.
    pub fn message(&self) -> &str {
        match self {
            WtlError::Service { message, .. }
            | WtlError::Connection { message, .. }
            | WtlError::Authentication { message, .. }
            | WtlError::RateLimit { message, .. }
            | WtlError::Internal { message, .. } => message,
            WtlError::InvalidRequest(_) => "Internal server error",
        }
    }

    /// The technical detail for this error.
    pub fn detail(&self) -> &str {
        match self {
            WtlError::Service { error, .. }
            | WtlError::Connection { error, .. }
            | WtlError::Authentication { error, .. }
            | WtlError::RateLimit { error, .. }
            | WtlError::Internal { error, .. } => error,
            WtlError::InvalidRequest(detail) => detail,
        }
    }
}

/// Result type for WTL client operations.
pub type WtlResult<T> = Result<T, WtlError>;
