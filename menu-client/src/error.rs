//! Client error types

use reqwest::StatusCode;
use shared::error::{ApiResponse, AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Authentication required or token rejected
    #[error("Authentication required")]
    Unauthorized,

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Validation error, with the server's error code
    #[error("Validation error: {message}")]
    Validation { code: ErrorCode, message: String },

    /// Server timed out or its storage is unavailable
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ClientError {
    /// Build an error from a non-success status and the raw response body
    pub fn from_response(status: StatusCode, body: &str) -> Self {
        let err = match serde_json::from_str::<ApiResponse<()>>(body) {
            Ok(envelope) => envelope.into_app_error(),
            Err(_) => AppError::with_message(ErrorCode::Unknown, body),
        };

        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
            StatusCode::NOT_FOUND => ClientError::NotFound(err.message),
            StatusCode::BAD_REQUEST => ClientError::Validation {
                code: err.code,
                message: err.message,
            },
            StatusCode::REQUEST_TIMEOUT | StatusCode::SERVICE_UNAVAILABLE => {
                ClientError::Unavailable(err.message)
            }
            // Storage-side failures reported as 500
            _ if err.is_retryable() => ClientError::Unavailable(err.message),
            _ => ClientError::Internal(err.message),
        }
    }

    /// Whether repeating the same request may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ClientError::Unavailable(_) | ClientError::Internal(_) => true,
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
