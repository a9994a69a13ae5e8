//! Error types and the API error envelope

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Application error with structured error code and details
///
/// Every failing request ends up as one of these. The message is safe to
/// show to the caller; anything sensitive stays in the server log.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// The error code identifying the type of error
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details (field-level errors, context, etc.)
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Create a new error with the default message for the error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    /// Create a new error with a custom message
    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry to this error
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    /// Get the HTTP status code for this error
    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    // ==================== Convenience constructors ====================

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Required fields are absent or falsy.
    ///
    /// The message matches what existing admin clients already look for.
    pub fn missing_fields<I, S>(fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let fields: Vec<Value> = fields.into_iter().map(|f| Value::String(f.into())).collect();
        Self::with_message(ErrorCode::RequiredField, "missing some fields")
            .with_detail("fields", Value::Array(fields))
    }

    /// Create a not authenticated error
    pub fn not_authenticated() -> Self {
        Self::new(ErrorCode::NotAuthenticated)
    }

    /// Create an invalid token error
    pub fn invalid_token(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::TokenInvalid, msg)
    }

    /// Generic database failure. Callers log the driver error themselves.
    pub fn database() -> Self {
        Self::new(ErrorCode::DatabaseError)
    }

    /// Check whether the error is server-side and worth a retry
    pub fn is_retryable(&self) -> bool {
        self.code.category() == ErrorCategory::System
    }
}

/// Unified API error envelope
///
/// Successful dish and menu responses are plain JSON documents; failures
/// always use this shape:
/// - `code`: Error code
/// - `message`: Human-readable message
/// - `data`: unused for errors
/// - `details`: Additional error details
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code (0 for success, non-zero for errors)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,
    /// Human-readable message
    pub message: String,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Additional error details (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl<T> ApiResponse<T> {
    /// Rebuild the [`AppError`] this envelope was produced from
    ///
    /// Unknown codes collapse into [`ErrorCode::Unknown`] so that a newer
    /// server never breaks an older client.
    pub fn into_app_error(self) -> AppError {
        let code = self
            .code
            .and_then(|c| ErrorCode::try_from(c).ok())
            .unwrap_or(ErrorCode::Unknown);
        AppError {
            code,
            message: self.message,
            details: self.details,
        }
    }
}

impl ApiResponse<()> {
    /// Create an error response from an AppError
    pub fn error(err: &AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message.clone(),
            data: None,
            details: err.details.clone(),
        }
    }
}

impl<T> From<AppError> for ApiResponse<T> {
    fn from(err: AppError) -> Self {
        Self {
            code: Some(err.code.code()),
            message: err.message,
            data: None,
            details: err.details,
        }
    }
}

/// Type alias for Result with AppError
pub type AppResult<T> = Result<T, AppError>;

// ===== Axum Integration =====

/// Logging happens where the failure is detected; the response only
/// carries the safe message.
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;

        let status = self.http_status();
        let body = ApiResponse::<()>::error(&self);
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_new() {
        let err = AppError::new(ErrorCode::DishNotFound);
        assert_eq!(err.code, ErrorCode::DishNotFound);
        assert_eq!(err.message, "Dish not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_app_error_with_detail() {
        let err = AppError::validation("Bad payload")
            .with_detail("field", "served_on")
            .with_detail("reason", "format");

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details.get("field").unwrap(), "served_on");
        assert_eq!(details.get("reason").unwrap(), "format");
    }

    #[test]
    fn test_missing_fields() {
        let err = AppError::missing_fields(["title", "meal"]);
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "missing some fields");
        assert_eq!(err.http_status(), StatusCode::BAD_REQUEST);
        let details = err.details.unwrap();
        assert_eq!(
            details.get("fields").unwrap(),
            &serde_json::json!(["title", "meal"])
        );
    }

    #[test]
    fn test_database_error_is_generic() {
        let err = AppError::database();
        assert_eq!(err.code, ErrorCode::DatabaseError);
        assert_eq!(err.message, "Database error");
        assert!(err.details.is_none());
        assert!(err.is_retryable());
        assert!(!AppError::missing_fields(["title"]).is_retryable());
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::with_message(ErrorCode::NotFound, "Dish 4 not found");
        assert_eq!(format!("{}", err), "Dish 4 not found");
    }

    #[test]
    fn test_api_response_error_serialize() {
        let err = AppError::database();
        let json = serde_json::to_value(ApiResponse::<()>::error(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": 9002, "message": "Database error"})
        );
    }

    #[test]
    fn test_api_response_into_app_error() {
        let json = r#"{"code":7,"message":"missing some fields","details":{"fields":["title"]}}"#;
        let response: ApiResponse<()> = serde_json::from_str(json).unwrap();
        let err = response.into_app_error();
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert!(err.details.unwrap().contains_key("fields"));

        let response: ApiResponse<()> =
            serde_json::from_str(r#"{"code":4242,"message":"?"}"#).unwrap();
        assert_eq!(response.into_app_error().code, ErrorCode::Unknown);
    }

    #[tokio::test]
    async fn test_into_response_database_error() {
        use axum::response::IntoResponse;
        use http_body_util::BodyExt;

        let response = AppError::database().into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"code": 9002, "message": "Database error"})
        );
    }

    #[test]
    fn test_retryable_follows_category() {
        assert!(AppError::new(ErrorCode::StorageUnavailable).is_retryable());
        assert!(!AppError::new(ErrorCode::DishNotFound).is_retryable());
        assert!(!AppError::invalid_token("Invalid token").is_retryable());
    }
}
