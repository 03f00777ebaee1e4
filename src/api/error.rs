//! API error types for the Revolut X REST client.

use std::fmt;

use serde_json::Value;
use thiserror::Error;

use crate::api::response::FailureKind;
use crate::auth::KeyFormatError;

/// API-specific error type for the Revolut X REST client.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Private key could not be normalized to a signing seed
    #[error("Key format error: {0}")]
    KeyFormat(#[from] KeyFormatError),

    /// Network, DNS or timeout failure; no response was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Signature or credentials rejected (401)
    #[error("Authentication failed: {0}")]
    Authentication(ErrorResponse),

    /// Too many requests (429)
    #[error("Rate limited: {0}")]
    RateLimited(ErrorResponse),

    /// Any other non-2xx status
    #[error("API error: {0}")]
    Api(ErrorResponse),

    /// 2xx response whose body is not JSON
    #[error("Deserialization error: {message}")]
    Deserialize { message: String, raw_body: String },

    /// Invalid parameter provided
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl ApiError {
    /// HTTP status of a classified failure.
    pub fn status_code(&self) -> Option<u16> {
        self.response().map(|r| r.status)
    }

    /// Exchange-provided error code, if the body carried one.
    pub fn api_error_code(&self) -> Option<&str> {
        self.response().and_then(|r| r.code.as_deref())
    }

    /// Raw response body, when a response was received.
    pub fn raw_body(&self) -> Option<&str> {
        match self {
            ApiError::Deserialize { raw_body, .. } => Some(raw_body),
            _ => self.response().map(|r| r.raw_body.as_str()),
        }
    }

    /// Failure category of a classified HTTP error.
    pub fn kind(&self) -> Option<FailureKind> {
        match self {
            ApiError::Authentication(_) => Some(FailureKind::Authentication),
            ApiError::RateLimited(_) => Some(FailureKind::RateLimit),
            ApiError::Api(_) => Some(FailureKind::Generic),
            _ => None,
        }
    }

    /// Whether a caller-level retry could plausibly succeed (429, 5xx, transport).
    ///
    /// The client itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            ApiError::Transport(_) | ApiError::RateLimited(_) => true,
            ApiError::Api(r) => r.status >= 500,
            _ => false,
        }
    }

    fn response(&self) -> Option<&ErrorResponse> {
        match self {
            ApiError::Authentication(r) | ApiError::RateLimited(r) | ApiError::Api(r) => Some(r),
            _ => None,
        }
    }
}

/// Result type alias for API operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Details of a non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Exchange error code, e.g. `AUTH_FAILED`
    pub code: Option<String>,
    /// Human-readable message, or the raw body when it was not JSON
    pub message: String,
    /// Full response body
    pub raw_body: String,
}

impl ErrorResponse {
    /// Parse an error body, falling back to the raw text as the message.
    ///
    /// Only a JSON object is read for `message` (or `error`) and `code`; any
    /// other shape keeps the raw body as the message and has no code.
    pub fn from_body(status: u16, body: &str) -> Self {
        let fields = match serde_json::from_str::<Value>(body) {
            Ok(Value::Object(fields)) => Some(fields),
            _ => None,
        };

        let code = fields
            .as_ref()
            .and_then(|f| f.get("code"))
            .and_then(value_text);
        let message = fields
            .as_ref()
            .and_then(|f| f.get("message").or_else(|| f.get("error")))
            .and_then(value_text)
            .unwrap_or_else(|| body.to_string());

        Self {
            status,
            code,
            message,
            raw_body: body.to_string(),
        }
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

impl fmt::Display for ErrorResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.code {
            Some(code) => write!(f, "{} [{}] {}", self.status, code, self.message),
            None => write!(f, "{} {}", self.status, self.message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_response_from_json() {
        let body = r#"{"message":"Invalid API Key","code":"AUTH_FAILED"}"#;
        let response = ErrorResponse::from_body(401, body);

        assert_eq!(response.status, 401);
        assert_eq!(response.code.as_deref(), Some("AUTH_FAILED"));
        assert_eq!(response.message, "Invalid API Key");
        assert_eq!(response.raw_body, body);
    }

    #[test]
    fn test_error_response_from_text() {
        let response = ErrorResponse::from_body(502, "Bad Gateway");
        assert_eq!(response.code, None);
        assert_eq!(response.message, "Bad Gateway");
        assert_eq!(response.raw_body, "Bad Gateway");
    }

    #[test]
    fn test_error_response_numeric_code() {
        let response = ErrorResponse::from_body(400, r#"{"message":"bad","code":3001}"#);
        assert_eq!(response.code.as_deref(), Some("3001"));
    }

    #[test]
    fn test_error_response_json_without_message() {
        let body = r#"{"detail":"nope"}"#;
        let response = ErrorResponse::from_body(400, body);
        assert_eq!(response.code, None);
        assert_eq!(response.message, body);
    }

    #[test]
    fn test_error_response_non_object_json() {
        let body = r#"["oops","E1"]"#;
        let response = ErrorResponse::from_body(400, body);
        assert_eq!(response.code, None);
        assert_eq!(response.message, body);

        let body = r#""maintenance""#;
        let response = ErrorResponse::from_body(503, body);
        assert_eq!(response.code, None);
        assert_eq!(response.message, body);
        assert_eq!(response.raw_body, body);
    }

    #[test]
    fn test_error_response_error_alias() {
        let response = ErrorResponse::from_body(400, r#"{"error":"bad symbol","code":"E2"}"#);
        assert_eq!(response.message, "bad symbol");
        assert_eq!(response.code.as_deref(), Some("E2"));
    }

    #[test]
    fn test_error_response_display() {
        let response = ErrorResponse::from_body(429, r#"{"message":"slow down","code":"RATE"}"#);
        assert_eq!(response.to_string(), "429 [RATE] slow down");
    }

    #[test]
    fn test_accessors() {
        let err = ApiError::Authentication(ErrorResponse::from_body(
            401,
            r#"{"message":"Invalid API Key","code":"AUTH_FAILED"}"#,
        ));
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.api_error_code(), Some("AUTH_FAILED"));
        assert_eq!(err.kind(), Some(FailureKind::Authentication));
        assert!(!err.is_retryable());

        let err = ApiError::Transport("connection refused".to_string());
        assert_eq!(err.status_code(), None);
        assert_eq!(err.raw_body(), None);
        assert_eq!(err.kind(), None);
        assert!(err.is_retryable());
    }

    #[test]
    fn test_retryable_statuses() {
        assert!(ApiError::RateLimited(ErrorResponse::from_body(429, "")).is_retryable());
        assert!(ApiError::Api(ErrorResponse::from_body(503, "")).is_retryable());
        assert!(!ApiError::Api(ErrorResponse::from_body(404, "")).is_retryable());
    }

    #[test]
    fn test_key_format_conversion() {
        let err: ApiError = KeyFormatError::InvalidLength { actual: 5 }.into();
        assert!(matches!(err, ApiError::KeyFormat(KeyFormatError::InvalidLength { actual: 5 })));
    }

    #[test]
    fn test_deserialize_keeps_raw_body() {
        let err = ApiError::Deserialize {
            message: "expected value".to_string(),
            raw_body: "<html>".to_string(),
        };
        assert_eq!(err.raw_body(), Some("<html>"));
    }
}
