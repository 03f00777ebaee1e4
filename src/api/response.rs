//! Response classification.
//!
//! [`classify`] is a pure function from `(status, body)` to [`Outcome`]. It has
//! no side effects and can be exercised without any transport.

use serde_json::{Map, Value};

use crate::api::error::{ApiError, ApiResult, ErrorResponse};

/// Result of one dispatched call: the decoded JSON payload or a typed failure.
pub type Outcome = ApiResult<Value>;

/// Category of a non-2xx response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// 401
    Authentication,
    /// 429
    RateLimit,
    /// Every other non-2xx status
    Generic,
}

impl FailureKind {
    /// Category for a status, or `None` for 2xx.
    pub fn from_status(status: u16) -> Option<Self> {
        match status {
            200..=299 => None,
            401 => Some(FailureKind::Authentication),
            429 => Some(FailureKind::RateLimit),
            _ => Some(FailureKind::Generic),
        }
    }
}

/// Classify a raw HTTP response.
///
/// - 2xx with an empty or blank body is `Ok({})`
/// - 2xx with a JSON body is `Ok(json)`
/// - 2xx with any other body is [`ApiError::Deserialize`]
/// - 401, 429 and the rest map to [`ApiError::Authentication`],
///   [`ApiError::RateLimited`] and [`ApiError::Api`]
pub fn classify(status: u16, body: &str) -> Outcome {
    match FailureKind::from_status(status) {
        None => parse_success(body),
        Some(kind) => {
            let response = ErrorResponse::from_body(status, body);
            Err(match kind {
                FailureKind::Authentication => ApiError::Authentication(response),
                FailureKind::RateLimit => ApiError::RateLimited(response),
                FailureKind::Generic => ApiError::Api(response),
            })
        }
    }
}

fn parse_success(body: &str) -> Outcome {
    if body.trim().is_empty() {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_str(body).map_err(|e| ApiError::Deserialize {
        message: format!("Failed to deserialize response: {}", e),
        raw_body: body.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_success_is_empty_object() {
        assert_eq!(classify(200, "").unwrap(), json!({}));
        assert_eq!(classify(204, "  \n").unwrap(), json!({}));
    }

    #[test]
    fn test_json_success() {
        let value = classify(200, r#"[{"currency":"BTC","available":"1.5"}]"#).unwrap();
        assert_eq!(value[0]["currency"], "BTC");
    }

    #[test]
    fn test_non_json_success() {
        let err = classify(200, "<html>ok</html>").unwrap_err();
        assert!(matches!(err, ApiError::Deserialize { .. }));
        assert_eq!(err.raw_body(), Some("<html>ok</html>"));
    }

    #[test]
    fn test_authentication_failure() {
        let body = r#"{"message":"Invalid API Key","code":"AUTH_FAILED"}"#;
        let err = classify(401, body).unwrap_err();

        assert_eq!(err.kind(), Some(FailureKind::Authentication));
        assert_eq!(err.status_code(), Some(401));
        assert_eq!(err.api_error_code(), Some("AUTH_FAILED"));
        assert_eq!(err.raw_body(), Some(body));
    }

    #[test]
    fn test_rate_limit_failure() {
        let err = classify(429, "Too Many Requests").unwrap_err();
        assert!(matches!(err, ApiError::RateLimited(ref r) if r.message == "Too Many Requests"));
    }

    #[test]
    fn test_generic_failures() {
        for status in [100, 301, 400, 403, 404, 500, 503] {
            let err = classify(status, "{}").unwrap_err();
            assert_eq!(err.kind(), Some(FailureKind::Generic), "status {}", status);
            assert_eq!(err.status_code(), Some(status));
        }
    }

    #[test]
    fn test_from_status_is_total() {
        for status in 100u16..=599 {
            let expected = match status {
                200..=299 => None,
                401 => Some(FailureKind::Authentication),
                429 => Some(FailureKind::RateLimit),
                _ => Some(FailureKind::Generic),
            };
            assert_eq!(FailureKind::from_status(status), expected);
        }
    }
}
