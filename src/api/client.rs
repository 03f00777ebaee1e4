//! Revolut X REST API client implementation.
//!
//! The [`RevolutXClient`] signs every request with the caller's Ed25519 key and
//! dispatches it through a client-owned [`Transport`].
//!
//! # Example
//!
//! ```rust,ignore
//! use revolutx::api::RevolutXClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RevolutXClient::new("api_key", &std::env::var("REVOLUTX_PRIVATE_KEY")?)?;
//!
//!     let balances = client.get_balances().await?;
//!     println!("Balances: {}", balances);
//!
//!     Ok(())
//! }
//! ```

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::header::HeaderValue;
use serde_json::Value;
use zeroize::Zeroizing;

use crate::api::error::{ApiError, ApiResult};
use crate::api::request::{CanonicalRequest, HttpMethod, QueryParams};
use crate::api::response::{classify, Outcome};
use crate::api::transport::{HttpRequest, ReqwestTransport, Transport};
use crate::auth::{Credentials, SeedPolicy};
use crate::config::ClientConfig;
use crate::network::{DEFAULT_API_URL, DEFAULT_TIMEOUT};

/// Builder for configuring [`RevolutXClient`].
#[derive(Clone)]
pub struct RevolutXClientBuilder {
    api_key: String,
    private_key: Zeroizing<String>,
    base_url: String,
    timeout: Duration,
    seed_policy: SeedPolicy,
    transport: Option<Arc<dyn Transport>>,
}

impl RevolutXClientBuilder {
    /// Create a new builder from an API key and a private key in any supported encoding.
    pub fn new(api_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            private_key: Zeroizing::new(private_key.into()),
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            seed_policy: SeedPolicy::default(),
            transport: None,
        }
    }

    /// Set the base URL (scheme and host, no path).
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the per-call timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout in seconds.
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Set the private key normalization policy.
    pub fn seed_policy(mut self, policy: SeedPolicy) -> Self {
        self.seed_policy = policy;
        self
    }

    /// Use a custom transport instead of the default `reqwest` one.
    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key cannot be normalized, the API key
    /// is not a valid header value, or the HTTP client cannot be initialized.
    pub fn build(self) -> ApiResult<RevolutXClient> {
        HeaderValue::from_str(&self.api_key)
            .map_err(|e| ApiError::InvalidParameter(format!("Invalid API key: {}", e)))?;

        let credentials = Credentials::with_policy(
            self.api_key.as_str(),
            self.private_key.as_str(),
            self.seed_policy,
        )?;

        let transport: Arc<dyn Transport> = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(self.timeout)?),
        };

        Ok(RevolutXClient {
            transport,
            credentials: Arc::new(credentials),
            base_url: self.base_url,
            timeout: self.timeout,
        })
    }
}

impl fmt::Debug for RevolutXClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevolutXClientBuilder")
            .field("api_key", &self.api_key)
            .field("private_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("seed_policy", &self.seed_policy)
            .field("custom_transport", &self.transport.is_some())
            .finish()
    }
}

/// Revolut X REST API client.
///
/// Cheap to clone; clones share the credentials and the connection pool.
/// Holds no mutable state, so one instance can serve concurrent callers.
#[derive(Clone)]
pub struct RevolutXClient {
    transport: Arc<dyn Transport>,
    credentials: Arc<Credentials>,
    base_url: String,
    timeout: Duration,
}

impl RevolutXClient {
    /// Create a new client with default settings (production URL, 10s timeout).
    ///
    /// # Errors
    ///
    /// Returns an error if the private key cannot be normalized or the HTTP
    /// client cannot be initialized.
    pub fn new(api_key: impl Into<String>, private_key: impl Into<String>) -> ApiResult<Self> {
        RevolutXClientBuilder::new(api_key, private_key).build()
    }

    /// Create a new client builder for custom configuration.
    pub fn builder(
        api_key: impl Into<String>,
        private_key: impl Into<String>,
    ) -> RevolutXClientBuilder {
        RevolutXClientBuilder::new(api_key, private_key)
    }

    /// Create a client from a loaded [`ClientConfig`].
    ///
    /// # Errors
    ///
    /// See [`RevolutXClientBuilder::build`].
    pub fn from_config(config: &ClientConfig) -> ApiResult<Self> {
        RevolutXClientBuilder::new(config.api_key.as_str(), config.private_key.as_str())
            .base_url(config.base_url.as_str())
            .timeout(config.timeout)
            .seed_policy(config.seed_policy)
            .build()
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Get the per-call timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Get the credentials this client signs with.
    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    /// Sign and send one request, then classify the response.
    ///
    /// `endpoint` may carry an embedded query string; `params` win on key
    /// collision. Exactly one HTTP request is issued; nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Transport`] if no response arrives within the
    /// timeout, or the classified failure for non-2xx responses.
    pub async fn send(
        &self,
        method: HttpMethod,
        endpoint: &str,
        params: Option<&QueryParams>,
        json_body: Option<&Value>,
    ) -> Outcome {
        let request = CanonicalRequest::build(method, endpoint, params, json_body)?;
        self.dispatch(&request).await
    }

    /// Sign and send an already-built request.
    ///
    /// # Errors
    ///
    /// See [`RevolutXClient::send`].
    pub async fn dispatch(&self, request: &CanonicalRequest) -> Outcome {
        let envelope = self.credentials.sign(request);
        let http_request = HttpRequest {
            method: request.method,
            url: request.url(&self.base_url),
            headers: envelope.headers().to_vec(),
            body: request.body().map(str::to_string),
        };

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            query_len = request.query.len(),
            body_len = request.body.len(),
            "Dispatching request"
        );

        let response =
            match tokio::time::timeout(self.timeout, self.transport.execute(http_request)).await {
                Ok(Ok(response)) => response,
                Ok(Err(e)) => {
                    tracing::error!(method = %request.method, path = %request.path, error = %e, "Transport failure");
                    return Err(ApiError::Transport(e.0));
                }
                Err(_) => {
                    tracing::error!(
                        method = %request.method,
                        path = %request.path,
                        timeout = ?self.timeout,
                        "Request timed out"
                    );
                    return Err(ApiError::Transport(format!(
                        "Request timed out after {:?}",
                        self.timeout
                    )));
                }
            };

        let outcome = classify(response.status, &response.body);
        match &outcome {
            Ok(_) => tracing::debug!(status = response.status, path = %request.path, "Request succeeded"),
            Err(e) => tracing::warn!(
                status = response.status,
                code = e.api_error_code().unwrap_or(""),
                path = %request.path,
                error = %e,
                "Request failed"
            ),
        }
        outcome
    }
}

impl fmt::Debug for RevolutXClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RevolutXClient")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::KeyFormatError;

    const ZERO_SEED_HEX: &str =
        "0000000000000000000000000000000000000000000000000000000000000000";

    #[test]
    fn test_client_creation() {
        let client = RevolutXClient::new("api_key", ZERO_SEED_HEX).unwrap();
        assert_eq!(client.base_url(), "https://revx.revolut.com");
        assert_eq!(client.timeout(), Duration::from_secs(10));
        assert_eq!(client.credentials().api_key(), "api_key");
    }

    #[test]
    fn test_client_builder() {
        let client = RevolutXClient::builder("api_key", ZERO_SEED_HEX)
            .base_url("http://localhost:8080/")
            .timeout_secs(3)
            .seed_policy(SeedPolicy::Strict)
            .build()
            .unwrap();

        // Base URL should have trailing slash removed
        assert_eq!(client.base_url(), "http://localhost:8080");
        assert_eq!(client.timeout(), Duration::from_secs(3));
    }

    #[test]
    fn test_bad_private_key() {
        let err = RevolutXClient::new("api_key", "abcd").unwrap_err();
        assert!(matches!(
            err,
            ApiError::KeyFormat(KeyFormatError::InvalidLength { actual: 2 })
        ));
    }

    #[test]
    fn test_strict_policy_applies() {
        let oversized = "ab".repeat(40);
        assert!(RevolutXClient::new("api_key", oversized.as_str()).is_ok());

        let err = RevolutXClient::builder("api_key", oversized)
            .seed_policy(SeedPolicy::Strict)
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ApiError::KeyFormat(KeyFormatError::Truncation { actual: 40 })
        ));
    }

    #[test]
    fn test_invalid_api_key_header() {
        let err = RevolutXClient::new("bad\nkey", ZERO_SEED_HEX).unwrap_err();
        assert!(matches!(err, ApiError::InvalidParameter(_)));
    }

    #[test]
    fn test_from_config() {
        let mut config = ClientConfig::new("api_key", ZERO_SEED_HEX);
        config.base_url = "http://127.0.0.1:9000".to_string();
        config.timeout = Duration::from_secs(2);

        let client = RevolutXClient::from_config(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:9000");
        assert_eq!(client.timeout(), Duration::from_secs(2));
    }

    #[test]
    fn test_debug_does_not_leak_key() {
        let secret = "cd".repeat(32);
        let builder = RevolutXClient::builder("api_key", secret.as_str());
        assert!(!format!("{:?}", builder).contains(&secret));

        let client = builder.build().unwrap();
        let debug_str = format!("{:?}", client);
        assert!(debug_str.contains("api_key"));
        assert!(!debug_str.contains("cdcd"));
    }
}
