//! Request canonicalization.
//!
//! [`CanonicalRequest`] holds the exact path, query string and body that are
//! both signed and transmitted. They are serialized once, here, so the bytes
//! on the wire can never drift from the bytes that were signed.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use serde::Serialize;
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};
use crate::auth::canonical_message;
use crate::network::API_PREFIX;

/// HTTP methods accepted by the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpMethod {
    /// Uppercase method name, as signed.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Patch => "PATCH",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            "PATCH" => Ok(HttpMethod::Patch),
            _ => Err(ApiError::InvalidParameter(format!(
                "Unsupported HTTP method: {}",
                s
            ))),
        }
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Patch => reqwest::Method::PATCH,
        }
    }
}

/// Ordered query parameters. Keys may repeat; order is preserved on encoding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter (builder style).
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.push(key, value);
        self
    }

    /// Append a parameter, keeping any existing entries for the same key.
    pub fn push(&mut self, key: impl Into<String>, value: impl ToString) {
        self.0.push((key.into(), value.to_string()));
    }

    /// Set a parameter, replacing existing entries in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl ToString) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter().position(|(k, _)| *k == key) {
            Some(index) => {
                self.0[index].1 = value;
                let mut seen = false;
                self.0.retain(|(k, _)| {
                    if *k != key {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.0.push((key, value)),
        }
    }

    /// First value for `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.iter().any(|(k, _)| k == key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Parse a URL-encoded query string (without the leading `?`).
    ///
    /// Entries with a blank value (`symbol=` or a bare `symbol`) are dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not valid form encoding.
    pub fn parse(query: &str) -> ApiResult<Self> {
        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(query)
            .map_err(|e| ApiError::InvalidParameter(format!("Invalid query string '{}': {}", query, e)))?;
        Ok(Self(pairs.into_iter().filter(|(_, v)| !v.is_empty()).collect()))
    }

    /// Build parameters from a serializable struct.
    ///
    /// `None`/`null` fields are skipped, arrays become repeated keys, and
    /// other scalars use their JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if `value` does not serialize to a flat JSON object.
    pub fn from_serializable<T: Serialize>(value: &T) -> ApiResult<Self> {
        let object = match serde_json::to_value(value) {
            Ok(Value::Object(object)) => object,
            Ok(other) => {
                return Err(ApiError::InvalidParameter(format!(
                    "Query parameters must serialize to an object, got {}",
                    other
                )))
            }
            Err(e) => return Err(ApiError::InvalidParameter(e.to_string())),
        };

        let mut params = Self::new();
        for (key, value) in object {
            match value {
                Value::Array(items) => {
                    for item in items {
                        params.push(key.clone(), scalar_text(&item)?);
                    }
                }
                other => {
                    if let Some(text) = optional_scalar_text(&other)? {
                        params.push(key, text);
                    }
                }
            }
        }
        Ok(params)
    }

    /// Merge `explicit` over these parameters.
    ///
    /// Keys in `explicit` win: every existing entry for such a key is dropped
    /// and the explicit entries take the position of the first one. Keys only
    /// in `explicit` are appended in their original order.
    pub fn merged_with(&self, explicit: &QueryParams) -> QueryParams {
        let mut merged = Vec::with_capacity(self.len() + explicit.len());
        let mut placed: HashSet<&str> = HashSet::new();

        for (key, value) in &self.0 {
            if !explicit.contains_key(key) {
                merged.push((key.clone(), value.clone()));
            } else if placed.insert(key.as_str()) {
                merged.extend(explicit.0.iter().filter(|(k, _)| k == key).cloned());
            }
        }
        merged.extend(
            explicit
                .0
                .iter()
                .filter(|(k, _)| !self.contains_key(k))
                .cloned(),
        );

        QueryParams(merged)
    }

    /// Encode as `application/x-www-form-urlencoded`.
    ///
    /// # Errors
    ///
    /// Returns an error if encoding fails.
    pub fn encode(&self) -> ApiResult<String> {
        serde_urlencoded::to_string(&self.0).map_err(|e| ApiError::InvalidParameter(e.to_string()))
    }
}

impl<K: Into<String>, V: ToString> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        QueryParams(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.to_string()))
                .collect(),
        )
    }
}

fn optional_scalar_text(value: &Value) -> ApiResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(_) | Value::Number(_) => Ok(Some(value.to_string())),
        Value::Array(_) | Value::Object(_) => Err(ApiError::InvalidParameter(format!(
            "Nested value cannot be a query parameter: {}",
            value
        ))),
    }
}

fn scalar_text(value: &Value) -> ApiResult<String> {
    optional_scalar_text(value)?.ok_or_else(|| {
        ApiError::InvalidParameter("null cannot be a query parameter".to_string())
    })
}

/// Resolve an endpoint to its signed path.
///
/// Paths already under `/api/` are used as-is; everything else is placed
/// under the version prefix.
pub fn resolve_path(endpoint: &str) -> String {
    if endpoint.starts_with("/api/") {
        endpoint.to_string()
    } else if endpoint.starts_with('/') {
        format!("{}{}", API_PREFIX, endpoint)
    } else {
        format!("{}/{}", API_PREFIX, endpoint)
    }
}

/// Current time in milliseconds since the UNIX epoch.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// The signable form of one request. Built fresh per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalRequest {
    /// Milliseconds since epoch, decimal
    pub timestamp: String,
    pub method: HttpMethod,
    /// Version-prefixed path, without query
    pub path: String,
    /// Encoded query string without `?`, empty if none
    pub query: String,
    /// Compact JSON body, empty if none
    pub body: String,
}

impl CanonicalRequest {
    /// Build a request stamped with the current time.
    ///
    /// # Errors
    ///
    /// Returns an error if the embedded query or params cannot be encoded.
    pub fn build(
        method: HttpMethod,
        endpoint: &str,
        params: Option<&QueryParams>,
        json_body: Option<&Value>,
    ) -> ApiResult<Self> {
        Self::build_at(current_timestamp_ms(), method, endpoint, params, json_body)
    }

    /// Build a request with a fixed timestamp.
    ///
    /// # Errors
    ///
    /// See [`CanonicalRequest::build`].
    pub fn build_at(
        timestamp_ms: i64,
        method: HttpMethod,
        endpoint: &str,
        params: Option<&QueryParams>,
        json_body: Option<&Value>,
    ) -> ApiResult<Self> {
        let (raw_path, embedded) = match endpoint.split_once('?') {
            Some((path, query)) => (path, QueryParams::parse(query)?),
            None => (endpoint, QueryParams::new()),
        };

        let merged = match params {
            Some(explicit) => embedded.merged_with(explicit),
            None => embedded,
        };

        let body = match json_body {
            Some(value) => serde_json::to_string(value)
                .map_err(|e| ApiError::InvalidParameter(format!("Unserializable body: {}", e)))?,
            None => String::new(),
        };

        Ok(Self {
            timestamp: timestamp_ms.to_string(),
            method,
            path: resolve_path(raw_path),
            query: merged.encode()?,
            body,
        })
    }

    /// The exact string that gets signed.
    pub fn canonical_string(&self) -> String {
        canonical_message(
            &self.timestamp,
            self.method.as_str(),
            &self.path,
            &self.query,
            &self.body,
        )
    }

    /// Full URL to transmit, built from the signed path and query.
    pub fn url(&self, base_url: &str) -> String {
        if self.query.is_empty() {
            format!("{}{}", base_url, self.path)
        } else {
            format!("{}{}?{}", base_url, self.path, self.query)
        }
    }

    /// Body to transmit, if any.
    pub fn body(&self) -> Option<&str> {
        (!self.body.is_empty()).then_some(self.body.as_str())
    }
}
