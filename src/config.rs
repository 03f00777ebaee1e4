//! Environment-driven client configuration.
//!
//! | Variable                | Required | Default                    |
//! |-------------------------|----------|----------------------------|
//! | `REVOLUTX_API_KEY`      | yes      |                            |
//! | `REVOLUTX_PRIVATE_KEY`  | yes      |                            |
//! | `REVOLUTX_BASE_URL`     | no       | `https://revx.revolut.com` |
//! | `REVOLUTX_TIMEOUT_SECS` | no       | `10`                       |
//! | `REVOLUTX_STRICT_KEY`   | no       | `false`                    |

use std::fmt;
use std::time::Duration;

use thiserror::Error;
use zeroize::Zeroizing;

use crate::auth::SeedPolicy;
use crate::network::{DEFAULT_API_URL, DEFAULT_TIMEOUT};

pub const API_KEY_VAR: &str = "REVOLUTX_API_KEY";
pub const PRIVATE_KEY_VAR: &str = "REVOLUTX_PRIVATE_KEY";
pub const BASE_URL_VAR: &str = "REVOLUTX_BASE_URL";
pub const TIMEOUT_VAR: &str = "REVOLUTX_TIMEOUT_SECS";
pub const STRICT_KEY_VAR: &str = "REVOLUTX_STRICT_KEY";

/// Errors raised while reading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    #[error("Invalid value for {name}: {reason}")]
    InvalidValue { name: &'static str, reason: String },
}

/// Everything needed to construct a client.
#[derive(Clone)]
pub struct ClientConfig {
    pub api_key: String,
    /// Private key in any supported encoding
    pub private_key: Zeroizing<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub seed_policy: SeedPolicy,
}

impl ClientConfig {
    /// Config with defaults for everything but the credentials.
    pub fn new(api_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            private_key: Zeroizing::new(private_key.into()),
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            seed_policy: SeedPolicy::default(),
        }
    }

    /// Load `.env` if present, then read the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value is malformed.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!(error = %e, "Failed to load .env file");
            }
        }
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`ClientConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnvVar(name))
        };

        let mut config = Self::new(required(API_KEY_VAR)?, required(PRIVATE_KEY_VAR)?);

        if let Some(base_url) = lookup(BASE_URL_VAR).filter(|v| !v.trim().is_empty()) {
            config.base_url = base_url.trim().to_string();
        }

        if let Some(raw) = lookup(TIMEOUT_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|e| ConfigError::InvalidValue {
                name: TIMEOUT_VAR,
                reason: format!("{}", e),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidValue {
                    name: TIMEOUT_VAR,
                    reason: "timeout must be positive".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(STRICT_KEY_VAR) {
            if parse_flag(STRICT_KEY_VAR, &raw)? {
                config.seed_policy = SeedPolicy::Strict;
            }
        }

        Ok(config)
    }
}

fn parse_flag(name: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "" | "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            name,
            reason: format!("expected a boolean, got '{}'", other),
        }),
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("api_key", &self.api_key)
            .field("private_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("seed_policy", &self.seed_policy)
            .finish()
    }
}
