//! # Revolut X Rust SDK
//!
//! A Rust SDK for the Revolut X crypto exchange REST API.
//!
//! ## Modules
//!
//! - [`auth`]: Private key normalization and Ed25519 request signing
//! - [`api`]: REST API client, request canonicalization and response classification
//! - [`config`]: Environment-driven client configuration
//! - [`network`]: Base URL, version prefix and timeout constants
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use revolutx::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env()?;
//!     let client = RevolutXClient::from_config(&config)?;
//!
//!     let balances = client.get_balances().await?;
//!     println!("Balances: {}", balances);
//!
//!     Ok(())
//! }
//! ```

// ============================================================================
// MODULES
// ============================================================================

/// Network URL constants.
pub mod network;

/// Key normalization, credentials and request signing.
pub mod auth;

/// REST API client module.
pub mod api;

/// Client configuration loaded from the environment.
pub mod config;

// ============================================================================
// PRELUDE
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use revolutx::prelude::*;
/// ```
pub mod prelude {
    // API module exports
    pub use crate::api::{
        classify, ApiError, ApiResult, CanonicalRequest, CandlesParams, ErrorResponse,
        FailureKind, HttpMethod, Outcome, QueryParams, RevolutXClient, RevolutXClientBuilder,
        TradesParams, Transport,
    };

    // Auth module exports
    pub use crate::auth::{Credentials, KeyFormatError, Seed, SeedPolicy, SignedEnvelope};

    // Configuration
    pub use crate::config::{ClientConfig, ConfigError};

    // Network constants
    pub use crate::network::{API_PREFIX, DEFAULT_API_URL, DEFAULT_TIMEOUT};
}
