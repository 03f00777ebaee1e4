//! REST API client module for Revolut X.
//!
//! Every call is built into a [`CanonicalRequest`], signed with the caller's
//! Ed25519 key, sent once through the client's [`Transport`] and classified
//! into an [`Outcome`].
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use revolutx::api::{RevolutXClient, TradesParams};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = RevolutXClient::new("api_key", "<hex, base64 or PEM private key>")?;
//!
//!     let pairs = client.get_currency_pairs().await?;
//!     println!("Pairs: {}", pairs);
//!
//!     let trades = client.get_trades(&TradesParams::new().with_symbol("BTC-EUR")).await?;
//!     println!("Trades: {}", trades);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Client Configuration
//!
//! ```rust,ignore
//! use revolutx::api::RevolutXClient;
//! use revolutx::auth::SeedPolicy;
//! use std::time::Duration;
//!
//! let client = RevolutXClient::builder("api_key", private_key)
//!     .timeout(Duration::from_secs(5))
//!     .seed_policy(SeedPolicy::Strict)
//!     .build()?;
//! ```
//!
//! # Error Handling
//!
//! ```rust,ignore
//! use revolutx::api::ApiError;
//!
//! match client.get_balances().await {
//!     Ok(balances) => println!("{}", balances),
//!     Err(ApiError::Authentication(e)) => println!("Rejected: {:?}", e.code),
//!     Err(ApiError::RateLimited(_)) => println!("Back off and retry later"),
//!     Err(e) => println!("Other error: {} (raw: {:?})", e, e.raw_body()),
//! }
//! ```

pub mod client;
pub mod endpoints;
pub mod error;
pub mod request;
pub mod response;
pub mod transport;
pub mod types;

// Re-export main types for convenience
pub use client::{RevolutXClient, RevolutXClientBuilder};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use request::{CanonicalRequest, HttpMethod, QueryParams};
pub use response::{classify, FailureKind, Outcome};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
pub use types::*;
