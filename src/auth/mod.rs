//! Authentication module for Revolut X.
//!
//! Every call to the exchange carries three headers derived from the caller's
//! credentials:
//!
//! 1. `X-Revx-API-Key` - the opaque API key
//! 2. `X-Revx-Timestamp` - milliseconds since the UNIX epoch
//! 3. `X-Revx-Signature` - base64 Ed25519 signature over
//!    `timestamp + METHOD + path + query + body`
//!
//! Private keys are accepted in several export formats and normalized to a
//! raw 32-byte seed by [`key::normalize`].

pub mod credentials;
pub mod key;
pub mod signer;

pub use credentials::Credentials;
pub use key::{normalize, normalize_bytes, Seed, SeedPolicy};
pub use signer::{canonical_message, sign, SignedEnvelope};

use thiserror::Error;

/// Errors raised while turning a private key into a signing seed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyFormatError {
    /// Decoded key cannot be forced to 32 bytes
    #[error("Invalid key length: decoded {actual} bytes, expected 32")]
    InvalidLength { actual: usize },

    /// Key contained a PEM armor that did not parse as PKCS#8 Ed25519
    #[error("Malformed PEM private key: {0}")]
    MalformedPem(String),

    /// Strict policy refused to truncate an oversized key
    #[error("Refusing to truncate {actual}-byte key to 32 bytes (strict key policy)")]
    Truncation { actual: usize },
}
