//! API credentials owned by the client.

use std::fmt;

use ed25519_dalek::{SigningKey, VerifyingKey};

use super::key::{normalize, Seed, SeedPolicy};
use super::signer::{sign_message, SignedEnvelope};
use super::KeyFormatError;
use crate::api::request::CanonicalRequest;

/// API key plus the Ed25519 signing key derived from the private key.
///
/// Immutable after construction. The signing key zeroizes itself on drop.
#[derive(Clone)]
pub struct Credentials {
    api_key: String,
    signing_key: SigningKey,
}

impl Credentials {
    /// Create credentials from an API key and a private key in any supported encoding.
    ///
    /// Uses [`SeedPolicy::Lenient`].
    ///
    /// # Errors
    ///
    /// Returns an error if the private key cannot be normalized to a 32-byte seed.
    pub fn new(api_key: impl Into<String>, private_key: &str) -> Result<Self, KeyFormatError> {
        Self::with_policy(api_key, private_key, SeedPolicy::default())
    }

    /// Create credentials with an explicit key normalization policy.
    ///
    /// # Errors
    ///
    /// Returns an error if the private key is rejected under `policy`.
    pub fn with_policy(
        api_key: impl Into<String>,
        private_key: &str,
        policy: SeedPolicy,
    ) -> Result<Self, KeyFormatError> {
        let seed = normalize(private_key, policy)?;
        Ok(Self::from_seed(api_key, &seed))
    }

    /// Create credentials from an already-normalized seed.
    pub fn from_seed(api_key: impl Into<String>, seed: &Seed) -> Self {
        Self {
            api_key: api_key.into(),
            signing_key: seed.signing_key(),
        }
    }

    /// Get the API key (public, safe to log).
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    /// Public half of the signing key, as registered with the exchange.
    pub fn verifying_key(&self) -> VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Sign a canonical request and produce its authentication headers.
    pub fn sign(&self, request: &CanonicalRequest) -> SignedEnvelope {
        SignedEnvelope {
            api_key: self.api_key.clone(),
            timestamp: request.timestamp.clone(),
            signature: sign_message(&self.signing_key, &request.canonical_string()),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &self.api_key)
            .field("signing_key", &"[REDACTED]")
            .finish()
    }
}
