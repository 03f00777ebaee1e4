//! Request signing.
//!
//! The signed message is the plain concatenation, with no separators, of
//! `timestamp + METHOD + path + query + body`. The signature is the base64
//! encoding of the 64-byte Ed25519 signature over its UTF-8 bytes.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use ed25519_dalek::{Signer, SigningKey};

use super::key::Seed;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-Revx-API-Key";
/// Header carrying the millisecond timestamp.
pub const TIMESTAMP_HEADER: &str = "X-Revx-Timestamp";
/// Header carrying the base64 signature.
pub const SIGNATURE_HEADER: &str = "X-Revx-Signature";

/// Build the exact string that gets signed.
pub fn canonical_message(
    timestamp: &str,
    method: &str,
    path: &str,
    query: &str,
    body: &str,
) -> String {
    format!(
        "{}{}{}{}{}",
        timestamp,
        method.to_ascii_uppercase(),
        path,
        query,
        body
    )
}

/// Sign a request with a raw seed and return the base64 signature.
///
/// Ed25519 is deterministic: identical inputs always give identical output.
pub fn sign(
    seed: &Seed,
    timestamp: &str,
    method: &str,
    path: &str,
    query: &str,
    body: &str,
) -> String {
    let message = canonical_message(timestamp, method, path, query, body);
    sign_message(&seed.signing_key(), &message)
}

pub(crate) fn sign_message(key: &SigningKey, message: &str) -> String {
    BASE64.encode(key.sign(message.as_bytes()).to_bytes())
}

/// Authentication headers for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub api_key: String,
    pub timestamp: String,
    pub signature: String,
}

impl SignedEnvelope {
    /// All headers to attach, including `Content-Type`.
    pub fn headers(&self) -> [(&'static str, String); 4] {
        [
            (API_KEY_HEADER, self.api_key.clone()),
            (TIMESTAMP_HEADER, self.timestamp.clone()),
            (SIGNATURE_HEADER, self.signature.clone()),
            ("Content-Type", "application/json".to_string()),
        ]
    }
}
