//! Cryptographic verification of webhook signatures.
//!
//! Shopify signs every webhook delivery with HMAC-SHA256 over the raw request
//! body, keyed by the app's shared secret, and sends the digest as lowercase
//! hex in the `X-Shopify-Hmac-Sha256` header. This module recomputes that
//! digest and compares it in constant time.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Signature computation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// The secret could not be used as an HMAC key.
    #[error("invalid secret key")]
    InvalidSecret,
}

/// Checks a claimed webhook signature against the request body.
///
/// Returns `true` iff `shop_domain` is non-empty and `claimed_hmac` equals
/// the lowercase hex HMAC-SHA256 digest of `body` under `secret`. A missing
/// shop domain is a rejection in its own right and skips the digest
/// computation entirely.
///
/// Malformed input is never an error here, only a `false` result. The
/// function is pure and safe to call concurrently.
pub fn verify_webhook(secret: &[u8], shop_domain: &str, claimed_hmac: &str, body: &[u8]) -> bool {
    if shop_domain.is_empty() {
        // No shop claimed the delivery; nothing to verify against.
        return false;
    }

    let Ok(expected) = generate_hmac_hex(secret, body) else {
        return false;
    };

    timing_safe_eq(&expected, claimed_hmac)
}

/// Computes the HMAC-SHA256 digest of `payload` as lowercase hex.
///
/// This is the digest a well-behaved sender puts in the signature header; it
/// is exposed so tests and outbound callers can sign payloads. The result is
/// always 64 hex characters for the 256-bit digest.
///
/// # Errors
///
/// Returns `SignatureError::InvalidSecret` if the secret cannot be used as
/// an HMAC key.
pub fn generate_hmac_hex(secret: &[u8], payload: &[u8]) -> Result<String, SignatureError> {
    let mut mac =
        HmacSha256::new_from_slice(secret).map_err(|_| SignatureError::InvalidSecret)?;

    mac.update(payload);
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Constant-time string comparison.
///
/// Mismatch position must not be observable through timing; the digest side
/// of the comparison is secret-derived.
fn timing_safe_eq(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}
