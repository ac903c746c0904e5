//! Per-upload request signing.
//!
//! The host accepts an upload when `signature` is the lowercase hex
//! HMAC-SHA256 of `account_id ‖ timestamp`, keyed with the private key, and
//! `expire` has not passed. A signature is minted for every attempt.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::MediaError;

type HmacSha256 = Hmac<Sha256>;

/// Signature fields sent with one upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadSignature {
    pub signature: String,
    pub timestamp: i64,
    pub expire: i64,
}

/// Sign `account_id ‖ timestamp`, valid for `ttl_secs`.
///
/// # Errors
///
/// Returns [`MediaError::Credentials`] when the key or account id is empty.
pub fn sign(
    private_key: &str,
    account_id: &str,
    timestamp: i64,
    ttl_secs: u64,
) -> Result<UploadSignature, MediaError> {
    if private_key.is_empty() || account_id.is_empty() {
        return Err(MediaError::Credentials);
    }
    let ttl = i64::try_from(ttl_secs).unwrap_or(i64::MAX);
    Ok(UploadSignature {
        signature: hmac_hex(private_key, &format!("{account_id}{timestamp}"))?,
        timestamp,
        expire: timestamp.saturating_add(ttl),
    })
}

fn hmac_hex(key: &str, message: &str) -> Result<String, MediaError> {
    let mut mac =
        HmacSha256::new_from_slice(key.as_bytes()).map_err(|_| MediaError::Credentials)?;
    mac.update(message.as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
