//! Envelope tokens: the transportable form of an encrypted URL.
//!
//! A token is the standard base64 encoding of a compact JSON record:
//!
//! ```text
//! {"salt":"<32 lowercase hex>","iv":"<32 lowercase hex>","encrypted":"<base64 ciphertext>"}
//! ```
//!
//! Salt and IV are fresh per seal. The key is re-derived from the password
//! and the carried salt on every open, so a token can be retried with other
//! passwords without being consumed.

#[cfg(test)]
mod tests;

use crate::crypto::cipher;
use crate::crypto::kdf::{derive_key, KdfParams};
use crate::crypto::random::{generate_iv, generate_salt, IV_LEN, SALT_LEN};
use crate::crypto::CryptoError;
use crate::urls::ValidatedUrl;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

/// Envelope failures as seen by callers
///
/// Opening deliberately reports a single variant whatever went wrong, so a
/// malformed token and a wrong password look the same from outside.
#[derive(Error, Debug)]
pub enum EnvelopeError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Incorrect password")]
    DecryptionFailed,
}

/// Why an open attempt failed. Only ever logged, never returned.
#[derive(Error, Debug)]
enum OpenFailure {
    #[error("token is not valid base64")]
    TokenEncoding,

    #[error("token does not hold an envelope record: {0}")]
    Record(#[from] serde_json::Error),

    #[error("{0} is not {1} lowercase hex-encoded bytes")]
    Field(&'static str, usize),

    #[error("ciphertext is not valid base64")]
    CiphertextEncoding,

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("decrypted payload is empty")]
    Empty,
}

/// The structured record carried inside a token
///
/// Field order is salt, iv, encrypted. Unknown fields are rejected and all
/// three fields are required.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EnvelopeRecord {
    /// Salt as lowercase hex
    pub salt: String,
    /// IV as lowercase hex
    pub iv: String,
    /// Ciphertext as standard base64
    pub encrypted: String,
}

impl EnvelopeRecord {
    fn new(salt: &[u8; SALT_LEN], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Self {
        Self {
            salt: hex::encode(salt),
            iv: hex::encode(iv),
            encrypted: STANDARD.encode(ciphertext),
        }
    }

    /// Serialize to JSON and base64 the result
    pub fn to_token(&self) -> Result<String, serde_json::Error> {
        let json = serde_json::to_string(self)?;
        Ok(STANDARD.encode(json))
    }

    #[cfg(test)]
    fn from_token(token: &str) -> Option<Self> {
        Self::parse_token(token).ok()
    }

    fn parse_token(token: &str) -> Result<Self, OpenFailure> {
        let json = STANDARD
            .decode(token.trim())
            .map_err(|_| OpenFailure::TokenEncoding)?;
        Ok(serde_json::from_slice(&json)?)
    }

    fn salt_bytes(&self) -> Result<[u8; SALT_LEN], OpenFailure> {
        decode_hex_field(&self.salt, "salt")
    }

    fn iv_bytes(&self) -> Result<[u8; IV_LEN], OpenFailure> {
        decode_hex_field(&self.iv, "iv")
    }

    fn ciphertext(&self) -> Result<Vec<u8>, OpenFailure> {
        STANDARD
            .decode(&self.encrypted)
            .map_err(|_| OpenFailure::CiphertextEncoding)
    }
}

// Only lowercase is accepted so that each token has exactly one decoding.
fn decode_hex_field<const N: usize>(value: &str, name: &'static str) -> Result<[u8; N], OpenFailure> {
    let well_formed = value.len() == N * 2
        && value
            .bytes()
            .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
    if !well_formed {
        return Err(OpenFailure::Field(name, N));
    }

    let mut bytes = [0u8; N];
    hex::decode_to_slice(value, &mut bytes).map_err(|_| OpenFailure::Field(name, N))?;
    Ok(bytes)
}

/// Seal a validated URL under a password with explicit KDF parameters
pub fn seal_with_params(
    url: &ValidatedUrl,
    password: &str,
    params: &KdfParams,
) -> Result<String, EnvelopeError> {
    let salt = generate_salt();
    let iv = generate_iv();
    let key = derive_key(password, &salt, params);

    let ciphertext = cipher::encrypt(url.as_str(), &key, &iv)
        .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;

    let token = EnvelopeRecord::new(&salt, &iv, &ciphertext)
        .to_token()
        .map_err(|e| EnvelopeError::EncryptionFailed(e.to_string()))?;

    debug!(token_len = token.len(), "sealed envelope");
    Ok(token)
}

/// Seal a validated URL under a password
///
/// Generates a fresh salt and IV, derives the key, encrypts the URL and
/// returns the base64 token.
pub fn seal(url: &ValidatedUrl, password: &str) -> Result<String, EnvelopeError> {
    seal_with_params(url, password, &KdfParams::default())
}

fn try_open(token: &str, password: &str, params: &KdfParams) -> Result<String, OpenFailure> {
    let record = EnvelopeRecord::parse_token(token)?;
    let salt = record.salt_bytes()?;
    let iv = record.iv_bytes()?;
    let ciphertext = record.ciphertext()?;

    let key = derive_key(password, &salt, params);
    let url = cipher::decrypt(&ciphertext, &key, &iv)?;

    if url.is_empty() {
        return Err(OpenFailure::Empty);
    }
    Ok(url)
}

/// Open a token with explicit KDF parameters
pub fn open_with_params(
    token: &str,
    password: &str,
    params: &KdfParams,
) -> Result<String, EnvelopeError> {
    try_open(token, password, params).map_err(|reason| {
        debug!(%reason, "envelope open failed");
        EnvelopeError::DecryptionFailed
    })
}

/// Open a token with a password and recover the URL
///
/// Every failure (bad base64, bad record, bad hex, bad padding, bad UTF-8,
/// empty result) is reported as `EnvelopeError::DecryptionFailed`.
pub fn open(token: &str, password: &str) -> Result<String, EnvelopeError> {
    open_with_params(token, password, &KdfParams::default())
}
