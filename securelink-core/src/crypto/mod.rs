//! Cryptographic primitives for SecureLink envelopes.
//!
//! This module provides:
//! - PBKDF2 key derivation
//! - AES-256-CBC encryption/decryption
//! - Envelope token sealing and opening
//! - Password strength scoring and generation

pub mod cipher;
pub mod envelope;
pub mod kdf;
pub mod password;
pub mod random;
pub mod strength;

pub use cipher::{decrypt, encrypt};
pub use envelope::{open, seal, EnvelopeError, EnvelopeRecord};
pub use kdf::{derive, derive_key, DerivedKey, KdfParams, Prf};
pub use password::generate_password;
pub use random::{generate_iv, generate_salt, IV_LEN, SALT_LEN};
pub use strength::{score_password, StrengthLevel, StrengthResult};

use thiserror::Error;

/// Errors that can occur in cryptographic operations
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("Invalid IV length: expected {expected}, got {got}")]
    InvalidIvLength { expected: usize, got: usize },
}

/// Result type for crypto operations
pub type Result<T> = std::result::Result<T, CryptoError>;
/// Alias for Result used by re-exports
pub type CryptoResult<T> = Result<T>;
