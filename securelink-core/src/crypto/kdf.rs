//! PBKDF2 key derivation for envelope passwords.
//!
//! Parameters:
//! - PRF: HMAC-SHA256 (HMAC-SHA1 for tokens from older CryptoJS builds)
//! - Iterations: 10,000
//! - Output length: 32 bytes (256 bits)
//! - Salt length: 16 bytes

use pbkdf2::pbkdf2_hmac;
use serde::{Deserialize, Serialize};
use sha1::Sha1;
use sha2::Sha256;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Fixed PBKDF2 iteration count
pub const PBKDF2_ITERATIONS: u32 = 10_000;

/// Derived key length in bytes
pub const KEY_LEN: usize = 32;

/// Pseudorandom function driving PBKDF2
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Prf {
    #[default]
    Sha256,
    /// CryptoJS used HMAC-SHA1 as its PBKDF2 default before 4.2
    Sha1,
}

/// Parameters for PBKDF2 key derivation
///
/// The iteration count is fixed; only the PRF can be chosen, so a token
/// can always be opened by re-deriving with the same parameters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KdfParams {
    prf: Prf,
}

impl KdfParams {
    /// Default parameters (HMAC-SHA256)
    pub fn new() -> Self {
        Self::default()
    }

    /// Parameters matching tokens sealed by the HMAC-SHA1 PBKDF2 default
    pub fn legacy() -> Self {
        Self { prf: Prf::Sha1 }
    }

    pub fn with_prf(prf: Prf) -> Self {
        Self { prf }
    }

    pub fn prf(&self) -> Prf {
        self.prf
    }

    pub fn iterations(&self) -> u32 {
        PBKDF2_ITERATIONS
    }
}

/// A 256-bit key derived from a password and salt
///
/// Never stored; recomputed for every seal and open. Wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct DerivedKey {
    key: [u8; KEY_LEN],
}

impl DerivedKey {
    /// Wrap raw key bytes (use with caution)
    pub fn from_bytes(key: [u8; KEY_LEN]) -> Self {
        Self { key }
    }

    /// Get the raw key bytes (use sparingly)
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.key
    }
}

impl fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("DerivedKey([REDACTED])")
    }
}

fn pbkdf2_into(prf: Prf, password: &[u8], salt: &[u8], rounds: u32, out: &mut [u8]) {
    match prf {
        Prf::Sha256 => pbkdf2_hmac::<Sha256>(password, salt, rounds, out),
        Prf::Sha1 => pbkdf2_hmac::<Sha1>(password, salt, rounds, out),
    }
}

/// Derive a 32-byte key from a password and salt
///
/// The password is taken as UTF-8 bytes. Identical inputs always yield the
/// identical key, which is what lets `open` reproduce the sealing key from
/// the salt carried in the token. Never fails; an empty password is
/// accepted here and rejected by callers.
pub fn derive_key(password: &str, salt: &[u8], params: &KdfParams) -> DerivedKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_into(params.prf, password.as_bytes(), salt, params.iterations(), &mut key);

    let derived = DerivedKey::from_bytes(key);
    key.zeroize();
    derived
}

/// Derive a key with the default parameters
pub fn derive(password: &str, salt: &[u8]) -> DerivedKey {
    derive_key(password, salt, &KdfParams::default())
}
