//! Random salt and IV generation backed by the operating system CSPRNG.

use rand::{rngs::OsRng, RngCore};

/// Salt length in bytes
pub const SALT_LEN: usize = 16;

/// AES block-sized initialization vector length in bytes
pub const IV_LEN: usize = 16;

/// Fill a fixed-size array with cryptographically secure random bytes.
///
/// `OsRng` holds no state of its own, so this is safe to call from any
/// number of threads at once.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut bytes = [0u8; N];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Generate a fresh salt for one envelope
pub fn generate_salt() -> [u8; SALT_LEN] {
    random_bytes()
}

/// Generate a fresh IV for one envelope
pub fn generate_iv() -> [u8; IV_LEN] {
    random_bytes()
}
