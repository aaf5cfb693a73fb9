//! AES-256-CBC encryption and decryption for envelope payloads.
//!
//! Uses AES-256 in CBC mode with:
//! - 256-bit key
//! - 128-bit (16 byte) IV
//! - PKCS#7 padding
//!
//! There is no authentication tag. A wrong key is detected only because the
//! padding or the UTF-8 decoding of the result fails, and a wrong key will
//! occasionally get past both.

use crate::crypto::kdf::DerivedKey;
use crate::crypto::random::IV_LEN;
use crate::crypto::{CryptoError, Result};
use aes::Aes256;
use cbc::cipher::{block_padding::Pkcs7, BlockDecryptMut, BlockEncryptMut, KeyIvInit};

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// AES block size in bytes
pub const BLOCK_LEN: usize = 16;

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != IV_LEN {
        return Err(CryptoError::InvalidIvLength {
            expected: IV_LEN,
            got: iv.len(),
        });
    }
    Ok(())
}

/// Encrypt raw bytes with AES-256-CBC and PKCS#7 padding
///
/// The output is always a non-empty multiple of the block size; a full
/// padding block is appended when the input is already block aligned.
pub fn encrypt_bytes(plaintext: &[u8], key: &DerivedKey, iv: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;

    let cipher = Aes256CbcEnc::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| CryptoError::EncryptionFailed(format!("{}", e)))?;

    Ok(cipher.encrypt_padded_vec_mut::<Pkcs7>(plaintext))
}

/// Decrypt AES-256-CBC ciphertext and strip PKCS#7 padding
pub fn decrypt_bytes(ciphertext: &[u8], key: &DerivedKey, iv: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;

    if ciphertext.is_empty() || ciphertext.len() % BLOCK_LEN != 0 {
        return Err(CryptoError::DecryptionFailed(
            "Ciphertext is not a whole number of blocks".to_string(),
        ));
    }

    let cipher = Aes256CbcDec::new_from_slices(key.as_bytes(), iv)
        .map_err(|e| CryptoError::DecryptionFailed(format!("{}", e)))?;

    cipher
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| CryptoError::DecryptionFailed("Invalid padding".to_string()))
}

/// Encrypt a UTF-8 string
///
/// Convenience function that handles string-to-bytes conversion
pub fn encrypt(plaintext: &str, key: &DerivedKey, iv: &[u8]) -> Result<Vec<u8>> {
    encrypt_bytes(plaintext.as_bytes(), key, iv)
}

/// Decrypt to a UTF-8 string
///
/// Fails on bad padding or on bytes that are not valid UTF-8.
pub fn decrypt(ciphertext: &[u8], key: &DerivedKey, iv: &[u8]) -> Result<String> {
    let bytes = decrypt_bytes(ciphertext, key, iv)?;
    String::from_utf8(bytes).map_err(|_| CryptoError::DecryptionFailed("Invalid UTF-8".to_string()))
}
