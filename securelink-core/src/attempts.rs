//! Decryption attempt tracking.
//!
//! The counter is informational only: it is shown to discourage blind
//! guessing and never blocks a further attempt. It lives with whoever drives
//! the decryption flow and is passed in explicitly.

use crate::crypto::envelope::{self, EnvelopeError};
use crate::crypto::kdf::KdfParams;
use crate::{Result, SecureLinkError};
use tracing::info;

/// Failed decryption attempts against one token
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecryptionAttempts {
    failed: u32,
}

impl DecryptionAttempts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of failed attempts so far
    pub fn failed(&self) -> u32 {
        self.failed
    }

    /// Record a failed attempt and return the new total
    pub fn record_failure(&mut self) -> u32 {
        self.failed = self.failed.saturating_add(1);
        self.failed
    }

    /// Start counting again, e.g. for a different token
    pub fn reset(&mut self) {
        self.failed = 0;
    }

    /// User-facing message, present once an attempt has failed
    pub fn message(&self) -> Option<String> {
        match self.failed {
            0 => None,
            1 => Some("Incorrect password (1 attempt)".to_string()),
            n => Some(format!("Incorrect password ({} attempts)", n)),
        }
    }
}

/// Open a token and count the attempt if the password is rejected
///
/// An empty password is an input error: it is reported without touching
/// the counter, since no decryption was tried.
pub fn open_tracked(token: &str, password: &str, attempts: &mut DecryptionAttempts) -> Result<String> {
    open_tracked_with_params(token, password, &KdfParams::default(), attempts)
}

/// `open_tracked` with explicit KDF parameters, e.g. for legacy tokens
pub fn open_tracked_with_params(
    token: &str,
    password: &str,
    params: &KdfParams,
    attempts: &mut DecryptionAttempts,
) -> Result<String> {
    if password.is_empty() {
        return Err(SecureLinkError::InvalidInput(
            "Please enter the password".to_string(),
        ));
    }

    match envelope::open_with_params(token, password, params) {
        Ok(url) => Ok(url),
        Err(EnvelopeError::DecryptionFailed) => {
            let failed = attempts.record_failure();
            info!(failed, "decryption attempt rejected");
            Err(EnvelopeError::DecryptionFailed.into())
        }
        Err(e) => Err(e.into()),
    }
}
