//! SecureLink Core Library
//!
//! Wraps a URL into a password-protected, self-contained text token and
//! recovers it again. This crate holds the cryptographic envelope together
//! with the password and URL helpers that feed it; front ends (the CLI, a
//! web page) only pass plain inputs in and render the results.

pub mod attempts;
pub mod batch;
pub mod crypto;
pub mod link;
pub mod platform;
pub mod settings;
pub mod urls;

pub use attempts::{open_tracked, open_tracked_with_params, DecryptionAttempts};
pub use batch::{count_valid_lines, describe_line_count, seal_all, seal_lines, seal_one};
pub use crypto::envelope::{open, seal, EnvelopeError, EnvelopeRecord};
pub use crypto::kdf::{derive, derive_key, DerivedKey, KdfParams, Prf};
pub use crypto::password::generate_password;
pub use crypto::strength::{score_password, StrengthLevel, StrengthResult};
pub use crypto::{CryptoError, CryptoResult};
pub use link::{build_share_link, resolve_token, token_from_link, LinkError, ShareLink};
pub use platform::{ensure_config_dir, get_config_dir, get_settings_path};
pub use settings::Settings;
pub use urls::{extract_urls, validate_url, UrlError, UrlValidation, ValidatedUrl};

use thiserror::Error;

/// Result type for SecureLink operations
pub type Result<T> = std::result::Result<T, SecureLinkError>;

/// General error type for SecureLink operations
#[derive(Error, Debug)]
pub enum SecureLinkError {
    #[error("Crypto error: {0}")]
    Crypto(#[from] crypto::CryptoError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),

    #[error(transparent)]
    Url(#[from] UrlError),

    #[error("Invalid link: {0}")]
    Link(#[from] LinkError),

    /// Missing password or URL, caught before any crypto runs
    #[error("{0}")]
    InvalidInput(String),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
