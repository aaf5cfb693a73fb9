//! Normalization and validation of user-supplied URLs.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Message for a valid URL
pub const VALID_URL: &str = "Valid URL";

/// Scheme prepended to input that has none
pub const DEFAULT_SCHEME_PREFIX: &str = "https://";

/// Reasons a URL is rejected before encryption
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlError {
    #[error("URL is required")]
    Required,

    #[error("Invalid URL format")]
    InvalidFormat,
}

/// Outcome of validating one raw URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UrlValidation {
    pub valid: bool,
    /// The scheme-prefixed form, present only when valid
    pub normalized: Option<String>,
    pub message: String,
}

impl UrlValidation {
    /// Whether the caller should replace its displayed value
    pub fn differs_from(&self, raw: &str) -> bool {
        self.normalized
            .as_deref()
            .is_some_and(|normalized| normalized != raw.trim())
    }
}

/// A URL with an explicit `http://` or `https://` scheme that parses
///
/// Only constructible through validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ValidatedUrl(String);

impl ValidatedUrl {
    /// Validate and normalize a raw URL string
    pub fn parse(raw: &str) -> Result<Self, UrlError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(UrlError::Required);
        }

        let candidate = if has_http_scheme(trimmed) {
            trimmed.to_string()
        } else {
            format!("{}{}", DEFAULT_SCHEME_PREFIX, trimmed)
        };

        ::url::Url::parse(&candidate).map_err(|_| UrlError::InvalidFormat)?;
        Ok(Self(candidate))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ValidatedUrl {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ValidatedUrl {
    type Err = UrlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

fn has_http_scheme(s: &str) -> bool {
    let starts_with = |prefix: &str| {
        s.get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
    };
    starts_with("http://") || starts_with("https://")
}

/// Validate a raw URL string
///
/// Empty input is "URL is required". Input without an `http://` or
/// `https://` prefix gets `https://` prepended before parsing. The
/// normalized value is the prefixed text as typed, not the parser's
/// re-serialization (which would add a trailing slash, lowercase the host
/// and so on).
pub fn validate_url(raw: &str) -> UrlValidation {
    match ValidatedUrl::parse(raw) {
        Ok(url) => UrlValidation {
            valid: true,
            normalized: Some(url.into_string()),
            message: VALID_URL.to_string(),
        },
        Err(e) => UrlValidation {
            valid: false,
            normalized: None,
            message: e.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_domain_gets_https() {
        let result = validate_url("example.com");
        assert!(result.valid);
        assert_eq!(result.normalized.as_deref(), Some("https://example.com"));
        assert_eq!(result.message, "Valid URL");
        assert!(result.differs_from("example.com"));
    }

    #[test]
    fn test_explicit_scheme_is_kept() {
        let result = validate_url("http://example.com/path?q=1");
        assert!(result.valid);
        assert_eq!(result.normalized.as_deref(), Some("http://example.com/path?q=1"));
        assert!(!result.differs_from("http://example.com/path?q=1"));

        let result = validate_url("HTTPS://Example.com");
        assert_eq!(result.normalized.as_deref(), Some("HTTPS://Example.com"));
    }

    #[test]
    fn test_empty_is_required() {
        let result = validate_url("");
        assert!(!result.valid);
        assert_eq!(result.normalized, None);
        assert_eq!(result.message, "URL is required");

        assert_eq!(ValidatedUrl::parse("   "), Err(UrlError::Required));
    }

    #[test]
    fn test_invalid_format() {
        let result = validate_url("not a url");
        assert!(!result.valid);
        assert_eq!(result.message, "Invalid URL format");

        assert_eq!(ValidatedUrl::parse("https://"), Err(UrlError::InvalidFormat));
        assert_eq!(ValidatedUrl::parse("exa mple.com"), Err(UrlError::InvalidFormat));
    }

    #[test]
    fn test_input_is_trimmed() {
        let url = ValidatedUrl::parse("  example.com/a \n").unwrap();
        assert_eq!(url.as_str(), "https://example.com/a");
    }

    #[test]
    fn test_from_str_and_display() {
        let url: ValidatedUrl = "sub.example.org".parse().unwrap();
        assert_eq!(url.to_string(), "https://sub.example.org");
        assert_eq!(url.as_ref(), "https://sub.example.org");
    }
}
