//! URL validation and free-text URL detection.

pub mod scan;
pub mod validate;

pub use scan::extract_urls;
pub use validate::{validate_url, UrlError, UrlValidation, ValidatedUrl};
