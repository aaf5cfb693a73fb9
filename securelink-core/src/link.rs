//! Share links: carrying a token in the `data` query parameter of a page URL.

use serde::Serialize;
use thiserror::Error;

/// Query parameter that carries the token
pub const DATA_PARAM: &str = "data";

/// Base used when the caller does not name the page that opens tokens
pub const DEFAULT_SHARE_BASE: &str = "http://localhost:8080/";

/// Errors building a share link
#[derive(Error, Debug)]
pub enum LinkError {
    #[error("base URL is not valid: {0}")]
    InvalidBase(#[from] ::url::ParseError),

    #[error("base URL cannot carry a query")]
    CannotBeABase,
}

/// One sealed URL as presented to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShareLink {
    /// The normalized URL that was sealed
    pub original: String,
    /// The envelope token
    pub token: String,
    /// The shareable link carrying the token
    pub link: String,
}

/// Build a share link for a token
///
/// Any query or fragment already on `base` is dropped; the token is
/// percent-encoded into the `data` parameter.
pub fn build_share_link(base: &str, token: &str) -> Result<String, LinkError> {
    let mut url = ::url::Url::parse(base)?;
    if url.cannot_be_a_base() {
        return Err(LinkError::CannotBeABase);
    }

    url.set_fragment(None);
    url.set_query(None);
    url.query_pairs_mut().append_pair(DATA_PARAM, token);

    Ok(url.into())
}

/// Pull the decoded token out of a share link, if it carries one
pub fn token_from_link(link: &str) -> Option<String> {
    let url = ::url::Url::parse(link.trim()).ok()?;
    url.query_pairs()
        .find(|(key, _)| key == DATA_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.is_empty())
}

/// Accept either a share link or a bare token
pub fn resolve_token(input: &str) -> String {
    token_from_link(input).unwrap_or_else(|| input.trim().to_string())
}
