//! Heuristic URL detection in free text such as clipboard contents.
//!
//! Not a full parser: exotic text may yield false positives or misses.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static SCHEME_URL: Lazy<Regex> = Lazy::new(|| Regex::new(r#"(?i)https?://[^\s<>"]+"#).unwrap());

static BARE_DOMAIN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(?:[A-Za-z0-9-]+\.)+[A-Za-z]{2,}$").unwrap());

/// Extract candidate URLs from arbitrary text
///
/// First every `http://` or `https://` run up to whitespace, `<`, `>` or
/// `"` is taken as is. Then every whitespace-delimited bare domain that is
/// not already part of a found URL becomes `https://<domain>`. Results keep
/// the order of first discovery with exact duplicates removed.
pub fn extract_urls(text: &str) -> Vec<String> {
    let mut found: Vec<String> = SCHEME_URL
        .find_iter(text)
        .map(|m| m.as_str().to_string())
        .collect();

    for token in text.split_whitespace() {
        if BARE_DOMAIN.is_match(token) && !found.iter().any(|url| url.contains(token)) {
            found.push(format!("https://{}", token));
        }
    }

    let mut seen = HashSet::new();
    found.retain(|url| seen.insert(url.clone()));
    found
}
