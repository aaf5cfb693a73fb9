//! Sealing many URLs under one password: pasted lists and scanned
//! clipboard selections.

use crate::crypto::envelope;
use crate::link::{build_share_link, ShareLink};
use crate::urls::ValidatedUrl;
use crate::{EnvelopeError, Result, SecureLinkError};
use rayon::prelude::*;
use tracing::{info, warn};

fn non_blank_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Count valid URLs in newline-separated text
///
/// Returns `(valid, total)` over the non-blank lines.
pub fn count_valid_lines(text: &str) -> (usize, usize) {
    non_blank_lines(text).fold((0, 0), |(valid, total), line| {
        let ok = ValidatedUrl::parse(line).is_ok();
        (valid + usize::from(ok), total + 1)
    })
}

/// Summary line for a pasted list, e.g. "2 valid URLs detected (3 total)"
pub fn describe_line_count(text: &str) -> String {
    let (valid, total) = count_valid_lines(text);
    format!("{} valid URLs detected ({} total)", valid, total)
}

fn seal_to_link(url: &ValidatedUrl, password: &str, base: &str) -> Result<ShareLink> {
    let token = envelope::seal(url, password)?;
    let link = build_share_link(base, &token)?;
    Ok(ShareLink {
        original: url.to_string(),
        token,
        link,
    })
}

fn seal_validated(urls: &[ValidatedUrl], password: &str, base: &str) -> Result<Vec<ShareLink>> {
    // Checked up front so a bad base fails the whole batch instead of every item
    build_share_link(base, "")?;

    let links: Vec<ShareLink> = urls
        .par_iter()
        .filter_map(|url| match seal_to_link(url, password, base) {
            Ok(link) => Some(link),
            Err(e) => {
                warn!(error = %e, "skipping URL that failed to seal");
                None
            }
        })
        .collect();

    if links.is_empty() {
        return Err(EnvelopeError::EncryptionFailed("no URL could be sealed".to_string()).into());
    }

    info!(count = links.len(), "sealed URLs");
    Ok(links)
}

/// Seal one URL and build its share link
pub fn seal_one(raw_url: &str, password: &str, base: &str) -> Result<ShareLink> {
    if raw_url.trim().is_empty() || password.is_empty() {
        return Err(SecureLinkError::InvalidInput(
            "Please enter both URL and password".to_string(),
        ));
    }

    let url = ValidatedUrl::parse(raw_url)?;
    seal_to_link(&url, password, base)
}

/// Seal every valid line of newline-separated text
///
/// Invalid lines are skipped. Each URL gets its own salt and IV.
pub fn seal_lines(text: &str, password: &str, base: &str) -> Result<Vec<ShareLink>> {
    if text.trim().is_empty() || password.is_empty() {
        return Err(SecureLinkError::InvalidInput(
            "Please enter URLs and password".to_string(),
        ));
    }

    let urls: Vec<ValidatedUrl> = non_blank_lines(text)
        .filter_map(|line| ValidatedUrl::parse(line).ok())
        .collect();

    if urls.is_empty() {
        return Err(SecureLinkError::InvalidInput("No valid URLs found".to_string()));
    }

    seal_validated(&urls, password, base)
}

/// Seal an already selected list of URLs, such as those picked from a
/// clipboard scan
pub fn seal_all<S: AsRef<str>>(urls: &[S], password: &str, base: &str) -> Result<Vec<ShareLink>> {
    if password.is_empty() {
        return Err(SecureLinkError::InvalidInput("Please enter a password".to_string()));
    }
    if urls.is_empty() {
        return Err(SecureLinkError::InvalidInput(
            "Please select URLs to encrypt".to_string(),
        ));
    }

    let urls: Vec<ValidatedUrl> = urls
        .iter()
        .filter_map(|url| ValidatedUrl::parse(url.as_ref()).ok())
        .collect();

    if urls.is_empty() {
        return Err(SecureLinkError::InvalidInput("No valid URLs found".to_string()));
    }

    seal_validated(&urls, password, base)
}
