//! URL Normalization and Deduplication
//!
//! - Resolve relative hrefs found in listing cards against the site origin
//! - Deduplicate postings by URL, first occurrence wins

use crate::types::Posting;
use std::collections::HashSet;
use url::Url;

/// Resolve a card href against the site base URL.
///
/// Absolute URLs are returned unchanged; blank hrefs stay blank.
pub fn absolutize(base: &str, href: &str) -> String {
    let href = href.trim();
    if href.is_empty() {
        return String::new();
    }
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }

    Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| href.to_string())
}

/// Outcome of deduplicating a batch of postings
#[derive(Debug, Default)]
pub struct Deduplicated {
    pub postings: Vec<Posting>,
    pub duplicates: usize,
    pub missing_url: usize,
}

/// Keep the first posting seen for each URL, preserving encounter order.
///
/// Postings without a URL cannot be identified and are dropped.
pub fn dedupe_by_url(postings: Vec<Posting>) -> Deduplicated {
    let mut seen: HashSet<String> = HashSet::new();
    let mut result = Deduplicated::default();

    for posting in postings {
        let key = posting.url.trim();
        if key.is_empty() {
            result.missing_url += 1;
            continue;
        }
        if seen.insert(key.to_string()) {
            result.postings.push(posting);
        } else {
            result.duplicates += 1;
        }
    }

    result
}
