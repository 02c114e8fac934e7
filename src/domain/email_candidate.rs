use std::collections::{BTreeSet, HashSet};

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[a-zA-Z0-9_.+-]+@[a-zA-Z0-9-]+\.[a-zA-Z0-9.-]+").expect("valid email regex")
});

// Asset references such as "logo@2x.png" look like emails in raw markup
static ASSET_SUFFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\.(png|jpg|jpeg|gif|svg|webp|css|js|ico|woff|ttf|otf)(\?|$)")
        .expect("valid asset suffix regex")
});

// Version-like strings such as "v@2.0"
static NUMERIC_HOST_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@[0-9]+\.[0-9]+").expect("valid numeric host regex"));

/// Scans raw page text for email-shaped substrings.
///
/// Matches are deduplicated, asset and numeric-host false positives are
/// dropped, and when `allowed_domains` is non-empty only candidates whose
/// last dot-separated segment (lowercased) is in the set are kept.
///
/// The result is sorted so identical input always yields identical output.
pub fn extract_candidates(text: &str, allowed_domains: Option<&HashSet<String>>) -> Vec<String> {
    let allowed_domains = allowed_domains.filter(|domains| !domains.is_empty());

    EMAIL_REGEX
        .find_iter(text)
        .map(|m| m.as_str())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .filter(|candidate| !is_asset_reference(candidate))
        .filter(|candidate| !has_numeric_host(candidate))
        .filter(|candidate| match allowed_domains {
            Some(domains) => domains.contains(&top_level_domain(candidate)),
            None => true,
        })
        .map(|candidate| candidate.to_string())
        .collect()
}

pub fn is_asset_reference(candidate: &str) -> bool {
    ASSET_SUFFIX_REGEX.is_match(candidate)
}

pub fn has_numeric_host(candidate: &str) -> bool {
    NUMERIC_HOST_REGEX.is_match(candidate)
}

/// Text after the final "." in lowercase, or the whole candidate if it has no dot.
pub fn top_level_domain(candidate: &str) -> String {
    candidate
        .rsplit('.')
        .next()
        .unwrap_or(candidate)
        .to_lowercase()
}
