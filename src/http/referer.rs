//! Referer allow-list
//!
//! Exact string equality only: no wildcards, prefixes or URL normalization.
//! A request without a Referer header is checked as the empty string, and an
//! empty allow-list rejects every request.

/// Returns true when `referer` may access the image route
pub fn is_referer_allowed(referer: Option<&str>, allowed: &[String]) -> bool {
    let referer = referer.unwrap_or_default();
    allowed.iter().any(|a| a == referer)
}
