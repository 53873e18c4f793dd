//! HTTP cache control module
//!
//! Image responses must never be cached: each request has to reach the
//! server so a new image gets picked.

use hyper::header::{HeaderName, CACHE_CONTROL, EXPIRES, PRAGMA};

/// `Cache-Control` value for every served image or redirect
pub const NO_STORE_CACHE_CONTROL: &str = "no-store, no-cache, must-revalidate, proxy-revalidate";

/// Headers that disable caching in browsers, proxies and CDNs
pub fn no_cache_headers() -> [(HeaderName, &'static str); 4] {
    [
        (CACHE_CONTROL, NO_STORE_CACHE_CONTROL),
        (EXPIRES, "0"),
        (PRAGMA, "no-cache"),
        (HeaderName::from_static("surrogate-control"), "no-store"),
    ]
}
