//! CORS header computation
//!
//! Headers are computed once per request and stamped onto every response of
//! the image route, error responses included.

use hyper::header::{
    HeaderName, ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS,
    ACCESS_CONTROL_ALLOW_ORIGIN,
};

use crate::config::Config;

const DEFAULT_ALLOW_METHODS: &str = "GET, POST";
const DEFAULT_ALLOW_HEADERS: &str = "Content-Type, Authorization";
const ANY_ORIGIN: &str = "*";

/// Computed `Access-Control-*` values for one request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsHeaders {
    pub allow_origin: String,
    pub allow_methods: String,
    pub allow_headers: String,
}

impl CorsHeaders {
    /// `None` when CORS is disabled
    pub fn for_request(config: &Config, origin: Option<&str>) -> Option<Self> {
        if !config.cors_enabled {
            return None;
        }

        Some(Self {
            allow_origin: resolve_allow_origin(&config.allowed_origins, origin).to_string(),
            allow_methods: join_or_default(&config.allowed_methods, DEFAULT_ALLOW_METHODS),
            allow_headers: join_or_default(&config.allowed_headers, DEFAULT_ALLOW_HEADERS),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = (HeaderName, &str)> {
        [
            (ACCESS_CONTROL_ALLOW_ORIGIN, self.allow_origin.as_str()),
            (ACCESS_CONTROL_ALLOW_METHODS, self.allow_methods.as_str()),
            (ACCESS_CONTROL_ALLOW_HEADERS, self.allow_headers.as_str()),
        ]
        .into_iter()
    }
}

/// First allow-list entry that is `*` or equals the request origin; `*` otherwise
fn resolve_allow_origin<'a>(allowed: &'a [String], origin: Option<&str>) -> &'a str {
    let origin = origin.unwrap_or_default();
    allowed
        .iter()
        .find(|a| a.as_str() == ANY_ORIGIN || a.as_str() == origin)
        .map_or(ANY_ORIGIN, String::as_str)
}

fn join_or_default(values: &[String], default: &str) -> String {
    if values.is_empty() {
        default.to_string()
    } else {
        values.join(", ")
    }
}
