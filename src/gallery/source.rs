//! Effective directory resolution
//!
//! The `source` query parameter picks an alternate image directory through
//! `param_source_mapping`. Unknown or missing values fall back to `image_dir`.

use std::path::Path;

use crate::config::Config;

/// Query parameter that selects the image directory
pub const SOURCE_PARAM: &str = "source";

/// Extract the first `source` value from a raw query string
pub fn source_param(query: Option<&str>) -> Option<String> {
    let query = query?;
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == SOURCE_PARAM)
        .map(|(_, value)| value.into_owned())
}

/// Directory to list for this request
///
/// The path is not checked here; a missing directory surfaces when listing it.
pub fn resolve_image_dir<'a>(config: &'a Config, source: Option<&str>) -> &'a Path {
    source
        .filter(|s| !s.is_empty())
        .and_then(|s| config.param_source_mapping.get(s))
        .map_or_else(|| Path::new(&config.image_dir), Path::new)
}
