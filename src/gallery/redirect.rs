//! Redirect target construction
//!
//! The public URL of an image is `redirect_base_url` followed by the image's
//! path (relative to the working directory) as percent-encoded segments.

use std::path::{Component, Path};
use url::{Position, Url};

use crate::error::{ImageError, ImageResult};

/// Placeholder origin used to resolve root-relative bases
const RELATIVE_ORIGIN: &str = "http://localhost/";

/// Build the `Location` value for `file_path`
///
/// A root-relative base (`/`, `/static/`) yields a root-relative URL; an
/// absolute base keeps its scheme and host. Current-dir, parent-dir and root
/// components of the path are dropped.
pub fn build_redirect_url(base: &str, file_path: &Path) -> ImageResult<String> {
    let failed = |reason: String| ImageError::RedirectTarget {
        path: file_path.to_path_buf(),
        reason,
    };

    let relative = base.starts_with('/');
    let mut url = if relative {
        Url::parse(RELATIVE_ORIGIN).and_then(|origin| origin.join(base))
    } else {
        Url::parse(base)
    }
    .map_err(|e| failed(e.to_string()))?;

    {
        let mut segments = url
            .path_segments_mut()
            .map_err(|()| failed("base URL cannot carry a path".to_string()))?;
        segments.pop_if_empty();
        for component in file_path.components() {
            if let Component::Normal(part) = component {
                segments.push(&part.to_string_lossy());
            }
        }
    }

    if relative {
        Ok(url[Position::BeforePath..].to_string())
    } else {
        Ok(url.into())
    }
}
