//! Favicon passthrough
//!
//! Serves the configured file as-is: no referer check, no CORS, no random pick.

use crate::handler::router::RequestContext;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::{Response, StatusCode};
use std::path::Path;
use tokio::fs;

/// Serve the favicon file, or 500 if it cannot be read
pub async fn serve_favicon(ctx: &RequestContext<'_>, favicon_path: &str) -> Response<Full<Bytes>> {
    let path = Path::new(favicon_path);
    match fs::read(path).await {
        Ok(data) => {
            let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
            http::build_file_response(Bytes::from(data), content_type, ctx.is_head)
        }
        Err(e) => {
            logger::log_error(&format!("Failed to read favicon '{favicon_path}': {e}"));
            http::build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Unable to read favicon")
        }
    }
}
