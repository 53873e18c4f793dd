//! Random image route
//!
//! Referer gate, directory resolution, candidate listing, random pick, then
//! either the file bytes or a redirect. CORS headers go on every response of
//! this route; no-cache headers only on successful ones.

use crate::config::{AppState, ServeMode};
use crate::error::{ImageError, ImageResult};
use crate::gallery::{
    build_redirect_url, collect_candidates, resolve_image_dir, source_param, ExtensionFilter,
};
use crate::handler::router::RequestContext;
use crate::http::{self, mime, CorsHeaders};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Serve one randomly chosen image
///
/// Returns the response and, on success, the path of the chosen file.
pub async fn serve_random_image(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<PathBuf>) {
    let (mut response, selected) = match select_and_serve(ctx, state).await {
        Ok((response, path)) => (response, Some(path)),
        Err(err) => {
            if err.is_server_error() {
                logger::log_error(&err.to_string());
            }
            (http::build_error_response(err.status(), err.client_message()), None)
        }
    };

    if let Some(cors) = CorsHeaders::for_request(&state.config, ctx.origin) {
        http::apply_headers(&mut response, cors.iter());
    }
    (response, selected)
}

async fn select_and_serve(
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> ImageResult<(Response<Full<Bytes>>, PathBuf)> {
    let config = &state.config;

    // Checked before touching the filesystem
    if config.referer_check_enabled
        && !http::is_referer_allowed(ctx.referer, &config.allowed_referers)
    {
        return Err(ImageError::ForbiddenReferer {
            referer: ctx.referer.unwrap_or_default().to_string(),
        });
    }

    let source = source_param(ctx.query);
    let dir = resolve_image_dir(config, source.as_deref());

    let filter = ExtensionFilter::new(&config.allowed_extensions, config.disable_file_type_check);
    let candidates = collect_candidates(dir, filter).await?;
    let chosen = state
        .picker
        .pick(dir, &candidates)
        .ok_or_else(|| ImageError::NoEligibleFiles {
            dir: dir.to_path_buf(),
        })?;

    let mut response = match config.mode {
        ServeMode::Redir => {
            let target = build_redirect_url(&config.redirect_base_url, &chosen.path)?;
            http::build_redirect_response(&target)
        }
        ServeMode::Direct => load_image_response(&chosen.path, ctx.is_head).await?,
    };
    http::apply_headers(&mut response, http::no_cache_headers());

    Ok((response, chosen.path.clone()))
}

async fn load_image_response(path: &Path, is_head: bool) -> ImageResult<Response<Full<Bytes>>> {
    let data = fs::read(path)
        .await
        .map_err(|source| ImageError::FileUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
    let content_type = mime::get_content_type(path.extension().and_then(|e| e.to_str()));
    Ok(http::build_file_response(Bytes::from(data), content_type, is_head))
}
