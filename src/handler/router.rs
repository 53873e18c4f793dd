//! Request routing dispatch module
//!
//! Entry point for HTTP request processing, responsible for method
//! validation, route dispatch and access logging.

use crate::config::AppState;
use crate::handler::{favicon, random_image};
use crate::http::{self, CorsHeaders};
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::header::{HeaderName, ORIGIN, REFERER, USER_AGENT};
use hyper::http::request::Parts;
use hyper::{Method, Request, Response};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

/// Fixed favicon route
pub const FAVICON_PATH: &str = "/favicon.ico";

/// Request data the handlers need, borrowed from the incoming request
#[derive(Debug, Clone, Copy)]
pub struct RequestContext<'a> {
    pub path: &'a str,
    pub query: Option<&'a str>,
    pub is_head: bool,
    pub origin: Option<&'a str>,
    pub referer: Option<&'a str>,
}

impl<'a> RequestContext<'a> {
    pub fn from_parts(parts: &'a Parts) -> Self {
        let header = |name: HeaderName| parts.headers.get(name).and_then(|v| v.to_str().ok());
        Self {
            path: parts.uri.path(),
            query: parts.uri.query(),
            is_head: parts.method == Method::HEAD,
            origin: header(ORIGIN),
            referer: header(REFERER),
        }
    }
}

/// Main entry point for HTTP request handling
pub async fn handle_request<B>(
    req: Request<B>,
    peer_addr: SocketAddr,
    state: Arc<AppState>,
) -> Result<Response<Full<Bytes>>, Infallible> {
    let started = Instant::now();
    // The body is never read
    let (parts, _) = req.into_parts();
    let ctx = RequestContext::from_parts(&parts);

    let (response, selected_file) = route_request(&parts.method, &ctx, &state).await;

    if state.access_log() {
        log_access(&parts, peer_addr, &response, selected_file, started, &state);
    }
    Ok(response)
}

/// Dispatch by method and path
///
/// Every path except the favicon is served by the random image route.
async fn route_request(
    method: &Method,
    ctx: &RequestContext<'_>,
    state: &AppState,
) -> (Response<Full<Bytes>>, Option<PathBuf>) {
    match *method {
        Method::GET | Method::HEAD => {}
        Method::OPTIONS => return (build_preflight_response(ctx, state), None),
        // Recorded by the access log only
        _ => return (http::build_405_response(), None),
    }

    if ctx.path == FAVICON_PATH {
        return (favicon::serve_favicon(ctx, &state.config.favicon_path).await, None);
    }

    random_image::serve_random_image(ctx, state).await
}

/// 204 with CORS headers when enabled
fn build_preflight_response(ctx: &RequestContext<'_>, state: &AppState) -> Response<Full<Bytes>> {
    let mut response = http::build_options_response();
    if let Some(cors) = CorsHeaders::for_request(&state.config, ctx.origin) {
        http::apply_headers(&mut response, cors.iter());
    }
    response
}

fn log_access(
    req: &Parts,
    peer_addr: SocketAddr,
    response: &Response<Full<Bytes>>,
    selected_file: Option<PathBuf>,
    started: Instant,
    state: &AppState,
) {
    let header = |name: HeaderName| {
        req.headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(ToString::to_string)
    };

    let mut entry = AccessLogEntry::new(
        peer_addr.to_string(),
        req.method.to_string(),
        req.uri.path().to_string(),
    );
    entry.query = req.uri.query().map(ToString::to_string);
    entry.http_version = format_version(req.version).to_string();
    entry.status = response.status().as_u16();
    entry.body_bytes = usize::try_from(response.body().size_hint().exact().unwrap_or(0))
        .unwrap_or(usize::MAX);
    entry.referer = header(REFERER);
    entry.user_agent = header(USER_AGENT);
    entry.selected_file = selected_file.map(|p| p.display().to_string());
    entry.request_time_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);

    logger::log_access(&entry, &state.config.logging.access_log_format);
}

fn format_version(version: hyper::Version) -> &'static str {
    match version {
        hyper::Version::HTTP_09 => "0.9",
        hyper::Version::HTTP_10 => "1.0",
        hyper::Version::HTTP_2 => "2",
        hyper::Version::HTTP_3 => "3",
        _ => "1.1",
    }
}
