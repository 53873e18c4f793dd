//! HTTP protocol layer module
//!
//! Header policies (CORS, referer, caching), content types and response
//! builders, decoupled from image selection.

pub mod cache;
pub mod cors;
pub mod mime;
pub mod referer;
pub mod response;

// Re-export commonly used types
pub use cache::no_cache_headers;
pub use cors::CorsHeaders;
pub use referer::is_referer_allowed;
pub use response::{
    apply_headers, build_405_response, build_error_response, build_file_response,
    build_options_response, build_redirect_response,
};
