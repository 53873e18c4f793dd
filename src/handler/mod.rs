//! Request handler module
//!
//! Responsible for request routing dispatch and the two routes the server
//! exposes: the random image and the favicon.

pub mod favicon;
pub mod random_image;
pub mod router;

// Re-export main entry point
pub use router::handle_request;
