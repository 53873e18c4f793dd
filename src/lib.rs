//! Random image server
//!
//! An HTTP server that answers every request with a randomly chosen image
//! from a configured directory, either as the response body or as a redirect
//! to the image URL.

pub mod cli;
pub mod config;
pub mod error;
pub mod gallery;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
