//! Logger module
//!
//! Provides logging utilities for the image server including:
//! - Server lifecycle logging
//! - Access logging with multiple formats (verbose mode)
//! - Error and warning logging
//! - File-based logging support

mod format;
pub mod writer;

pub use format::AccessLogEntry;

use crate::config::Config;
use std::net::SocketAddr;

/// Initialize the logger with configuration
///
/// Should be called once at application startup.
pub fn init(config: &Config) -> std::io::Result<()> {
    writer::init(
        config.logging.access_log_file.as_deref(),
        config.logging.error_log_file.as_deref(),
    )
}

/// Write to info/access log
fn write_info(message: &str) {
    match writer::get() {
        Some(w) => w.write_access(message),
        None => println!("{message}"),
    }
}

/// Write to error log
fn write_error(message: &str) {
    match writer::get() {
        Some(w) => w.write_error(message),
        None => eprintln!("{message}"),
    }
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    write_info("======================================");
    write_info("Random image server started");
    write_info(&format!("Listening on: http://{addr}"));
    write_info(&format!("Image directory: {}", config.image_dir));
    write_info(&format!("Mode: {:?}", config.mode));
    if !config.param_source_mapping.is_empty() {
        let mut sources: Vec<&str> = config
            .param_source_mapping
            .keys()
            .map(String::as_str)
            .collect();
        sources.sort_unstable();
        write_info(&format!("Sources: {}", sources.join(", ")));
    }
    if let Some(workers) = config.workers {
        write_info(&format!("Worker threads: {workers}"));
    }
    if config.logging.verbose {
        write_info(&format!(
            "Access log: {} ({})",
            config.logging.access_log_file.as_deref().unwrap_or("stdout"),
            config.logging.access_log_format
        ));
    }
    if let Some(ref path) = config.logging.error_log_file {
        write_info(&format!("Error log: {path}"));
    }
    write_info("======================================\n");
}

pub fn log_info(message: &str) {
    write_info(&format!("[INFO] {message}"));
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    write_error(&format!("[ERROR] Failed to serve connection: {err:?}"));
}

pub fn log_error(message: &str) {
    write_error(&format!("[ERROR] {message}"));
}

pub fn log_warning(message: &str) {
    write_error(&format!("[WARN] {message}"));
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    write_info(&entry.format(format));
}
