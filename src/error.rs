//! Error types
//!
//! `ConfigError` is fatal at startup. `ImageError` ends a single request with
//! a plain-text error response and never takes the process down.

use hyper::StatusCode;
use std::path::PathBuf;

/// Startup configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),
    #[error("Invalid listen address {0}")]
    InvalidAddress(String),
    #[error("Invalid redirect_base_url '{base}': {reason}")]
    InvalidRedirectBase { base: String, reason: String },
    #[error("Cannot read configuration file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid YAML in configuration file: {0}")]
    Yaml(#[from] yaml_rust2::ScanError),
    #[error("param_source_mapping entries must be scalar: {0}")]
    InvalidSourceMapping(String),
}

/// Per-request failures of the image route
#[derive(thiserror::Error, Debug)]
pub enum ImageError {
    #[error("Referer not allowed: {referer:?}")]
    ForbiddenReferer { referer: String },
    #[error("Cannot read image directory {}: {source}", dir.display())]
    DirectoryUnreadable {
        dir: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("No eligible images in {}", dir.display())]
    NoEligibleFiles { dir: PathBuf },
    #[error("Cannot read image {}: {source}", path.display())]
    FileUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Cannot build redirect URL for {}: {reason}", path.display())]
    RedirectTarget { path: PathBuf, reason: String },
}

pub type ImageResult<T> = Result<T, ImageError>;

impl ImageError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::ForbiddenReferer { .. } => StatusCode::FORBIDDEN,
            Self::NoEligibleFiles { .. } => StatusCode::NOT_FOUND,
            Self::DirectoryUnreadable { .. }
            | Self::FileUnreadable { .. }
            | Self::RedirectTarget { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Body sent to the client; filesystem details stay in the error log
    pub const fn client_message(&self) -> &'static str {
        match self {
            Self::ForbiddenReferer { .. } => "Access denied",
            Self::DirectoryUnreadable { .. } => "Unable to read image directory",
            Self::NoEligibleFiles { .. } => "No valid images found",
            Self::FileUnreadable { .. } => "Unable to read image",
            Self::RedirectTarget { .. } => "Unable to build image URL",
        }
    }

    /// Server-side failures worth an error log line
    pub fn is_server_error(&self) -> bool {
        self.status().is_server_error()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn io_err() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "gone")
    }

    #[test]
    fn test_status_mapping() {
        let forbidden = ImageError::ForbiddenReferer {
            referer: "https://b.com".to_string(),
        };
        assert_eq!(forbidden.status(), StatusCode::FORBIDDEN);
        assert!(!forbidden.is_server_error());

        let empty = ImageError::NoEligibleFiles {
            dir: PathBuf::from("./images"),
        };
        assert_eq!(empty.status(), StatusCode::NOT_FOUND);

        let dir = ImageError::DirectoryUnreadable {
            dir: PathBuf::from("./missing"),
            source: io_err(),
        };
        assert_eq!(dir.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(dir.is_server_error());

        let file = ImageError::FileUnreadable {
            path: PathBuf::from("./images/a.jpg"),
            source: io_err(),
        };
        assert_eq!(file.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_display_includes_path() {
        let err = ImageError::DirectoryUnreadable {
            dir: PathBuf::from("./missing"),
            source: io_err(),
        };
        let text = err.to_string();
        assert!(text.contains("./missing"));
        assert!(text.contains("gone"));
    }
}
