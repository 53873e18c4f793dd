// Configuration types module
// Defines all configuration-related data structures

use serde::Deserialize;
use std::collections::HashMap;

/// Main configuration structure
///
/// Loaded once at startup and never mutated afterwards.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub host: String,
    /// Accepts both `port: 8080` and `port: "8080"` in the YAML file
    pub port: u16,
    /// Tokio worker threads (defaults to CPU cores)
    #[serde(default)]
    pub workers: Option<usize>,

    /// Directory used when no `source` mapping applies
    pub image_dir: String,
    /// Dot-prefixed, case-sensitive extensions (e.g. ".jpg")
    #[serde(default)]
    pub allowed_extensions: Vec<String>,
    pub disable_file_type_check: bool,
    pub favicon_path: String,

    pub cors_enabled: bool,
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default)]
    pub allowed_methods: Vec<String>,
    #[serde(default)]
    pub allowed_headers: Vec<String>,

    pub mode: ServeMode,
    /// Public URL prefix that redirect targets are built on
    pub redirect_base_url: String,

    pub referer_check_enabled: bool,
    #[serde(default)]
    pub allowed_referers: Vec<String>,

    /// `source` query value -> image directory
    #[serde(default)]
    pub param_source_mapping: HashMap<String, String>,

    /// Never serve the same file twice in a row from one directory
    pub avoid_repeat: bool,
    /// Fixed seed for the random source (deterministic selection)
    #[serde(default)]
    pub random_seed: Option<u64>,

    #[serde(flatten)]
    pub logging: LoggingConfig,
}

/// How a selected image reaches the client
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ServeMode {
    /// Stream the file bytes as the response body
    Direct,
    /// Answer with a 302 pointing at the image URL
    Redir,
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Set from the command line, not from the config file
    #[serde(skip)]
    pub verbose: bool,
    /// Access log format (combined, common, json, or custom pattern)
    #[serde(default = "default_access_log_format")]
    pub access_log_format: String,
    /// Access log file path (optional, stdout if not set)
    #[serde(default)]
    pub access_log_file: Option<String>,
    /// Error log file path (optional, stderr if not set)
    #[serde(default)]
    pub error_log_file: Option<String>,
}

#[allow(clippy::missing_const_for_fn)]
fn default_access_log_format() -> String {
    "combined".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            verbose: false,
            access_log_format: default_access_log_format(),
            access_log_file: None,
            error_log_file: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
            image_dir: "./images".to_string(),
            allowed_extensions: Vec::new(),
            disable_file_type_check: false,
            favicon_path: "./favicon.ico".to_string(),
            cors_enabled: false,
            allowed_origins: Vec::new(),
            allowed_methods: Vec::new(),
            allowed_headers: Vec::new(),
            mode: ServeMode::Direct,
            redirect_base_url: "/".to_string(),
            referer_check_enabled: false,
            allowed_referers: Vec::new(),
            param_source_mapping: HashMap::new(),
            avoid_repeat: false,
            random_seed: None,
            logging: LoggingConfig::default(),
        }
    }
}
