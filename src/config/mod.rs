// Configuration module entry point
// Loads the YAML configuration once at startup and holds the shared runtime state

mod mapping;
mod state;
mod types;

use std::net::SocketAddr;
use url::Url;

use crate::error::ConfigError;

// Re-export public types
pub use state::AppState;
pub use types::{Config, LoggingConfig, ServeMode};

/// Config file used when `--config` is not given
pub const DEFAULT_CONFIG_PATH: &str = "config.yaml";

impl Config {
    /// Load configuration from the given file path
    ///
    /// The file must exist; its format is taken from the extension.
    /// Scalar keys can be overridden with `RANDOM_IMAGE_*` environment variables.
    /// `param_source_mapping` keys keep the case they have in the file.
    pub fn load_from(config_path: &str) -> Result<Self, ConfigError> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(config_path).required(true))
            .add_source(config::Environment::with_prefix("RANDOM_IMAGE"))
            .set_default("host", "0.0.0.0")?
            .set_default("port", 8080)?
            .set_default("image_dir", "./images")?
            .set_default("disable_file_type_check", false)?
            .set_default("favicon_path", "./favicon.ico")?
            .set_default("cors_enabled", false)?
            .set_default("mode", "direct")?
            .set_default("redirect_base_url", "/")?
            .set_default("referer_check_enabled", false)?
            .set_default("avoid_repeat", false)?
            .build()?;

        let mut cfg: Self = settings.try_deserialize()?;
        if let Some(source_mapping) = mapping::read_source_mapping(config_path)? {
            cfg.param_source_mapping = source_mapping;
        }
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check values that deserialize fine but cannot work at runtime
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.get_socket_addr()?;
        validate_redirect_base(&self.redirect_base_url)
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = format!("{}:{}", self.host, self.port);
        addr.parse()
            .map_err(|e| ConfigError::InvalidAddress(format!("{addr}: {e}")))
    }
}

/// Redirect base must be a root-relative path or an absolute URL that can carry a path
fn validate_redirect_base(base: &str) -> Result<(), ConfigError> {
    let invalid = |reason: &str| ConfigError::InvalidRedirectBase {
        base: base.to_string(),
        reason: reason.to_string(),
    };

    if base.starts_with('/') {
        return Ok(());
    }
    match Url::parse(base) {
        Ok(url) if url.cannot_be_a_base() => Err(invalid("URL cannot carry a path")),
        Ok(_) => Ok(()),
        Err(e) => Err(invalid(&e.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_full_config() {
        let file = write_config(
            r#"
port: "9090"
image_dir: "./pics"
allowed_extensions: [".jpg", ".png"]
disable_file_type_check: false
favicon_path: "./static/favicon.ico"
cors_enabled: true
allowed_origins: ["https://a.com", "*"]
allowed_methods: ["GET"]
allowed_headers: []
mode: redir
redirect_base_url: "https://cdn.example.com/"
referer_check_enabled: true
allowed_referers: ["https://a.com/page"]
param_source_mapping:
  dogs: "./pics/dogs"
  cats: "./pics/cats"
access_log_format: json
"#,
        );

        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.port, 9090);
        assert_eq!(cfg.image_dir, "./pics");
        assert_eq!(cfg.allowed_extensions, vec![".jpg", ".png"]);
        assert!(cfg.cors_enabled);
        assert_eq!(cfg.allowed_origins, vec!["https://a.com", "*"]);
        assert!(cfg.allowed_headers.is_empty());
        assert_eq!(cfg.mode, ServeMode::Redir);
        assert!(cfg.referer_check_enabled);
        assert_eq!(
            cfg.param_source_mapping.get("dogs").map(String::as_str),
            Some("./pics/dogs")
        );
        assert_eq!(cfg.logging.access_log_format, "json");
        assert!(!cfg.logging.verbose);
    }

    #[test]
    fn test_source_mapping_keys_are_case_sensitive() {
        let file = write_config(
            r#"
image_dir: "./images"
param_source_mapping:
  Dogs: "./a"
  cats: "./c"
"#,
        );

        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.param_source_mapping.len(), 2);
        assert_eq!(
            crate::gallery::resolve_image_dir(&cfg, Some("Dogs")),
            std::path::Path::new("./a")
        );
        assert_eq!(
            crate::gallery::resolve_image_dir(&cfg, Some("dogs")),
            std::path::Path::new("./images")
        );
        assert_eq!(
            crate::gallery::resolve_image_dir(&cfg, Some("cats")),
            std::path::Path::new("./c")
        );
    }

    #[test]
    fn test_defaults_fill_missing_keys() {
        let file = write_config("image_dir: \"./images\"\n");
        let cfg = Config::load_from(file.path().to_str().unwrap()).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.mode, ServeMode::Direct);
        assert_eq!(cfg.redirect_base_url, "/");
        assert!(!cfg.cors_enabled);
        assert!(!cfg.avoid_repeat);
        assert!(cfg.param_source_mapping.is_empty());
        assert_eq!(cfg.logging.access_log_format, "combined");
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = Config::load_from("/nonexistent/dir/config.yaml");
        assert!(matches!(result, Err(ConfigError::Load(_))));
    }

    #[test]
    fn test_malformed_file_is_error() {
        let file = write_config("port: [not, a, port\nimage_dir: :::\n");
        assert!(Config::load_from(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_unknown_mode_is_error() {
        let file = write_config("mode: teleport\n");
        assert!(Config::load_from(file.path().to_str().unwrap()).is_err());
    }

    #[test]
    fn test_redirect_base_validation() {
        assert!(validate_redirect_base("/").is_ok());
        assert!(validate_redirect_base("/static/").is_ok());
        assert!(validate_redirect_base("https://cdn.example.com/img").is_ok());
        assert!(validate_redirect_base("mailto:someone@example.com").is_err());
        assert!(validate_redirect_base("relative/path").is_err());
    }

    #[test]
    fn test_invalid_host_is_error() {
        let cfg = Config {
            host: "not a host".to_string(),
            ..Config::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidAddress(_))
        ));
    }
}
