//! Configuration management for the portal client.

use crate::{ConfigResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default API base URL (can be overridden at compile time via PORTAL_API_BASE_URL).
pub const DEFAULT_API_BASE_URL: &str = match option_env!("PORTAL_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:8000/portal/api",
};

/// Versioned API prefix appended to the base URL.
pub const DEFAULT_API_PREFIX: &str = "/v1";

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Main client configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// API base URL, without the version prefix.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Versioned API prefix (e.g. "/v1").
    #[serde(default = "default_api_prefix")]
    pub api_prefix: String,
}

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_api_prefix() -> String {
    DEFAULT_API_PREFIX.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            api_prefix: DEFAULT_API_PREFIX.to_string(),
        }
    }
}

impl Config {
    /// Create a new Config with default values, then override from environment.
    pub fn new() -> Self {
        let mut config = Self::default();
        config.load_from_env();
        config
    }

    /// Load configuration from a file, falling back to defaults.
    pub fn load(paths: &Paths) -> ConfigResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();

        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a file.
    pub fn save(&self, paths: &Paths) -> ConfigResult<()> {
        paths.ensure_dirs()?;
        let config_path = paths.config_file();
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    /// Override configuration from environment variables.
    fn load_from_env(&mut self) {
        if let Ok(log_level) = std::env::var("PORTAL_LOG_LEVEL") {
            self.log_level = log_level;
        }
        if let Ok(base_url) = std::env::var("PORTAL_API_BASE_URL") {
            self.api_base_url = base_url;
        }
    }

    /// The full API URL: normalized base plus the versioned prefix.
    ///
    /// A trailing slash on the base URL is stripped so joined paths never
    /// contain `//`.
    pub fn api_url(&self) -> String {
        let base = self.api_base_url.trim_end_matches('/');
        format!("{}{}", base, self.api_prefix)
    }

    /// Validate that the configured base URL parses.
    pub fn validate(&self) -> ConfigResult<()> {
        Url::parse(&self.api_base_url)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.log_level, DEFAULT_LOG_LEVEL);
        assert_eq!(config.api_prefix, "/v1");
    }

    #[test]
    fn test_api_url_joins_prefix() {
        let config = Config {
            log_level: "info".to_string(),
            api_base_url: "https://portal.example.com/api".to_string(),
            api_prefix: "/v1".to_string(),
        };
        assert_eq!(config.api_url(), "https://portal.example.com/api/v1");
    }

    #[test]
    fn test_api_url_strips_trailing_slash() {
        let config = Config {
            log_level: "info".to_string(),
            api_base_url: "https://portal.example.com/api/".to_string(),
            api_prefix: "/v1".to_string(),
        };
        assert_eq!(config.api_url(), "https://portal.example.com/api/v1");
    }

    #[test]
    fn test_validate_rejects_garbage_url() {
        let config = Config {
            log_level: "info".to_string(),
            api_base_url: "not a url".to_string(),
            api_prefix: "/v1".to_string(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_base_dir(tmp.path().to_path_buf());

        let config = Config {
            log_level: "debug".to_string(),
            api_base_url: "https://portal.example.com/api".to_string(),
            api_prefix: "/v2".to_string(),
        };
        config.save(&paths).unwrap();

        let loaded = Config::load_from_file(&paths.config_file()).unwrap();
        assert_eq!(loaded.log_level, "debug");
        assert_eq!(loaded.api_prefix, "/v2");
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let tmp = tempfile::TempDir::new().unwrap();
        let paths = Paths::with_base_dir(tmp.path().join("nothing-here"));
        let config = Config::load(&paths).unwrap();
        assert_eq!(config.api_prefix, DEFAULT_API_PREFIX);
    }
}
