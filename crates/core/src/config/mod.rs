//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (PUSTAKA_*)
//! 2. TOML config file (`--config` or PUSTAKA_CONFIG_FILE)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (PUSTAKA_*)
/// 2. TOML config file
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Base URL of the books API, without the `/volumes` path.
    ///
    /// Set via PUSTAKA_API_BASE_URL environment variable.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// User-Agent string for HTTP requests.
    ///
    /// Set via PUSTAKA_USER_AGENT environment variable.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// HTTP request timeout in milliseconds.
    ///
    /// Set via PUSTAKA_TIMEOUT_MS environment variable.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// `host:port` the connectivity check tries to reach.
    ///
    /// Set via PUSTAKA_PROBE_HOST environment variable.
    #[serde(default = "default_probe_host")]
    pub probe_host: String,

    /// Connect timeout for the connectivity check in milliseconds.
    ///
    /// Set via PUSTAKA_PROBE_TIMEOUT_MS environment variable.
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,

    /// Directory for the log file written while the terminal UI is active.
    ///
    /// Set via PUSTAKA_LOG_DIR environment variable.
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
}

fn default_api_base_url() -> String {
    "https://www.googleapis.com/books/v1".into()
}

fn default_user_agent() -> String {
    "pustaka/0.1".into()
}

fn default_timeout_ms() -> u64 {
    20_000
}

fn default_probe_host() -> String {
    "www.googleapis.com:443".into()
}

fn default_probe_timeout_ms() -> u64 {
    1_500
}

fn default_log_dir() -> PathBuf {
    PathBuf::from("logs")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            user_agent: default_user_agent(),
            timeout_ms: default_timeout_ms(),
            probe_host: default_probe_host(),
            probe_timeout_ms: default_probe_timeout_ms(),
            log_dir: default_log_dir(),
        }
    }
}

impl AppConfig {
    /// Timeout as Duration for use with reqwest.
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Connectivity probe timeout as Duration.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Load configuration from all sources with layered precedence.
    ///
    /// `config_file` takes priority over `PUSTAKA_CONFIG_FILE` when both are
    /// given.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        let from_env = std::env::var("PUSTAKA_CONFIG_FILE").ok().map(PathBuf::from);
        if let Some(path) = config_file.map(Path::to_path_buf).or(from_env) {
            tracing::debug!(path = %path.display(), "merging config file");
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("PUSTAKA_").ignore(&["CONFIG_FILE"]));

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "https://www.googleapis.com/books/v1");
        assert_eq!(config.user_agent, "pustaka/0.1");
        assert_eq!(config.timeout_ms, 20_000);
        assert_eq!(config.probe_host, "www.googleapis.com:443");
        assert_eq!(config.probe_timeout_ms, 1_500);
        assert_eq!(config.log_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_timeout_durations() {
        let config = AppConfig::default();
        assert_eq!(config.timeout(), Duration::from_millis(20_000));
        assert_eq!(config.probe_timeout(), Duration::from_millis(1_500));
    }

    #[test]
    fn test_load_layers_file_and_env() {
        figment::Jail::expect_with(|jail| {
            jail.create_file("pustaka.toml", "user_agent = \"from-file\"\ntimeout_ms = 5000\n")?;
            jail.set_env("PUSTAKA_TIMEOUT_MS", "7000");

            let config = AppConfig::load(Some(Path::new("pustaka.toml"))).map_err(|e| e.to_string())?;
            assert_eq!(config.user_agent, "from-file");
            assert_eq!(config.timeout_ms, 7000);
            assert_eq!(config.probe_host, "www.googleapis.com:443");
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("PUSTAKA_TIMEOUT_MS", "10");

            let result = AppConfig::load(None);
            assert!(matches!(result, Err(ConfigError::Invalid { field, .. }) if field == "timeout_ms"));
            Ok(())
        });
    }
}
