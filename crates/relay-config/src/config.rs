//! Configuration management for the relay client.

use crate::{ConfigResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default control-plane API URL (can be overridden at compile time via the
/// DEVELOPER_RELAY_API_URL env var).
pub const DEFAULT_API_URL: &str = match option_env!("DEVELOPER_RELAY_API_URL") {
    Some(url) => url,
    None => "https://api.fitbit.com/",
};

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Runtime override for the API URL.
pub const API_URL_ENV: &str = "DEVELOPER_RELAY_API_URL";

/// Runtime override for the log level.
pub const LOG_LEVEL_ENV: &str = "DEVELOPER_RELAY_LOG_LEVEL";

/// Relay client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Base URL of the control-plane API that hosts the relay endpoints.
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            api_url: default_api_url(),
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

    /// Load configuration from the config file if it exists, falling back to
    /// defaults. Environment variables take precedence over the file.
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
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(paths.config_file(), content)?;
        Ok(())
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply overrides from a variable lookup. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        if let Some(api_url) = non_empty(API_URL_ENV) {
            self.api_url = api_url;
        }
        if let Some(log_level) = non_empty(LOG_LEVEL_ENV) {
            self.log_level = log_level;
        }
    }

    /// Get the API URL as a parsed URL.
    pub fn api_url(&self) -> ConfigResult<Url> {
        Ok(Url::parse(&self.api_url)?)
    }
}
