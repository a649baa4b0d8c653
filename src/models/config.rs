//! Application configuration structures.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::BaseUri;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Rewrite behavior settings
    #[serde(default)]
    pub rewrite: RewriteConfig,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        let level = self.logging.level.to_lowercase();
        if !defaults::LOG_LEVELS.contains(&level.as_str()) {
            return Err(AppError::validation(format!(
                "logging.level '{}' is not one of {}",
                self.logging.level,
                defaults::LOG_LEVELS.join("|")
            )));
        }
        if let Some(base_url) = &self.rewrite.base_url {
            BaseUri::parse(base_url).map_err(|e| {
                AppError::validation(format!("rewrite.base_url '{base_url}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Pick the base URL, preferring an explicit override over the file.
    pub fn base_url<'a>(&'a self, cli_override: Option<&'a str>) -> Result<&'a str> {
        cli_override
            .or(self.rewrite.base_url.as_deref())
            .ok_or_else(|| {
                AppError::config("No base URL given (use --base or rewrite.base_url)")
            })
    }
}

/// Rewrite behavior settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Base URL that relative references are resolved against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default log filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    pub const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

    pub fn log_level() -> String {
        "info".into()
    }
}
