use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::guard::GuardConfig;
use super::logging::{LoggingConfig, LOG_LEVELS};
use super::storage::StorageConfig;

pub const DEFAULT_CONFIG_FILE: &str = "sitewarden.toml";

/// Main configuration structure for Sitewarden
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Persistence of the block list
    #[serde(default)]
    pub storage: StorageConfig,

    /// Navigation guard behaviour
    #[serde(default)]
    pub guard: GuardConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. sitewarden.toml in current directory
    /// 3. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new(DEFAULT_CONFIG_FILE).exists() {
            Self::from_file(DEFAULT_CONFIG_FILE)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(path) = overrides.storage_path {
            self.storage.path = path;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
        if let Some(url) = overrides.blocked_page_url {
            self.guard.blocked_page_url = url;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage.key.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Storage key cannot be empty".to_string(),
            ));
        }

        if self.storage.max_update_retries == 0 {
            return Err(ConfigError::Validation(
                "max_update_retries must be at least 1".to_string(),
            ));
        }

        if self.guard.blocked_page_url.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Blocked page URL cannot be empty".to_string(),
            ));
        }

        if !self.logging.has_known_level() {
            return Err(ConfigError::Validation(format!(
                "Unknown log level '{}', expected one of: {}",
                self.logging.level,
                LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, path: &str) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::Parse(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, toml_string).map_err(|e| ConfigError::FileWrite {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub storage_path: Option<String>,
    pub log_level: Option<String>,
    pub blocked_page_url: Option<String>,
}
