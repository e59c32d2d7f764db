//! Config loading, environment overrides and validation.

use super::model::Config;
use crate::error::{Result, SafechainError};
use std::path::Path;
use std::time::Duration;

/// Config file looked up in the current directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "safechain.yaml";

/// Overrides `ledger_command`.
pub const LEDGER_COMMAND_ENV: &str = "SAFECHAIN_LEDGER_COMMAND";

/// Overrides `ai.model`.
pub const MODEL_ENV: &str = "SAFECHAIN_MODEL";

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(SafechainError::ConfigError)` - Read, parse or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            SafechainError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Resolve the effective config.
    ///
    /// An explicit path must exist. Without one, `safechain.yaml` in the
    /// current directory is used if present, else defaults. Environment
    /// overrides are applied last, then the result is validated.
    pub fn resolve(explicit: Option<&Path>) -> Result<Self> {
        let mut config = match explicit {
            Some(path) => Self::load(path)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE)?,
            None => Self::default(),
        };

        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Parse config from a YAML string.
    ///
    /// Unknown fields in the YAML are silently ignored.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty map.
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Config = serde_yaml::from_str(yaml)
            .map_err(|e| SafechainError::ConfigError(format!("failed to parse config YAML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(command) = lookup(LEDGER_COMMAND_ENV).filter(|v| !v.trim().is_empty()) {
            self.ledger_command = command;
        }
        if let Some(model) = lookup(MODEL_ENV).filter(|v| !v.trim().is_empty()) {
            self.ai.model = Some(model);
        }
    }

    /// Validate config values.
    ///
    /// Validation rules:
    /// - `ledger_command` must be non-empty
    /// - `ai.base_url` and `ai.api_key_env` must be non-empty
    /// - `ai.timeout_seconds`, when set, must be positive
    pub fn validate(&self) -> Result<()> {
        if self.ledger_command.trim().is_empty() {
            return Err(SafechainError::ConfigError(
                "config validation failed: ledger_command must not be empty".to_string(),
            ));
        }

        if self.ai.base_url.trim().is_empty() {
            return Err(SafechainError::ConfigError(
                "config validation failed: ai.base_url must not be empty".to_string(),
            ));
        }

        if self.ai.api_key_env.trim().is_empty() {
            return Err(SafechainError::ConfigError(
                "config validation failed: ai.api_key_env must not be empty".to_string(),
            ));
        }

        if self.ai.timeout_seconds == Some(0) {
            return Err(SafechainError::ConfigError(
                "config validation failed: ai.timeout_seconds must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Read the AI API key from the configured environment variable.
    pub fn api_key(&self) -> Result<String> {
        std::env::var(&self.ai.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                SafechainError::ConfigError(format!(
                    "API key not found. Set {} in the environment or in a .env file.",
                    self.ai.api_key_env
                ))
            })
    }

    /// AI request timeout, if bounded.
    pub fn ai_timeout(&self) -> Option<Duration> {
        self.ai.timeout_seconds.map(Duration::from_secs)
    }
}
