use crate::error::ConfigError;

use common::ErrorLocation;

use std::path::Path;

use log::{info, warn};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.json";
const CONFIG_VERSION: u32 = 1;
const MAX_CHANNEL_CAPACITY: usize = 4096;

/// Engine startup configuration, read from `{config_dir}/config.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    /// Display name the client state starts with.
    #[serde(default = "default_first_name")]
    pub first_name: String,

    /// Buffered events per listener before a slow listener starts lagging.
    #[serde(default = "default_event_capacity")]
    pub event_capacity: usize,

    /// Pending commands and queries queued ahead of the engine loop.
    #[serde(default = "default_request_capacity")]
    pub request_capacity: usize,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            first_name: default_first_name(),
            event_capacity: default_event_capacity(),
            request_capacity: default_request_capacity(),
        }
    }
}

fn default_version() -> u32 {
    CONFIG_VERSION
}
fn default_first_name() -> String {
    "friend".to_string()
}
fn default_event_capacity() -> usize {
    64
}
fn default_request_capacity() -> usize {
    100
}

impl CoreConfig {
    /// Load config from `{config_dir}/config.json`.
    ///
    /// A missing file yields defaults. A file that exists but cannot be read,
    /// parsed or validated is an error; the caller decides whether to fall back.
    pub fn load(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            info!(
                "Config file not found at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            warn!("Failed to read config file: {}", e);
            ConfigError::ReadError {
                location: ErrorLocation::here(),
                path: config_path.clone(),
                source: e,
            }
        })?;

        let config: CoreConfig = serde_json::from_str(&contents).map_err(|e| {
            warn!("Failed to parse config JSON: {}", e);
            ConfigError::ParseError {
                location: ErrorLocation::here(),
                path: config_path.clone(),
                reason: e.to_string(),
            }
        })?;

        config.validate()?;

        info!("Config loaded from {}", config_path.display());
        Ok(config)
    }

    /// Save config to `{config_dir}/config.json` via temp file + rename.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        std::fs::create_dir_all(config_dir).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::here(),
            path: config_dir.to_path_buf(),
            source: e,
        })?;

        let config_path = config_dir.join(CONFIG_FILE_NAME);
        let temp_path = config_dir.join(format!("{CONFIG_FILE_NAME}.tmp"));

        let json = serde_json::to_string_pretty(self).map_err(|e| ConfigError::SerializeError {
            location: ErrorLocation::here(),
            reason: e.to_string(),
        })?;

        std::fs::write(&temp_path, json).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::here(),
            path: temp_path.clone(),
            source: e,
        })?;

        std::fs::rename(&temp_path, &config_path).map_err(|e| ConfigError::WriteError {
            location: ErrorLocation::here(),
            path: config_path.clone(),
            source: e,
        })?;

        info!("Config saved to {}", config_path.display());
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version == 0 || self.version > CONFIG_VERSION {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::here(),
                reason: format!(
                    "Invalid version: {} (expected 1-{})",
                    self.version, CONFIG_VERSION
                ),
            });
        }

        if self.first_name.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                location: ErrorLocation::here(),
                reason: "first_name cannot be empty".to_string(),
            });
        }

        for (field, value) in [
            ("event_capacity", self.event_capacity),
            ("request_capacity", self.request_capacity),
        ] {
            if value == 0 || value > MAX_CHANNEL_CAPACITY {
                return Err(ConfigError::ValidationError {
                    location: ErrorLocation::here(),
                    reason: format!("Invalid {field}: {value} (must be 1-{MAX_CHANNEL_CAPACITY})"),
                });
            }
        }

        Ok(())
    }
}
