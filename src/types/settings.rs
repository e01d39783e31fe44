// Tab state settings
// Loaded from a JSON file; any field missing from the file falls back to its default.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::SettingsError;

pub const DEFAULT_NEW_TAB_URL: &str = "about:newtab";

/// Runtime settings for the tab layer.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TabSettings {
    /// URL loaded by a new tab when the caller supplies none.
    pub default_url: String,
    /// Default tracing filter for the demo binary.
    pub log_filter: String,
}

impl Default for TabSettings {
    fn default() -> Self {
        Self {
            default_url: DEFAULT_NEW_TAB_URL.to_string(),
            log_filter: "info".to_string(),
        }
    }
}

impl TabSettings {
    /// Loads settings from a JSON file.
    ///
    /// If the file does not exist, returns default settings.
    /// If the file exists but is malformed, returns a serialization error.
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| SettingsError::IoError(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&content).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to parse config file: {}", e))
        })
    }

    /// Saves settings to a JSON file, creating parent directories as needed.
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                SettingsError::IoError(format!("Failed to create config directory: {}", e))
            })?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| {
            SettingsError::SerializationError(format!("Failed to serialize settings: {}", e))
        })?;

        fs::write(path, json)
            .map_err(|e| SettingsError::IoError(format!("Failed to write config file: {}", e)))
    }
}
