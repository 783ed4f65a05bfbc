//! User configuration file handling
//!
//! Manages settings from ~/.config/penstroke/settings.json

use crate::layout::{Alignment, LastRowPolicy};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// User configuration from ~/.config/penstroke/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments.
/// Every field is optional; a missing field falls through to the default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct ConfigFile {
    pub font_size: Option<f64>,
    pub line_width: Option<f64>,
    /// Stroke color as any CSS color string
    pub color: Option<String>,
    /// Frame background as any CSS color string; frames are transparent without one
    pub background: Option<String>,
    pub alignment: Option<Alignment>,
    pub justify_last_row: Option<LastRowPolicy>,
    pub duration: Option<f64>,
    pub fps: Option<f64>,
}

impl ConfigFile {
    /// Get the path to the penstroke config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join("penstroke")
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`
    ///
    /// A missing file is not an error. An unreadable or malformed one is
    /// logged and ignored.
    pub fn load_from(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    debug!("Loaded user settings from {:?}", path);
                    Some(config)
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Save configuration to `path`, creating its directory if needed
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents).with_context(|| format!("Failed to write {}", path.display()))?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// The settings file written by `--new-config`
    pub fn example() -> Self {
        Self {
            font_size: Some(20.0),
            line_width: None,
            color: Some("#000000".to_string()),
            background: None,
            alignment: Some(Alignment::Left),
            justify_last_row: Some(LastRowPolicy::Left),
            duration: Some(5.0),
            fps: Some(30.0),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// Creates the config directory, its logs/ directory and an example
    /// settings.json. An existing settings file is left alone.
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        let config_dir = Self::config_dir();
        fs::create_dir_all(&config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = crate::logging::logs_dir();
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = Self::config_path();
        if settings_path.exists() {
            println!("Settings file already exists: {:?}", settings_path);
        } else {
            Self::example().save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("  - Edit defaults at: {:?}", settings_path);
        println!("  - View logs in: {:?}", logs_dir);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("nested").join("settings.json");
        let config = ConfigFile {
            font_size: Some(32.0),
            alignment: Some(Alignment::Justify),
            ..ConfigFile::default()
        };
        config.save_to(&path).expect("save");
        assert_eq!(ConfigFile::load_from(&path), Some(config));
    }

    #[test]
    fn test_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("temp dir");
        assert_eq!(ConfigFile::load_from(&dir.path().join("absent.json")), None);
    }

    #[test]
    fn test_malformed_file_is_ignored() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("settings.json");
        fs::write(&path, "{ not json").expect("write");
        assert_eq!(ConfigFile::load_from(&path), None);
    }

    #[test]
    fn test_partial_file_uses_camel_case() {
        let config: ConfigFile =
            serde_json::from_str(r#"{"fontSize": 12, "justifyLastRow": "justify"}"#)
                .expect("valid settings");
        assert_eq!(config.font_size, Some(12.0));
        assert_eq!(config.justify_last_row, Some(LastRowPolicy::Justify));
        assert_eq!(config.color, None);
    }
}
