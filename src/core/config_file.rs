//! User configuration file handling
//!
//! Manages settings from ~/.config/glyph-projector/settings.json

use crate::projector::ProjectorSettings;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Directory name under the platform config dir
pub const APP_DIR_NAME: &str = "glyph-projector";

/// User configuration from ~/.config/glyph-projector/settings.json
///
/// These settings override built-in defaults but are overridden by CLI arguments
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct ConfigFile {
    /// Effect amount in [0, 1]
    pub effect_amount: Option<f32>,
    /// Population target for single glyphs
    pub ideal_glyph_count: Option<usize>,
    pub grid_width: Option<i32>,
    pub grid_height: Option<i32>,
    /// Upper bound on simultaneous cursors
    pub max_cursors: Option<usize>,
    /// Start with the projector invisible
    pub start_hidden: Option<bool>,
}

impl ConfigFile {
    /// Get the path to the app config directory
    pub fn config_dir() -> PathBuf {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")));
        config_dir.join(APP_DIR_NAME)
    }

    /// Get the path to the user config file
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("settings.json")
    }

    /// Load configuration from the user config file
    pub fn load() -> Option<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from `path`. Missing or malformed files yield `None`.
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
                    warn!("Failed to parse {:?}: {}", path, e);
                    None
                }
            },
            Err(e) => {
                warn!("Failed to read {:?}: {}", path, e);
                None
            }
        }
    }

    /// Save configuration to the user config file
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;

        debug!("Saved settings to {:?}", path);
        Ok(())
    }

    /// Layer the values present in this file over `settings`
    pub fn apply(&self, mut settings: ProjectorSettings) -> ProjectorSettings {
        if self.grid_width.is_some() || self.grid_height.is_some() {
            let size = IVec2::new(
                self.grid_width.unwrap_or(settings.grid_size.x),
                self.grid_height.unwrap_or(settings.grid_size.y),
            );
            settings = settings.with_grid_size(size);
        }
        if let Some(effect) = self.effect_amount {
            settings.effect_amount = effect;
        }
        if let Some(ideal) = self.ideal_glyph_count {
            settings.ideal_glyph_count = ideal;
        }
        if let Some(max_cursors) = self.max_cursors {
            settings.max_cursors = max_cursors;
        }
        if let Some(hidden) = self.start_hidden {
            settings.visible = !hidden;
        }
        settings
    }

    /// A config file spelling out the built-in defaults
    pub fn from_settings(settings: &ProjectorSettings) -> Self {
        Self {
            effect_amount: Some(settings.effect_amount),
            ideal_glyph_count: Some(settings.ideal_glyph_count),
            grid_width: Some(settings.grid_size.x),
            grid_height: Some(settings.grid_size.y),
            max_cursors: Some(settings.max_cursors),
            start_hidden: Some(!settings.visible),
        }
    }

    /// Initialize the user configuration directory
    ///
    /// This creates:
    /// 1. The ~/.config/glyph-projector directory structure
    /// 2. A settings.json file with default values
    /// 3. The logs/ directory
    pub fn initialize_config_directory() -> anyhow::Result<()> {
        Self::initialize_config_directory_at(&Self::config_dir())
    }

    pub fn initialize_config_directory_at(config_dir: &Path) -> anyhow::Result<()> {
        fs::create_dir_all(config_dir)?;
        println!("Created config directory: {:?}", config_dir);

        let logs_dir = config_dir.join("logs");
        fs::create_dir_all(&logs_dir)?;
        println!("Created logs directory: {:?}", logs_dir);

        let settings_path = config_dir.join("settings.json");
        if !settings_path.exists() {
            Self::from_settings(&ProjectorSettings::default()).save_to(&settings_path)?;
            println!("Created settings file: {:?}", settings_path);
        } else {
            println!("Settings file already exists: {:?}", settings_path);
        }

        println!("\nConfiguration initialized successfully!");
        println!("You can now:");
        println!("  - Edit settings at: {:?}", settings_path);
        println!("  - View application logs in: {:?}", logs_dir);

        Ok(())
    }
}
