//! Configuration management for petal.
//!
//! This crate provides configuration loading and saving with support for
//! TOML format and XDG directory conventions.

mod settings;
mod xdg;

pub use settings::{ComponentSettings, Config, GeneralSettings, LoggingSettings};
pub use xdg::{default_log_path, get_config_dir, get_data_dir};

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Default values as constants
pub mod defaults {
    pub const THEME_NAME: &str = "default";
    pub const ROUNDED: bool = false;
    pub const NO_OPTIONS_TEXT: &str = "No options";
    pub const MIN_LOG_LEVEL: &str = "info";
    pub const MAX_LOG_ENTRIES: usize = 500;
}

impl Config {
    /// Load configuration from the XDG config file.
    ///
    /// On first run, creates the config file with default values and the
    /// user themes directory.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_file_path()?;
        let first_run = !config_path.exists();

        let config = Self::load_from(&config_path)?;
        if first_run {
            Self::ensure_themes_dir()?;
        }
        Ok(config)
    }

    /// Load configuration from an explicit path.
    ///
    /// Missing keys are filled with defaults and written back so the file
    /// always lists every setting.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let original_content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config = Self::validate_content(&original_content)?;

        // Serialize back to get normalized content
        let normalized_content = toml::to_string_pretty(&config)?;
        if original_content != normalized_content {
            log::debug!("Normalizing config file {}", path.display());
            config.save_to(path)?;
        }

        Ok(config)
    }

    /// Save configuration to the XDG config file.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    /// Save configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get path to config file.
    pub fn config_file_path() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("config.toml"))
    }

    /// Get path to themes directory.
    pub fn get_themes_dir() -> Result<PathBuf> {
        Ok(get_config_dir()?.join("themes"))
    }

    /// Resolved log file path.
    pub fn log_file_path(&self) -> Result<PathBuf> {
        match &self.logging.file_path {
            Some(path) => Ok(PathBuf::from(path)),
            None => default_log_path(),
        }
    }

    /// Validate config content.
    pub fn validate_content(content: &str) -> Result<Config> {
        toml::from_str(content).map_err(|e| anyhow::anyhow!("{}", e))
    }

    fn ensure_themes_dir() -> Result<()> {
        let themes_dir = Self::get_themes_dir()?;
        if !themes_dir.exists() {
            std::fs::create_dir_all(themes_dir)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use petal_core::{ExpansionMode, Size};

    #[test]
    fn test_first_load_creates_file_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();

        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn test_partial_file_is_completed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[components]\nsize = \"large\"\nexpansion_mode = \"single\"\n")
            .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.components.size, Size::Large);
        assert_eq!(config.components.expansion_mode, ExpansionMode::Single);
        assert_eq!(config.general.theme, defaults::THEME_NAME);

        let rewritten = std::fs::read_to_string(&path).unwrap();
        assert!(rewritten.contains("no_options_text"));
        assert!(rewritten.contains("[logging]"));
    }

    #[test]
    fn test_invalid_content_is_rejected() {
        assert!(Config::validate_content("[components]\nsize = \"gigantic\"\n").is_err());
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.general.theme = "dark".to_string();
        config.components.rounded = true;
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn test_explicit_log_path_wins() {
        let mut config = Config::default();
        config.logging.file_path = Some("/tmp/petal-test.log".to_string());
        assert_eq!(
            config.log_file_path().unwrap(),
            PathBuf::from("/tmp/petal-test.log")
        );
    }
}
