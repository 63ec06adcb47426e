//! Configuration structures for petal settings.

use petal_core::{ExpansionMode, Size};
use serde::{Deserialize, Serialize};

use crate::defaults;

/// Application configuration with nested sections.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// General settings
    #[serde(default)]
    pub general: GeneralSettings,

    /// Defaults applied to every component unless overridden
    #[serde(default)]
    pub components: ComponentSettings,

    /// Logging settings
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// General settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Selected theme name
    #[serde(default = "default_theme_name")]
    pub theme: String,
}

/// Component defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentSettings {
    /// Size preset (small, medium, large)
    #[serde(default)]
    pub size: Size,

    /// Rounded borders
    #[serde(default = "default_rounded")]
    pub rounded: bool,

    /// Accordion group expansion mode (single, multiple)
    #[serde(default)]
    pub expansion_mode: ExpansionMode,

    /// Text shown by an autocomplete with no matching options
    #[serde(default = "default_no_options_text")]
    pub no_options_text: String,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Log file path (optional, defaults to the data directory)
    #[serde(default)]
    pub file_path: Option<String>,

    /// Minimum log level (debug, info, warn, error)
    #[serde(default = "default_min_level")]
    pub min_level: String,

    /// Entries kept in memory
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

// Default value functions for serde
fn default_theme_name() -> String {
    defaults::THEME_NAME.to_string()
}

fn default_rounded() -> bool {
    defaults::ROUNDED
}

fn default_no_options_text() -> String {
    defaults::NO_OPTIONS_TEXT.to_string()
}

fn default_min_level() -> String {
    defaults::MIN_LOG_LEVEL.to_string()
}

fn default_max_entries() -> usize {
    defaults::MAX_LOG_ENTRIES
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            theme: default_theme_name(),
        }
    }
}

impl Default for ComponentSettings {
    fn default() -> Self {
        Self {
            size: Size::default(),
            rounded: default_rounded(),
            expansion_mode: ExpansionMode::default(),
            no_options_text: default_no_options_text(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            file_path: None,
            min_level: default_min_level(),
            max_entries: default_max_entries(),
        }
    }
}
