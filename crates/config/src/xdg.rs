//! XDG Base Directory locations used by petal.

use anyhow::{Context, Result};
use std::path::PathBuf;

const APP_NAME: &str = "petal";

/// Configuration directory: `$XDG_CONFIG_HOME/petal` or `~/.config/petal`.
///
/// Holds `config.toml` and the user `themes/` directory.
pub fn get_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine config directory")
}

/// Data directory: `$XDG_DATA_HOME/petal` or `~/.local/share/petal`.
///
/// Default home of the log file.
pub fn get_data_dir() -> Result<PathBuf> {
    dirs::data_dir()
        .map(|p| p.join(APP_NAME))
        .context("Failed to determine data directory")
}

/// Log file used when `logging.file_path` is not set.
pub fn default_log_path() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("petal.log"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_are_app_scoped() {
        if let (Ok(config), Ok(data)) = (get_config_dir(), get_data_dir()) {
            assert!(config.ends_with(APP_NAME));
            assert!(data.ends_with(APP_NAME));
            assert_ne!(config, data);
        }
    }

    #[test]
    fn test_default_log_path_lives_in_data_dir() {
        if let (Ok(log), Ok(data)) = (default_log_path(), get_data_dir()) {
            assert_eq!(log.parent(), Some(data.as_path()));
        }
    }
}
