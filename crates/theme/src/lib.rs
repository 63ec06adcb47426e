//! Theme system for petal.
//!
//! Provides palette-based themes with support for custom TOML themes.

mod colors;
mod loader;

pub use colors::{PaletteColor, Theme};
pub use loader::{load_theme, load_theme_from_str};

use ratatui::style::Color;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

/// Built-in themes as (name, embedded TOML), in menu order.
const BUILTIN: [(&str, &str); 3] = [
    ("default", include_str!("../themes/default.toml")),
    ("dark", include_str!("../themes/dark.toml")),
    ("terminal", include_str!("../themes/terminal.toml")),
];

const BUILTIN_NAMES: [&str; 3] = [BUILTIN[0].0, BUILTIN[1].0, BUILTIN[2].0];

static BUILTIN_THEMES: OnceLock<Vec<Theme>> = OnceLock::new();

/// Parsed user themes, keyed by file stem.
static USER_THEMES: OnceLock<Mutex<HashMap<String, &'static Theme>>> = OnceLock::new();

static THEMES_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Set the directory searched for user themes. Only the first call counts.
pub fn set_themes_dir(path: PathBuf) {
    let _ = THEMES_DIR.set(path);
}

fn flat(main: Color, contrast_text: Color) -> PaletteColor {
    PaletteColor {
        main,
        light: main,
        dark: main,
        contrast_text,
    }
}

/// Used when an embedded theme fails to parse.
fn fallback_theme(name: &'static str) -> Theme {
    Theme {
        name,
        bg: Color::Black,
        fg: Color::White,
        accented_bg: Color::DarkGray,
        accented_fg: Color::LightRed,
        selected_bg: Color::Blue,
        selected_fg: Color::White,
        disabled: Color::Gray,
        divider: Color::DarkGray,
        primary: flat(Color::Red, Color::White),
        secondary: flat(Color::DarkGray, Color::White),
        tertiary: flat(Color::Yellow, Color::Black),
        error: flat(Color::Red, Color::White),
        warning: flat(Color::Yellow, Color::Black),
        info: flat(Color::Blue, Color::White),
        success: flat(Color::Green, Color::Black),
    }
}

fn builtin_themes() -> &'static [Theme] {
    BUILTIN_THEMES.get_or_init(|| {
        BUILTIN
            .iter()
            .map(|&(name, content)| {
                load_theme_from_str(content, name).unwrap_or_else(|e| {
                    log::error!("Built-in theme '{}' is invalid: {}. Using fallback.", name, e);
                    fallback_theme(name)
                })
            })
            .collect()
    })
}

fn builtin(name: &str) -> Option<&'static Theme> {
    builtin_themes().iter().find(|theme| theme.name == name)
}

/// Look `name` up in the user themes directory, parsing it at most once.
fn user_theme(name: &str) -> Option<&'static Theme> {
    let cache = USER_THEMES.get_or_init(|| Mutex::new(HashMap::new()));
    if let Some(theme) = cache.lock().ok()?.get(name) {
        return Some(*theme);
    }

    let path = THEMES_DIR.get()?.join(format!("{}.toml", name));
    if !path.exists() {
        return None;
    }

    match load_theme(&path) {
        Ok(theme) => {
            log::info!("Loaded user theme '{}'", path.display());
            // Themes live for the whole program
            let theme: &'static Theme = Box::leak(Box::new(theme));
            if let Ok(mut cache) = cache.lock() {
                cache.insert(name.to_string(), theme);
            }
            Some(theme)
        }
        Err(e) => {
            log::warn!("Ignoring user theme '{}': {}", path.display(), e);
            None
        }
    }
}

impl Theme {
    /// Resolve a theme by name.
    ///
    /// A user theme with the same name shadows the built-in one; unknown
    /// names resolve to the default theme.
    pub fn get_by_name(name: &str) -> &'static Theme {
        user_theme(name)
            .or_else(|| builtin(name))
            .unwrap_or(&builtin_themes()[0])
    }

    /// All built-in themes.
    pub fn all_themes() -> Vec<&'static Theme> {
        builtin_themes().iter().collect()
    }

    /// Names of the built-in themes.
    pub fn all_theme_names() -> &'static [&'static str] {
        &BUILTIN_NAMES
    }
}
