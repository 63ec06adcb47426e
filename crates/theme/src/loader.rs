//! Theme loading from TOML files.

use std::path::Path;
use std::str::FromStr;

use anyhow::Result;
use ratatui::style::Color;
use serde::Deserialize;

use crate::{PaletteColor, Theme};

/// Color representation in TOML.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum TomlColor {
    /// Color name (`"DarkGray"`) or hex string (`"#e9501f"`)
    Named(String),
    Rgb { rgb: [u8; 3] },
}

impl TomlColor {
    fn to_color(&self) -> Color {
        match self {
            TomlColor::Named(name) => match name.as_str() {
                "Black" => Color::Black,
                "Red" => Color::Red,
                "Green" => Color::Green,
                "Yellow" => Color::Yellow,
                "Blue" => Color::Blue,
                "Magenta" => Color::Magenta,
                "Cyan" => Color::Cyan,
                "Gray" => Color::Gray,
                "DarkGray" => Color::DarkGray,
                "LightRed" => Color::LightRed,
                "LightGreen" => Color::LightGreen,
                "LightYellow" => Color::LightYellow,
                "LightBlue" => Color::LightBlue,
                "LightMagenta" => Color::LightMagenta,
                "LightCyan" => Color::LightCyan,
                "White" => Color::White,
                // Hex strings and lowercase names
                other => Color::from_str(other).unwrap_or(Color::White),
            },
            TomlColor::Rgb { rgb } => Color::Rgb(rgb[0], rgb[1], rgb[2]),
        }
    }
}

/// TOML base colors.
#[derive(Debug, Clone, Deserialize)]
struct TomlColors {
    bg: TomlColor,
    fg: TomlColor,
    accented_bg: TomlColor,
    accented_fg: TomlColor,
    selected_bg: TomlColor,
    selected_fg: TomlColor,
    disabled: TomlColor,
    divider: TomlColor,
}

/// TOML palette role.
#[derive(Debug, Clone, Deserialize)]
struct TomlPaletteColor {
    main: TomlColor,
    light: TomlColor,
    dark: TomlColor,
    contrast_text: TomlColor,
}

impl TomlPaletteColor {
    fn to_palette(&self) -> PaletteColor {
        PaletteColor {
            main: self.main.to_color(),
            light: self.light.to_color(),
            dark: self.dark.to_color(),
            contrast_text: self.contrast_text.to_color(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
struct TomlPalette {
    primary: TomlPaletteColor,
    secondary: TomlPaletteColor,
    tertiary: TomlPaletteColor,
    error: TomlPaletteColor,
    warning: TomlPaletteColor,
    info: TomlPaletteColor,
    success: TomlPaletteColor,
}

/// TOML theme structure.
#[derive(Debug, Clone, Deserialize)]
struct TomlTheme {
    name: String,
    colors: TomlColors,
    palette: TomlPalette,
}

impl TomlTheme {
    fn into_theme(self, name: &'static str) -> Theme {
        let colors = &self.colors;
        let palette = &self.palette;
        Theme {
            name,
            bg: colors.bg.to_color(),
            fg: colors.fg.to_color(),
            accented_bg: colors.accented_bg.to_color(),
            accented_fg: colors.accented_fg.to_color(),
            selected_bg: colors.selected_bg.to_color(),
            selected_fg: colors.selected_fg.to_color(),
            disabled: colors.disabled.to_color(),
            divider: colors.divider.to_color(),
            primary: palette.primary.to_palette(),
            secondary: palette.secondary.to_palette(),
            tertiary: palette.tertiary.to_palette(),
            error: palette.error.to_palette(),
            warning: palette.warning.to_palette(),
            info: palette.info.to_palette(),
            success: palette.success.to_palette(),
        }
    }
}

/// Load theme from TOML file.
///
/// Returns the parsed theme with a leaked static name string.
pub fn load_theme(path: &Path) -> Result<Theme> {
    let content = std::fs::read_to_string(path)?;
    let toml_theme: TomlTheme = toml::from_str(&content)?;

    // Leak the name string to get 'static lifetime
    let name: &'static str = Box::leak(toml_theme.name.clone().into_boxed_str());

    Ok(toml_theme.into_theme(name))
}

/// Load theme from TOML string with a static name.
pub fn load_theme_from_str(content: &str, name: &'static str) -> Result<Theme> {
    let toml_theme: TomlTheme = toml::from_str(content)?;
    Ok(toml_theme.into_theme(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const MINIMAL: &str = r##"
name = "mini"

[colors]
bg = "Black"
fg = "#fafafa"
accented_bg = { rgb = [10, 20, 30] }
accented_fg = "Cyan"
selected_bg = "Blue"
selected_fg = "White"
disabled = "Gray"
divider = "DarkGray"

[palette.primary]
main = "#e9501f"
light = "#ff8045"
dark = "#af1f00"
contrast_text = "White"

[palette.secondary]
main = "Gray"
light = "White"
dark = "Black"
contrast_text = "White"

[palette.tertiary]
main = "Yellow"
light = "LightYellow"
dark = "Yellow"
contrast_text = "Black"

[palette.error]
main = "Red"
light = "LightRed"
dark = "Red"
contrast_text = "White"

[palette.warning]
main = "Yellow"
light = "LightYellow"
dark = "Yellow"
contrast_text = "Black"

[palette.info]
main = "Blue"
light = "LightBlue"
dark = "Blue"
contrast_text = "White"

[palette.success]
main = "Green"
light = "LightGreen"
dark = "Green"
contrast_text = "Black"
"##;

    #[test]
    fn test_color_forms() {
        let theme = load_theme_from_str(MINIMAL, "mini").unwrap();
        assert_eq!(theme.bg, Color::Black);
        assert_eq!(theme.fg, Color::Rgb(0xfa, 0xfa, 0xfa));
        assert_eq!(theme.accented_bg, Color::Rgb(10, 20, 30));
        assert_eq!(theme.primary.main, Color::Rgb(0xe9, 0x50, 0x1f));
    }

    #[test]
    fn test_missing_palette_is_error() {
        let broken = MINIMAL.split("[palette.primary]").next().unwrap();
        assert!(load_theme_from_str(broken, "broken").is_err());
    }

    #[test]
    fn test_load_theme_from_file_uses_file_name_field() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let theme = load_theme(file.path()).unwrap();
        assert_eq!(theme.name, "mini");
        assert_eq!(theme.success.main, Color::Green);
    }
}
