//! Theme color definitions.

use petal_core::{Accent, ThemeColor};
use ratatui::style::Color;

/// One palette role in four shades.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteColor {
    /// Default fill (avatar background, filled alert)
    pub main: Color,
    /// Soft fill (standard alert background, tags)
    pub light: Color,
    /// Text on soft fills, pressed states
    pub dark: Color,
    /// Text drawn on top of `main`
    pub contrast_text: Color,
}

/// Application theme with semantic color assignments.
///
/// Base colors cover the chrome around components; the seven palette
/// roles are what `ThemeColor` and `Accent::Palette` resolve to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Theme {
    /// Theme name for display
    pub name: &'static str,

    // === Base ===
    /// Surface background
    pub bg: Color,
    /// Main text
    pub fg: Color,
    /// Header strips, hovered surfaces
    pub accented_bg: Color,
    /// Focus rings, active borders
    pub accented_fg: Color,
    /// Highlighted list item background
    pub selected_bg: Color,
    /// Highlighted list item text
    pub selected_fg: Color,
    /// Inactive elements, placeholders, offline badge
    pub disabled: Color,
    /// Separators and idle borders
    pub divider: Color,

    // === Palette ===
    pub primary: PaletteColor,
    pub secondary: PaletteColor,
    pub tertiary: PaletteColor,
    pub error: PaletteColor,
    pub warning: PaletteColor,
    pub info: PaletteColor,
    pub success: PaletteColor,
}

impl Theme {
    /// Resolve a palette role.
    pub fn palette(&self, color: ThemeColor) -> PaletteColor {
        match color {
            ThemeColor::Primary => self.primary,
            ThemeColor::Secondary => self.secondary,
            ThemeColor::Tertiary => self.tertiary,
            ThemeColor::Error => self.error,
            ThemeColor::Warning => self.warning,
            ThemeColor::Info => self.info,
            ThemeColor::Success => self.success,
        }
    }

    /// Resolve an accent to a concrete color (palette accents use `main`).
    pub fn accent(&self, accent: Accent) -> Color {
        match accent {
            Accent::Palette(color) => self.palette(color).main,
            Accent::Rgb([r, g, b]) => Color::Rgb(r, g, b),
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        *Self::get_by_name("default")
    }
}
