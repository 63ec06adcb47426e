//! Shared component vocabulary: size presets, palette roles and accents.

use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Size preset shared by all components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    #[default]
    Medium,
    Large,
}

impl Size {
    /// Lowercase name as used in config files.
    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }
}

impl std::str::FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "small" | "sm" => Ok(Size::Small),
            "medium" | "md" => Ok(Size::Medium),
            "large" | "lg" => Ok(Size::Large),
            _ => Err(format!("Unknown size: {}", s)),
        }
    }
}

/// Palette role a component can be tinted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeColor {
    #[default]
    Primary,
    Secondary,
    Tertiary,
    Error,
    Warning,
    Info,
    Success,
}

impl ThemeColor {
    /// All palette roles in declaration order.
    pub const ALL: [ThemeColor; 7] = [
        ThemeColor::Primary,
        ThemeColor::Secondary,
        ThemeColor::Tertiary,
        ThemeColor::Error,
        ThemeColor::Warning,
        ThemeColor::Info,
        ThemeColor::Success,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeColor::Primary => "primary",
            ThemeColor::Secondary => "secondary",
            ThemeColor::Tertiary => "tertiary",
            ThemeColor::Error => "error",
            ThemeColor::Warning => "warning",
            ThemeColor::Info => "info",
            ThemeColor::Success => "success",
        }
    }
}

/// Header/background accent: either a palette role or a fixed RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Accent {
    Palette(ThemeColor),
    Rgb([u8; 3]),
}

impl Accent {
    /// Parse `#rgb` or `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex: &str) -> Result<Self, CoreError> {
        let digits = hex.trim().trim_start_matches('#');
        let invalid = || CoreError::InvalidColor(hex.to_string());

        let expanded: String = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect(),
            6 => digits.to_string(),
            _ => return Err(invalid()),
        };

        let channel = |i: usize| {
            expanded
                .get(i..i + 2)
                .and_then(|s| u8::from_str_radix(s, 16).ok())
                .ok_or_else(invalid)
        };

        Ok(Accent::Rgb([channel(0)?, channel(2)?, channel(4)?]))
    }
}

impl From<ThemeColor> for Accent {
    fn from(color: ThemeColor) -> Self {
        Accent::Palette(color)
    }
}
