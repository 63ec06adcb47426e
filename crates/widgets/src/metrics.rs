//! Size presets translated into terminal cells.

use petal_core::Size;

/// Padding a size preset adds around text, in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeMetrics {
    /// Columns left and right of text
    pub pad_x: u16,
    /// Rows above and below text
    pub pad_y: u16,
}

impl SizeMetrics {
    pub fn for_size(size: Size) -> Self {
        match size {
            Size::Small => Self { pad_x: 0, pad_y: 0 },
            Size::Medium => Self { pad_x: 1, pad_y: 0 },
            Size::Large => Self { pad_x: 2, pad_y: 1 },
        }
    }
}

/// Defaults a component falls back to when a per-item override is absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StyleDefaults {
    pub size: Size,
    pub rounded: bool,
}
