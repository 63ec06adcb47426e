//! Panel definition: one collapsible unit of title and content.

use crate::{Accent, Size};

/// Stable identifier of a panel within its group.
pub type PanelId = String;

/// Per-panel visual overrides.
///
/// `None` fields inherit the defaults of the owning group or config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelStyle {
    pub size: Option<Size>,
    pub rounded: Option<bool>,
    /// Header background tint
    pub header_color: Option<Accent>,
    /// Disabled panels ignore toggle gestures
    pub disabled: bool,
}

/// Panel supplied by the caller.
///
/// Immutable from the controller's point of view: the caller replaces the
/// whole sequence instead of editing panels in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Panel {
    pub id: PanelId,
    pub title: String,
    pub content: String,
    pub style: PanelStyle,
}

impl Panel {
    pub fn new(
        id: impl Into<PanelId>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            style: PanelStyle::default(),
        }
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.style.size = Some(size);
        self
    }

    pub fn with_rounded(mut self, rounded: bool) -> Self {
        self.style.rounded = Some(rounded);
        self
    }

    pub fn with_header_color(mut self, accent: impl Into<Accent>) -> Self {
        self.style.header_color = Some(accent.into());
        self
    }

    pub fn disabled(mut self, disabled: bool) -> Self {
        self.style.disabled = disabled;
        self
    }
}
