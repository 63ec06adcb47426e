//! Themed terminal components for petal.
//!
//! Every component renders into a ratatui `Buffer` with a `Theme` and
//! reports user intent back through its own event type.

pub mod accordion;
pub mod accordion_group;
pub mod alert;
pub mod autocomplete;
pub mod avatar;
pub mod metrics;
pub mod text_input;

pub use accordion::Accordion;
pub use accordion_group::{AccordionGroupView, GroupEvent};
pub use alert::{Alert, AlertEvent, AlertVariant, Severity};
pub use autocomplete::{Autocomplete, AutocompleteEvent, FieldSize};
pub use avatar::{Avatar, AvatarEvent, AvatarShape, AvatarSize, Status};
pub use metrics::{SizeMetrics, StyleDefaults};
pub use text_input::TextInput;

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{buffer::Buffer, layout::Rect};
use unicode_width::UnicodeWidthChar;

use petal_theme::Theme;

/// Trait for all petal components.
pub trait Component {
    /// What the component reports back to its owner.
    type Event;

    /// Render the component with theme.
    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme);

    /// Handle keyboard event.
    /// Returns Some(event) if the key produced something the owner must see.
    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Self::Event>>;

    /// Handle mouse event against the areas saved by the last render.
    fn handle_mouse(&mut self, _mouse: MouseEvent) -> Result<Option<Self::Event>> {
        Ok(None) // Default: do nothing
    }
}

/// Check whether a terminal cell lies inside `area`.
pub fn hit(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Character-wrap `text` into rows of at most `width` display cells.
///
/// Explicit newlines are kept; the result always has at least one row.
pub fn wrap_text(text: &str, width: u16) -> Vec<String> {
    let width = width.max(1) as usize;
    let mut rows = Vec::new();

    for line in text.lines() {
        let mut row = String::new();
        let mut used = 0;
        for c in line.chars() {
            let w = UnicodeWidthChar::width(c).unwrap_or(0);
            if used + w > width && !row.is_empty() {
                rows.push(std::mem::take(&mut row));
                used = 0;
            }
            row.push(c);
            used += w;
        }
        rows.push(row);
    }

    if rows.is_empty() {
        rows.push(String::new());
    }
    rows
}

/// Number of rows `text` occupies when wrapped at `width` cells.
///
/// Saturates at `u16::MAX`.
pub fn wrapped_height(text: &str, width: u16) -> u16 {
    u16::try_from(wrap_text(text, width).len()).unwrap_or(u16::MAX)
}

/// Truncate `text` to at most `width` display cells.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    let mut used = 0;
    let mut out = String::new();
    for c in text.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_edges() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(hit(area, 2, 3));
        assert!(hit(area, 5, 4));
        assert!(!hit(area, 6, 4));
        assert!(!hit(area, 2, 5));
    }

    #[test]
    fn test_wrapped_height() {
        assert_eq!(wrapped_height("", 10), 1);
        assert_eq!(wrapped_height("abcdefghij", 10), 1);
        assert_eq!(wrapped_height("abcdefghijk", 10), 2);
        assert_eq!(wrapped_height("a\n\nb", 10), 3);
    }

    #[test]
    fn test_wrapped_height_saturates() {
        assert_eq!(wrapped_height(&"x\n".repeat(70_000), 10), u16::MAX);
    }

    #[test]
    fn test_wrap_text_respects_wide_chars() {
        assert_eq!(wrap_text("한국어", 5), vec!["한국", "어"]);
    }

    #[test]
    fn test_truncate_wide_chars() {
        assert_eq!(truncate_to_width("한국어", 5), "한국");
        assert_eq!(truncate_to_width("abc", 10), "abc");
    }
}
