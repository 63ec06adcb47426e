//! Avatar showing an initial, with optional status badge and hover tooltip.

use anyhow::Result;
use crossterm::event::{KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use petal_core::{Size, ThemeColor};
use petal_theme::Theme;

use crate::{hit, truncate_to_width, Component};

const STATUS_DOT: &str = "●";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AvatarShape {
    #[default]
    Circular,
    Rounded,
    Square,
}

/// Avatar edge length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarSize {
    /// 32, 40 or 56 px
    Preset(Size),
    /// Explicit width in terminal columns
    Cells(u16),
}

impl Default for AvatarSize {
    fn default() -> Self {
        AvatarSize::Preset(Size::Medium)
    }
}

impl AvatarSize {
    /// Nominal size in pixels.
    pub fn pixels(self) -> u16 {
        match self {
            AvatarSize::Preset(Size::Small) => 32,
            AvatarSize::Preset(Size::Medium) => 40,
            AvatarSize::Preset(Size::Large) => 56,
            AvatarSize::Cells(cells) => cells.saturating_mul(8),
        }
    }

    /// Width in columns, one column per 8 px.
    pub fn columns(self) -> u16 {
        match self {
            AvatarSize::Cells(cells) => cells.max(1),
            preset => preset.pixels() / 8,
        }
    }

    /// Height in rows; cells are roughly twice as tall as wide.
    pub fn rows(self) -> u16 {
        self.columns().div_ceil(2)
    }
}

/// Presence badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    None,
    Online,
    Offline,
    Away,
    Busy,
}

impl Status {
    pub fn color(self, theme: &Theme) -> Option<Color> {
        match self {
            Status::None => None,
            Status::Online => Some(theme.success.main),
            Status::Offline => Some(theme.disabled),
            Status::Away => Some(theme.warning.main),
            Status::Busy => Some(theme.error.main),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AvatarEvent {
    Clicked,
}

#[derive(Debug, Clone)]
pub struct Avatar {
    alt: String,
    fallback: String,
    shape: AvatarShape,
    size: AvatarSize,
    color: ThemeColor,
    bordered: bool,
    status: Status,
    tooltip: Option<String>,
    hovered: bool,
    last_area: Option<Rect>,
}

impl Avatar {
    /// Avatar labelled by the first letter of `alt`.
    pub fn new(alt: impl Into<String>) -> Self {
        Self {
            alt: alt.into(),
            fallback: String::new(),
            shape: AvatarShape::default(),
            size: AvatarSize::default(),
            color: ThemeColor::Primary,
            bordered: false,
            status: Status::default(),
            tooltip: None,
            hovered: false,
            last_area: None,
        }
    }

    /// Text shown when `alt` is empty.
    pub fn with_fallback(mut self, text: impl Into<String>) -> Self {
        self.fallback = text.into();
        self
    }

    pub fn with_shape(mut self, shape: AvatarShape) -> Self {
        self.shape = shape;
        self
    }

    pub fn with_size(mut self, size: AvatarSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_color(mut self, color: ThemeColor) -> Self {
        self.color = color;
        self
    }

    pub fn bordered(mut self, bordered: bool) -> Self {
        self.bordered = bordered;
        self
    }

    pub fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    pub fn with_tooltip(mut self, tooltip: impl Into<String>) -> Self {
        self.tooltip = Some(tooltip.into());
        self
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Text drawn inside the avatar.
    pub fn label(&self) -> String {
        match self.alt.graphemes(true).next() {
            Some(first) => first.to_uppercase(),
            None => self.fallback.clone(),
        }
    }

    /// (columns, rows) of the avatar itself.
    pub fn footprint(&self) -> (u16, u16) {
        (self.size.columns(), self.size.rows())
    }

    /// Rows needed including the tooltip line.
    pub fn height(&self) -> u16 {
        let tooltip = u16::from(self.tooltip.is_some());
        self.size.rows() + tooltip
    }

    fn render_tooltip(&self, avatar: Rect, bounds: Rect, buf: &mut Buffer, theme: &Theme) {
        let Some(tooltip) = &self.tooltip else {
            return;
        };
        let y = avatar.bottom();
        if !self.hovered || y >= bounds.bottom() {
            return;
        }

        let text = format!(" {} ", tooltip);
        let width = (text.width() as u16).min(bounds.right() - avatar.x);
        let style = Style::default().bg(theme.selected_bg).fg(theme.selected_fg);
        buf.set_stringn(
            avatar.x,
            y,
            truncate_to_width(&text, width as usize),
            width as usize,
            style,
        );
    }
}

impl Component for Avatar {
    type Event = AvatarEvent;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let (columns, rows) = self.footprint();
        let avatar = Rect {
            width: columns.min(area.width),
            height: rows.min(area.height),
            ..area
        };
        self.last_area = Some(avatar);
        if avatar.width == 0 || avatar.height == 0 {
            return;
        }

        let palette = theme.palette(self.color);
        let fill = Style::default().bg(palette.main).fg(palette.contrast_text);

        let inner = if self.bordered {
            let block = Block::default()
                .borders(Borders::ALL)
                .border_type(match self.shape {
                    AvatarShape::Square => BorderType::Plain,
                    AvatarShape::Circular | AvatarShape::Rounded => BorderType::Rounded,
                })
                .border_style(Style::default().fg(theme.divider).bg(theme.bg))
                .style(fill);
            let inner = block.inner(avatar);
            block.render(avatar, buf);
            inner
        } else {
            buf.set_style(avatar, fill);
            if self.shape == AvatarShape::Circular && avatar.width >= 3 && avatar.height >= 2 {
                let blank = Style::default().bg(theme.bg);
                for (x, y) in [
                    (avatar.x, avatar.y),
                    (avatar.right() - 1, avatar.y),
                    (avatar.x, avatar.bottom() - 1),
                    (avatar.right() - 1, avatar.bottom() - 1),
                ] {
                    buf[(x, y)].set_symbol(" ").set_style(blank);
                }
            }
            avatar
        };

        // Label centered in the fill
        if inner.width > 0 && inner.height > 0 {
            let label = truncate_to_width(&self.label(), inner.width as usize);
            let label_width = label.width() as u16;
            let x = inner.x + (inner.width - label_width) / 2;
            let y = inner.y + (inner.height - 1) / 2;
            buf.set_stringn(
                x,
                y,
                label,
                label_width as usize,
                fill.add_modifier(Modifier::BOLD),
            );
        }

        if let Some(color) = self.status.color(theme) {
            let (x, y) = (avatar.right() - 1, avatar.bottom() - 1);
            buf[(x, y)]
                .set_symbol(STATUS_DOT)
                .set_style(Style::default().fg(color).bg(theme.bg));
        }

        self.render_tooltip(avatar, area, buf, theme);
    }

    fn handle_key(&mut self, _key: KeyEvent) -> Result<Option<Self::Event>> {
        Ok(None)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<Self::Event>> {
        let Some(area) = self.last_area else {
            return Ok(None);
        };
        let inside = hit(area, mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Moved => {
                self.hovered = inside;
                Ok(None)
            }
            MouseEventKind::Down(MouseButton::Left) if inside => Ok(Some(AvatarEvent::Clicked)),
            _ => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::accordion::tests::{buffer_text, row_text};

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_preset_sizes() {
        assert_eq!(AvatarSize::Preset(Size::Small).columns(), 4);
        assert_eq!(AvatarSize::Preset(Size::Medium).columns(), 5);
        assert_eq!(AvatarSize::Preset(Size::Large).columns(), 7);
        assert_eq!(AvatarSize::Preset(Size::Large).rows(), 4);
        assert_eq!(AvatarSize::Cells(0).columns(), 1);
    }

    #[test]
    fn test_label_is_first_grapheme_uppercased() {
        assert_eq!(Avatar::new("jane doe").label(), "J");
        assert_eq!(Avatar::new("éclair").label(), "É");
        assert_eq!(Avatar::new("").with_fallback("AB").label(), "AB");
    }

    #[test]
    fn test_render_label_and_status() {
        let theme = Theme::default();
        let mut avatar = Avatar::new("kim").with_status(Status::Busy);
        let area = Rect::new(0, 0, 10, 4);
        let mut buf = Buffer::empty(area);

        avatar.render(area, &mut buf, &theme);

        // 5x3 footprint: label on the middle row, dot bottom-right
        assert_eq!(buf[(2, 1)].symbol(), "K");
        assert_eq!(buf[(2, 1)].bg, theme.primary.main);
        assert_eq!(buf[(4, 2)].symbol(), STATUS_DOT);
        assert_eq!(buf[(4, 2)].fg, theme.error.main);
    }

    #[test]
    fn test_circular_clears_corners() {
        let theme = Theme::default();
        let mut avatar = Avatar::new("a");
        let area = Rect::new(0, 0, 5, 3);
        let mut buf = Buffer::empty(area);
        avatar.render(area, &mut buf, &theme);

        assert_eq!(buf[(0, 0)].bg, theme.bg);
        assert_eq!(buf[(1, 0)].bg, theme.primary.main);
    }

    #[test]
    fn test_tooltip_follows_hover() {
        let theme = Theme::default();
        let mut avatar = Avatar::new("lee").with_tooltip("Lee Park");
        let area = Rect::new(0, 0, 20, 4);

        let mut buf = Buffer::empty(area);
        avatar.render(area, &mut buf, &theme);
        assert!(!buffer_text(&buf).contains("Lee Park"));

        avatar
            .handle_mouse(mouse(MouseEventKind::Moved, 1, 1))
            .unwrap();
        assert!(avatar.is_hovered());

        let mut buf = Buffer::empty(area);
        avatar.render(area, &mut buf, &theme);
        assert!(row_text(&buf, 3).contains("Lee Park"));

        avatar
            .handle_mouse(mouse(MouseEventKind::Moved, 15, 1))
            .unwrap();
        assert!(!avatar.is_hovered());
        assert_eq!(avatar.height(), 4);
    }

    #[test]
    fn test_click_inside_reports() {
        let theme = Theme::default();
        let mut avatar = Avatar::new("a");
        let area = Rect::new(0, 0, 10, 3);
        let mut buf = Buffer::empty(area);
        avatar.render(area, &mut buf, &theme);

        let down = MouseEventKind::Down(MouseButton::Left);
        assert_eq!(
            avatar.handle_mouse(mouse(down, 2, 1)).unwrap(),
            Some(AvatarEvent::Clicked)
        );
        assert!(avatar.handle_mouse(mouse(down, 8, 1)).unwrap().is_none());
    }
}
