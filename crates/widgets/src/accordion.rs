//! Accordion panel rendering and the standalone `Accordion` component.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use petal_core::{
    Accent, ExpansionController, ExpansionMode, Panel, PanelBinding, Size, ToggleOutcome,
};
use petal_theme::Theme;

use crate::{
    hit, truncate_to_width, wrap_text, wrapped_height, Component, SizeMetrics, StyleDefaults,
};

/// Expand icon while open.
pub const ICON_OPEN: &str = "▾";
/// Expand icon while closed.
pub const ICON_CLOSED: &str = "▸";

/// Everything needed to draw one panel.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PanelLook<'a> {
    pub panel: &'a Panel,
    pub open: bool,
    pub focused: bool,
    pub defaults: StyleDefaults,
    /// (open, closed) icons
    pub icons: (&'a str, &'a str),
}

impl PanelLook<'_> {
    fn size(&self) -> Size {
        self.panel.style.size.unwrap_or(self.defaults.size)
    }

    fn rounded(&self) -> bool {
        self.panel.style.rounded.unwrap_or(self.defaults.rounded)
    }

    /// Total rows including borders.
    pub fn height(&self, width: u16) -> u16 {
        let m = SizeMetrics::for_size(self.size());
        let height = 2 + header_rows(m);
        if !self.open {
            return height;
        }
        let body_width = width.saturating_sub(2 + 2 * body_pad_x(m));
        height
            .saturating_add(1 + 2 * m.pad_y)
            .saturating_add(wrapped_height(&self.panel.content, body_width))
    }
}

fn header_rows(m: SizeMetrics) -> u16 {
    1 + 2 * m.pad_y
}

fn body_pad_x(m: SizeMetrics) -> u16 {
    m.pad_x + 1
}

/// Text color readable on top of `accent`.
pub(crate) fn contrast_on(theme: &Theme, accent: Accent) -> Color {
    match accent {
        Accent::Palette(color) => theme.palette(color).contrast_text,
        Accent::Rgb([r, g, b]) => {
            // Perceived brightness (ITU-R BT.601)
            let luma = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
            if luma > 150 {
                Color::Black
            } else {
                Color::White
            }
        }
    }
}

fn header_style(theme: &Theme, look: &PanelLook) -> Style {
    if look.panel.style.disabled {
        return Style::default().fg(theme.disabled).bg(theme.accented_bg);
    }

    match (look.panel.style.header_color, look.open) {
        (Some(accent), true) => Style::default()
            .bg(theme.accent(accent))
            .fg(contrast_on(theme, accent)),
        (Some(accent), false) => Style::default()
            .bg(theme.accented_bg)
            .fg(theme.accent(accent)),
        (None, true) => Style::default().bg(theme.selected_bg).fg(theme.selected_fg),
        (None, false) => Style::default().bg(theme.accented_bg).fg(theme.fg),
    }
}

/// Draw one panel into `area`; returns the header rect for hit testing.
pub(crate) fn render_panel(area: Rect, buf: &mut Buffer, theme: &Theme, look: &PanelLook) -> Rect {
    let m = SizeMetrics::for_size(look.size());
    let disabled = look.panel.style.disabled;

    let border_color = if disabled {
        theme.disabled
    } else if look.focused {
        theme.accented_fg
    } else {
        theme.divider
    };
    let border_type = if look.rounded() {
        BorderType::Rounded
    } else {
        BorderType::Plain
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(theme.bg).fg(theme.fg));
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width == 0 || inner.height == 0 {
        return inner;
    }

    // Header strip
    let header = Rect {
        height: header_rows(m).min(inner.height),
        ..inner
    };
    let style = header_style(theme, look);
    buf.set_style(header, style);

    let icon = if look.open { look.icons.0 } else { look.icons.1 };
    let icon_width = icon.width() as u16;
    let title_y = header.y + m.pad_y.min(header.height - 1);
    let title_width = header.width.saturating_sub(2 * m.pad_x + icon_width + 1);

    let mut title_style = style;
    if look.open || look.size() == Size::Large {
        title_style = title_style.add_modifier(Modifier::BOLD);
    }
    if title_width > 0 {
        let title = truncate_to_width(&look.panel.title, title_width as usize);
        buf.set_stringn(
            header.x + m.pad_x,
            title_y,
            title,
            title_width as usize,
            title_style,
        );
    }
    if header.width >= m.pad_x + icon_width {
        let icon_x = header.right() - m.pad_x - icon_width;
        buf.set_stringn(icon_x, title_y, icon, icon_width as usize, style);
    }

    if !look.open {
        return header;
    }

    // Divider between header and body
    let divider_y = header.bottom();
    if divider_y >= inner.bottom() {
        return header;
    }
    buf.set_stringn(
        inner.x,
        divider_y,
        "─".repeat(inner.width as usize),
        inner.width as usize,
        Style::default().fg(theme.divider).bg(theme.bg),
    );

    // Body
    let pad_x = body_pad_x(m);
    let body_x = inner.x + pad_x.min(inner.width);
    let body_width = inner.width.saturating_sub(2 * pad_x);
    let body_style = Style::default()
        .fg(if disabled { theme.disabled } else { theme.fg })
        .bg(theme.bg);

    let first_row = divider_y + 1 + m.pad_y;
    for (i, row) in wrap_text(&look.panel.content, body_width).iter().enumerate() {
        let y = first_row + i as u16;
        if y >= inner.bottom() || body_width == 0 {
            break;
        }
        buf.set_stringn(body_x, y, row, body_width as usize, body_style);
    }

    header
}

/// Single collapsible panel.
///
/// Uncontrolled by default (state owned by a private one-panel
/// controller); `Accordion::controlled` hands the state to the caller.
#[derive(Debug)]
pub struct Accordion {
    binding: PanelBinding,
    controller: ExpansionController,
    defaults: StyleDefaults,
    icons: (String, String),
    focused: bool,
    last_header_area: Option<Rect>,
}

impl Accordion {
    /// Create an uncontrolled, initially closed accordion.
    pub fn new(panel: Panel) -> Self {
        let controller = single_panel_controller(&panel, false);
        Self::from_parts(PanelBinding::uncontrolled(panel), controller)
    }

    /// Create an accordion whose open state is owned by the caller.
    pub fn controlled(
        panel: Panel,
        is_open: impl Fn() -> bool + 'static,
        on_toggle: impl FnMut(bool) + 'static,
    ) -> Self {
        let controller = single_panel_controller(&panel, false);
        Self::from_parts(
            PanelBinding::controlled(panel, is_open, on_toggle),
            controller,
        )
    }

    fn from_parts(binding: PanelBinding, controller: ExpansionController) -> Self {
        Self {
            binding,
            controller,
            defaults: StyleDefaults::default(),
            icons: (ICON_OPEN.to_string(), ICON_CLOSED.to_string()),
            focused: false,
            last_header_area: None,
        }
    }

    /// Initial open state of an uncontrolled accordion.
    ///
    /// Ignored for controlled accordions.
    pub fn default_expanded(mut self, expanded: bool) -> Self {
        if !self.binding.is_controlled() {
            self.controller = single_panel_controller(self.binding.panel(), expanded);
        }
        self
    }

    pub fn with_defaults(mut self, defaults: StyleDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    /// Replace the open/closed expand icons.
    pub fn with_expand_icons(mut self, open: impl Into<String>, closed: impl Into<String>) -> Self {
        self.icons = (open.into(), closed.into());
        self
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    pub fn panel(&self) -> &Panel {
        self.binding.panel()
    }

    pub fn is_open(&self) -> bool {
        self.binding.is_open(&self.controller)
    }

    /// Toggle as if the header had been activated.
    pub fn toggle(&mut self) -> ToggleOutcome {
        self.binding.request_toggle(&mut self.controller)
    }

    /// Rows needed at `width`.
    pub fn height(&self, width: u16) -> u16 {
        self.look().height(width)
    }

    fn look(&self) -> PanelLook<'_> {
        PanelLook {
            panel: self.binding.panel(),
            open: self.is_open(),
            focused: self.focused,
            defaults: self.defaults,
            icons: (&self.icons.0, &self.icons.1),
        }
    }

    fn report(outcome: ToggleOutcome) -> Option<ToggleOutcome> {
        match outcome {
            ToggleOutcome::Ignored => None,
            other => Some(other),
        }
    }
}

fn single_panel_controller(panel: &Panel, expanded: bool) -> ExpansionController {
    ExpansionController::new(
        ExpansionMode::Multiple,
        [panel.id.clone()],
        expanded.then(|| panel.id.clone()),
    )
}

impl Component for Accordion {
    type Event = ToggleOutcome;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        let height = self.height(area.width).min(area.height);
        let panel_area = Rect { height, ..area };
        let header = render_panel(panel_area, buf, theme, &self.look());
        self.last_header_area = Some(header);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Self::Event>> {
        match key.code {
            KeyCode::Enter | KeyCode::Char(' ') => Ok(Self::report(self.toggle())),
            _ => Ok(None),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<Self::Event>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        let Some(header) = self.last_header_area else {
            return Ok(None);
        };
        if !hit(header, mouse.column, mouse.row) {
            return Ok(None);
        }
        Ok(Self::report(self.toggle()))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use crossterm::event::KeyModifiers;

    use super::*;

    pub(crate) fn row_text(buf: &Buffer, y: u16) -> String {
        let area = buf.area;
        (area.x..area.right())
            .map(|x| buf[(x, y)].symbol().to_string())
            .collect()
    }

    pub(crate) fn buffer_text(buf: &Buffer) -> String {
        (buf.area.y..buf.area.bottom())
            .map(|y| row_text(buf, y))
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn enter() -> KeyEvent {
        KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE)
    }

    fn click(column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_closed_accordion_hides_content() {
        let theme = Theme::default();
        let mut accordion = Accordion::new(Panel::new("faq", "Shipping", "Ships in 3 days"));
        let area = Rect::new(0, 0, 30, 6);
        let mut buf = Buffer::empty(area);

        accordion.render(area, &mut buf, &theme);

        let text = buffer_text(&buf);
        assert!(text.contains("Shipping"));
        assert!(text.contains(ICON_CLOSED));
        assert!(!text.contains("Ships in"));
        assert_eq!(accordion.height(30), 3);
    }

    #[test]
    fn test_default_expanded_shows_content() {
        let theme = Theme::default();
        let mut accordion =
            Accordion::new(Panel::new("faq", "Shipping", "Ships in 3 days")).default_expanded(true);
        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);

        accordion.render(area, &mut buf, &theme);

        let text = buffer_text(&buf);
        assert!(text.contains("Ships in 3 days"));
        assert!(text.contains(ICON_OPEN));
        // border + header + divider + body + border
        assert_eq!(accordion.height(30), 5);
    }

    #[test]
    fn test_enter_toggles_uncontrolled() {
        let mut accordion = Accordion::new(Panel::new("a", "A", "body"));
        let event = accordion.handle_key(enter()).unwrap();
        assert_eq!(
            event,
            Some(ToggleOutcome::Applied {
                open: true,
                changed: true
            })
        );
        assert!(accordion.is_open());
    }

    #[test]
    fn test_header_click_toggles() {
        let theme = Theme::default();
        let mut accordion = Accordion::new(Panel::new("a", "A", "body"));
        let area = Rect::new(0, 0, 20, 6);
        let mut buf = Buffer::empty(area);
        accordion.render(area, &mut buf, &theme);

        assert!(accordion.handle_mouse(click(19, 5)).unwrap().is_none());
        assert!(accordion.handle_mouse(click(3, 1)).unwrap().is_some());
        assert!(accordion.is_open());
    }

    #[test]
    fn test_controlled_accordion_follows_caller() {
        let external = Rc::new(Cell::new(false));
        let requested = Rc::new(Cell::new(None));
        let read = Rc::clone(&external);
        let sink = Rc::clone(&requested);

        let mut accordion = Accordion::controlled(
            Panel::new("a", "A", "body"),
            move || read.get(),
            move |open| sink.set(Some(open)),
        )
        .default_expanded(true);

        // Caller owns the state: default_expanded has no effect
        assert!(!accordion.is_open());
        accordion.handle_key(enter()).unwrap();
        assert_eq!(requested.get(), Some(true));
        assert!(!accordion.is_open());

        external.set(true);
        assert!(accordion.is_open());
    }

    #[test]
    fn test_disabled_accordion_reports_nothing() {
        let mut accordion = Accordion::new(Panel::new("a", "A", "body").disabled(true));
        assert!(accordion.handle_key(enter()).unwrap().is_none());
        assert!(!accordion.is_open());
    }

    #[test]
    fn test_large_size_adds_header_padding() {
        let accordion = Accordion::new(Panel::new("a", "A", "body").with_size(Size::Large));
        assert_eq!(accordion.height(30), 5);
    }

    #[test]
    fn test_huge_body_height_saturates() {
        let accordion = Accordion::new(Panel::new("a", "A", "x\n".repeat(70_000)))
            .default_expanded(true);
        assert_eq!(accordion.height(40), u16::MAX);
    }

    #[test]
    fn test_contrast_on_rgb() {
        let theme = Theme::default();
        assert_eq!(contrast_on(&theme, Accent::Rgb([255, 193, 7])), Color::Black);
        assert_eq!(contrast_on(&theme, Accent::Rgb([49, 49, 49])), Color::White);
    }
}
