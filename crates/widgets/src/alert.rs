//! Alert banner with severity colors, optional title and close button.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, BorderType, Borders, Widget},
};
use unicode_width::UnicodeWidthStr;

use petal_core::{Size, ThemeColor};
use petal_theme::{PaletteColor, Theme};

use crate::{hit, wrap_text, Component, SizeMetrics, StyleDefaults};

const CLOSE_BUTTON: &str = "[x]";

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    Success,
    #[default]
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn color(self) -> ThemeColor {
        match self {
            Severity::Success => ThemeColor::Success,
            Severity::Info => ThemeColor::Info,
            Severity::Warning => ThemeColor::Warning,
            Severity::Error => ThemeColor::Error,
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Severity::Success => "✔",
            Severity::Info => "ℹ",
            Severity::Warning => "⚠",
            Severity::Error => "✖",
        }
    }
}

/// Visual variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AlertVariant {
    /// Light background, dark text
    #[default]
    Standard,
    /// Solid background in the severity color
    Filled,
    /// Severity-colored border and text only
    Outlined,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlertEvent {
    /// Close button or Esc; the owner decides whether to hide the alert
    Closed,
}

/// Alert banner.
#[derive(Debug, Clone)]
pub struct Alert {
    title: Option<String>,
    content: String,
    severity: Severity,
    variant: AlertVariant,
    size: Option<Size>,
    rounded: Option<bool>,
    defaults: StyleDefaults,
    closable: bool,
    open: bool,
    icon: Option<String>,
    close_area: Option<Rect>,
}

impl Alert {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            title: None,
            content: content.into(),
            severity: Severity::default(),
            variant: AlertVariant::default(),
            size: None,
            rounded: None,
            defaults: StyleDefaults::default(),
            closable: false,
            open: true,
            icon: None,
            close_area: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn with_variant(mut self, variant: AlertVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_size(mut self, size: Size) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_rounded(mut self, rounded: bool) -> Self {
        self.rounded = Some(rounded);
        self
    }

    pub fn with_defaults(mut self, defaults: StyleDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn closable(mut self, closable: bool) -> Self {
        self.closable = closable;
        self
    }

    /// Replace the severity icon.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
        if !open {
            self.close_area = None;
        }
    }

    fn metrics(&self) -> SizeMetrics {
        SizeMetrics::for_size(self.size.unwrap_or(self.defaults.size))
    }

    fn icon_str(&self) -> &str {
        self.icon.as_deref().unwrap_or(self.severity.icon())
    }

    /// Columns available for title and content inside a box `width` wide.
    fn text_width(&self, width: u16) -> u16 {
        let m = self.metrics();
        let icon = self.icon_str().width() as u16 + 1;
        let close = if self.closable {
            CLOSE_BUTTON.width() as u16 + 1
        } else {
            0
        };
        width.saturating_sub(2 + 2 * m.pad_x + icon + close)
    }

    fn text_rows(&self, width: u16) -> Vec<(String, bool)> {
        let text_width = self.text_width(width);
        let mut rows = Vec::new();
        if let Some(title) = &self.title {
            rows.extend(wrap_text(title, text_width).into_iter().map(|r| (r, true)));
        }
        rows.extend(
            wrap_text(&self.content, text_width)
                .into_iter()
                .map(|r| (r, false)),
        );
        rows
    }

    /// Rows needed at `width`; zero while closed.
    pub fn height(&self, width: u16) -> u16 {
        if !self.open {
            return 0;
        }
        let rows = u16::try_from(self.text_rows(width).len()).unwrap_or(u16::MAX);
        (2 + 2 * self.metrics().pad_y).saturating_add(rows)
    }

    fn styles(&self, theme: &Theme) -> (Style, Style) {
        let PaletteColor {
            main,
            light,
            dark,
            contrast_text,
        } = theme.palette(self.severity.color());

        match self.variant {
            AlertVariant::Standard => {
                let body = Style::default().bg(light).fg(dark);
                (body, Style::default().fg(light).bg(light))
            }
            AlertVariant::Filled => {
                let body = Style::default().bg(main).fg(contrast_text);
                (body, Style::default().fg(main).bg(main))
            }
            AlertVariant::Outlined => {
                let body = Style::default().bg(theme.bg).fg(main);
                (body, Style::default().fg(main).bg(theme.bg))
            }
        }
    }
}

impl Component for Alert {
    type Event = AlertEvent;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.close_area = None;
        if !self.open || area.width == 0 || area.height == 0 {
            return;
        }

        let m = self.metrics();
        let (body, border) = self.styles(theme);
        let rows = self.text_rows(area.width);

        let height = self.height(area.width).min(area.height);
        let area = Rect { height, ..area };
        let rounded = self.rounded.unwrap_or(self.defaults.rounded);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(if rounded {
                BorderType::Rounded
            } else {
                BorderType::Plain
            })
            .border_style(border)
            .style(body);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.width <= 2 * m.pad_x || inner.height <= m.pad_y {
            return;
        }

        let top = inner.y + m.pad_y;
        let left = inner.x + m.pad_x;
        let right = inner.right() - m.pad_x;

        let icon = self.icon_str();
        let icon_width = icon.width() as u16;
        buf.set_stringn(left, top, icon, (right - left) as usize, body);

        let text_x = left + icon_width + 1;
        let text_width = self.text_width(area.width);
        let bottom = inner.bottom().saturating_sub(m.pad_y);
        for (i, (row, is_title)) in rows.iter().enumerate() {
            let y = top + i as u16;
            if y >= bottom || text_width == 0 {
                break;
            }
            let style = if *is_title {
                body.add_modifier(Modifier::BOLD)
            } else {
                body
            };
            buf.set_stringn(text_x, y, row, text_width as usize, style);
        }

        if self.closable {
            let close_width = CLOSE_BUTTON.width() as u16;
            if right >= left + close_width {
                let close = Rect::new(right - close_width, top, close_width, 1);
                buf.set_stringn(close.x, close.y, CLOSE_BUTTON, close_width as usize, body);
                self.close_area = Some(close);
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Self::Event>> {
        if self.open && self.closable && key.code == KeyCode::Esc {
            log::debug!("Alert closed from keyboard");
            return Ok(Some(AlertEvent::Closed));
        }
        Ok(None)
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<Self::Event>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }
        match self.close_area {
            Some(close) if hit(close, mouse.column, mouse.row) => Ok(Some(AlertEvent::Closed)),
            _ => Ok(None),
        }
    }
}
