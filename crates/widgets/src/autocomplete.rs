//! Text field with a filtered option list and optional multi-select tags.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Widget},
};

use petal_theme::Theme;

use crate::{hit, truncate_to_width, Component, TextInput};

const DEFAULT_NO_OPTIONS_TEXT: &str = "No options";
const TAG_REMOVE: &str = "×";

/// Field density.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldSize {
    Small,
    #[default]
    Medium,
}

impl FieldSize {
    fn pad_x(self) -> u16 {
        match self {
            FieldSize::Small => 0,
            FieldSize::Medium => 1,
        }
    }

    /// Option rows visible in the dropdown.
    fn list_rows(self) -> usize {
        match self {
            FieldSize::Small => 4,
            FieldSize::Medium => 6,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutocompleteEvent {
    /// Option picked from the list
    Selected(String),
    /// Tag removed in multiple mode
    Removed(String),
    /// Typed text changed
    InputChanged(String),
}

/// Autocomplete field.
#[derive(Debug, Clone)]
pub struct Autocomplete {
    options: Vec<String>,
    label: Option<String>,
    placeholder: Option<String>,
    helper_text: Option<String>,
    error: bool,
    error_text: Option<String>,
    required: bool,
    size: FieldSize,
    rounded: bool,
    multiple: bool,
    no_options_text: String,

    input: TextInput,
    selected: Vec<String>,
    focused: bool,
    list_open: bool,
    highlight: usize,
    scroll: usize,

    input_area: Option<Rect>,
    option_areas: Vec<(String, Rect)>,
}

impl Autocomplete {
    pub fn new<I, S>(options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            label: None,
            placeholder: None,
            helper_text: None,
            error: false,
            error_text: None,
            required: false,
            size: FieldSize::default(),
            rounded: false,
            multiple: false,
            no_options_text: DEFAULT_NO_OPTIONS_TEXT.to_string(),
            input: TextInput::new(),
            selected: Vec::new(),
            focused: false,
            list_open: false,
            highlight: 0,
            scroll: 0,
            input_area: None,
            option_areas: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    pub fn with_helper_text(mut self, text: impl Into<String>) -> Self {
        self.helper_text = Some(text.into());
        self
    }

    /// Text shown instead of the helper while in error.
    pub fn with_error_text(mut self, text: impl Into<String>) -> Self {
        self.error_text = Some(text.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    pub fn with_size(mut self, size: FieldSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_rounded(mut self, rounded: bool) -> Self {
        self.rounded = rounded;
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.multiple = multiple;
        self
    }

    pub fn with_no_options_text(mut self, text: impl Into<String>) -> Self {
        self.no_options_text = text.into();
        self
    }

    pub fn set_error(&mut self, error: bool) {
        self.error = error;
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
        if !focused {
            self.list_open = false;
        }
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn is_list_open(&self) -> bool {
        self.list_open
    }

    pub fn input_text(&self) -> &str {
        self.input.text()
    }

    /// Chosen values; at most one unless multiple.
    pub fn selected(&self) -> &[String] {
        &self.selected
    }

    /// Options matching the typed text, case-insensitively.
    ///
    /// In multiple mode already chosen values are left out.
    pub fn filtered_options(&self) -> Vec<&str> {
        let query = self.input.text().to_lowercase();
        // A committed single value shows the full list again
        let query = match self.selected.first() {
            Some(value) if !self.multiple && value.to_lowercase() == query => String::new(),
            _ => query,
        };

        self.options
            .iter()
            .filter(|option| !(self.multiple && self.selected.contains(option)))
            .filter(|option| option.to_lowercase().contains(&query))
            .map(String::as_str)
            .collect()
    }

    /// Rows of the field itself: bordered input plus the helper line.
    pub fn height(&self) -> u16 {
        3 + u16::from(self.helper_line().is_some())
    }

    fn helper_line(&self) -> Option<&str> {
        if self.error {
            self.error_text.as_deref().or(self.helper_text.as_deref())
        } else {
            self.helper_text.as_deref()
        }
    }

    fn title(&self) -> Option<String> {
        self.label.as_ref().map(|label| {
            if self.required {
                format!(" {} * ", label)
            } else {
                format!(" {} ", label)
            }
        })
    }

    fn open_list(&mut self) {
        self.list_open = true;
        self.highlight = 0;
        self.scroll = 0;
    }

    fn move_highlight(&mut self, down: bool) {
        if !self.list_open {
            self.open_list();
            return;
        }
        let count = self.filtered_options().len();
        if count == 0 {
            return;
        }
        self.highlight = if down {
            (self.highlight + 1).min(count - 1)
        } else {
            self.highlight.saturating_sub(1)
        };

        let rows = self.size.list_rows();
        if self.highlight < self.scroll {
            self.scroll = self.highlight;
        } else if self.highlight >= self.scroll + rows {
            self.scroll = self.highlight + 1 - rows;
        }
    }

    fn select(&mut self, value: String) -> AutocompleteEvent {
        log::debug!("Autocomplete selected '{}'", value);
        if self.multiple {
            self.selected.push(value.clone());
            self.input.clear();
        } else {
            self.selected = vec![value.clone()];
            self.input.set_text(value.clone());
        }
        self.list_open = false;
        self.highlight = 0;
        self.scroll = 0;
        AutocompleteEvent::Selected(value)
    }

    fn select_highlighted(&mut self) -> Option<AutocompleteEvent> {
        if !self.list_open {
            return None;
        }
        let value = self
            .filtered_options()
            .get(self.highlight)
            .map(|option| option.to_string())?;
        Some(self.select(value))
    }

    fn border_color(&self, theme: &Theme) -> ratatui::style::Color {
        if self.error {
            theme.error.main
        } else if self.focused {
            theme.primary.main
        } else {
            theme.divider
        }
    }

    fn render_field(&self, field: Rect, buf: &mut Buffer, theme: &Theme) {
        let mut block = Block::default()
            .borders(Borders::ALL)
            .border_type(if self.rounded {
                BorderType::Rounded
            } else {
                BorderType::Plain
            })
            .border_style(Style::default().fg(self.border_color(theme)))
            .style(Style::default().bg(theme.bg).fg(theme.fg));
        if let Some(title) = self.title() {
            let color = if self.error {
                theme.error.main
            } else if self.focused {
                theme.primary.main
            } else {
                theme.fg
            };
            block = block.title(Span::styled(title, Style::default().fg(color)));
        }
        let inner = block.inner(field);
        block.render(field, buf);

        let pad = self.size.pad_x();
        let content = Rect {
            x: inner.x + pad.min(inner.width),
            width: inner.width.saturating_sub(2 * pad),
            ..inner
        };
        if content.width == 0 || content.height == 0 {
            return;
        }

        let mut spans = Vec::new();
        if self.multiple {
            let tag_style = Style::default()
                .bg(theme.primary.light)
                .fg(theme.primary.contrast_text);
            for tag in &self.selected {
                spans.push(Span::styled(format!(" {} {} ", tag, TAG_REMOVE), tag_style));
                spans.push(Span::raw(" "));
            }
        }

        let text = self.input.text();
        if text.is_empty() && (self.selected.is_empty() || !self.multiple) {
            if let Some(placeholder) = &self.placeholder {
                spans.push(Span::styled(
                    placeholder.clone(),
                    Style::default().fg(theme.disabled),
                ));
            }
        } else {
            let (before, after) = self.input.split_at_cursor();
            spans.push(Span::raw(before.to_string()));
            if self.focused {
                let mut chars = after.chars();
                let at = chars.next().map(String::from).unwrap_or_else(|| " ".into());
                spans.push(Span::styled(
                    at,
                    Style::default().add_modifier(Modifier::REVERSED),
                ));
                spans.push(Span::raw(chars.as_str().to_string()));
            } else {
                spans.push(Span::raw(after.to_string()));
            }
        }

        buf.set_line(content.x, content.y, &Line::from(spans), content.width);
    }

    fn render_list(&mut self, field: Rect, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.option_areas.clear();
        let top = field.bottom();
        if top >= area.bottom() {
            return;
        }

        let filtered: Vec<String> = self
            .filtered_options()
            .into_iter()
            .map(String::from)
            .collect();
        let rows = filtered.len().clamp(1, self.size.list_rows()) as u16;
        let list = Rect {
            y: top,
            height: (rows + 2).min(area.bottom() - top),
            ..field
        };

        Clear.render(list, buf);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Plain)
            .border_style(Style::default().fg(theme.primary.main))
            .style(Style::default().bg(theme.accented_bg).fg(theme.fg));
        let inner = block.inner(list);
        block.render(list, buf);
        if inner.width == 0 || inner.height == 0 {
            return;
        }

        if filtered.is_empty() {
            buf.set_stringn(
                inner.x,
                inner.y,
                truncate_to_width(&self.no_options_text, inner.width as usize),
                inner.width as usize,
                Style::default().fg(theme.disabled).bg(theme.accented_bg),
            );
            return;
        }

        for (row, (index, option)) in filtered
            .iter()
            .enumerate()
            .skip(self.scroll)
            .take(inner.height as usize)
            .enumerate()
        {
            let y = inner.y + row as u16;
            let style = if index == self.highlight {
                Style::default().bg(theme.selected_bg).fg(theme.selected_fg)
            } else {
                Style::default().bg(theme.accented_bg).fg(theme.fg)
            };
            let line = Rect::new(inner.x, y, inner.width, 1);
            buf.set_style(line, style);
            buf.set_stringn(
                inner.x + 1.min(inner.width),
                y,
                truncate_to_width(option, inner.width.saturating_sub(1) as usize),
                inner.width as usize,
                style,
            );
            self.option_areas.push((option.clone(), line));
        }
    }
}

impl Component for Autocomplete {
    type Event = AutocompleteEvent;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let field = Rect {
            height: 3.min(area.height),
            ..area
        };
        self.render_field(field, buf, theme);
        self.input_area = Some(field);

        if let Some(helper) = self.helper_line() {
            let y = field.bottom();
            if y < area.bottom() {
                let color = if self.error {
                    theme.error.main
                } else {
                    theme.disabled
                };
                let pad = self.size.pad_x() + 1;
                buf.set_stringn(
                    area.x + pad.min(area.width),
                    y,
                    truncate_to_width(helper, area.width.saturating_sub(pad) as usize),
                    area.width.saturating_sub(pad) as usize,
                    Style::default().fg(color).bg(theme.bg),
                );
            }
        }

        if self.focused && self.list_open {
            self.render_list(field, area, buf, theme);
        } else {
            self.option_areas.clear();
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Self::Event>> {
        match key.code {
            KeyCode::Up => {
                self.move_highlight(false);
                Ok(None)
            }
            KeyCode::Down => {
                self.move_highlight(true);
                Ok(None)
            }
            KeyCode::Enter => Ok(self.select_highlighted()),
            KeyCode::Esc => {
                self.list_open = false;
                Ok(None)
            }
            KeyCode::Backspace if self.multiple && self.input.is_empty() => {
                Ok(self.selected.pop().map(AutocompleteEvent::Removed))
            }
            _ => {
                if !self.input.handle_key(key) {
                    return Ok(None);
                }
                // Editing a committed single value uncommits it
                let committed = self.selected.first().map(String::as_str);
                if !self.multiple && committed != Some(self.input.text()) {
                    self.selected.clear();
                }
                self.open_list();
                Ok(Some(AutocompleteEvent::InputChanged(
                    self.input.text().to_string(),
                )))
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<Self::Event>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }

        let picked = self
            .option_areas
            .iter()
            .find(|(_, area)| hit(*area, mouse.column, mouse.row))
            .map(|(option, _)| option.clone());
        if let Some(option) = picked {
            return Ok(Some(self.select(option)));
        }

        let on_field = self
            .input_area
            .is_some_and(|area| hit(area, mouse.column, mouse.row));
        if on_field {
            self.focused = true;
            if self.list_open {
                self.list_open = false;
            } else {
                self.open_list();
            }
        } else {
            self.set_focused(false);
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;
    use crate::accordion::tests::{buffer_text, row_text};

    const FRUITS: [&str; 4] = ["Apple", "Banana", "Cherry", "Pineapple"];

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(field: &mut Autocomplete, text: &str) {
        for c in text.chars() {
            field.handle_key(key(KeyCode::Char(c))).unwrap();
        }
    }

    #[test]
    fn test_filter_is_case_insensitive_substring() {
        let mut field = Autocomplete::new(FRUITS);
        type_text(&mut field, "APP");
        assert_eq!(field.filtered_options(), vec!["Apple", "Pineapple"]);
        assert!(field.is_list_open());
    }

    #[test]
    fn test_typing_reports_input_changes() {
        let mut field = Autocomplete::new(FRUITS);
        assert_eq!(
            field.handle_key(key(KeyCode::Char('b'))).unwrap(),
            Some(AutocompleteEvent::InputChanged("b".to_string()))
        );
    }

    #[test]
    fn test_down_enter_selects_single_value() {
        let mut field = Autocomplete::new(FRUITS);
        type_text(&mut field, "an");
        field.handle_key(key(KeyCode::Down)).unwrap();

        // Only "Banana" matches, highlight stays on it
        assert_eq!(
            field.handle_key(key(KeyCode::Enter)).unwrap(),
            Some(AutocompleteEvent::Selected("Banana".to_string()))
        );
        assert_eq!(field.selected(), ["Banana".to_string()]);
        assert_eq!(field.input_text(), "Banana");
        assert!(!field.is_list_open());

        // Reopening shows the whole list again
        field.handle_key(key(KeyCode::Down)).unwrap();
        assert_eq!(field.filtered_options().len(), FRUITS.len());
    }

    #[test]
    fn test_multiple_tags_and_backspace_removal() {
        let mut field = Autocomplete::new(FRUITS).multiple(true);
        field.handle_key(key(KeyCode::Down)).unwrap();
        field.handle_key(key(KeyCode::Enter)).unwrap();
        field.handle_key(key(KeyCode::Down)).unwrap();
        field.handle_key(key(KeyCode::Enter)).unwrap();

        // Chosen values drop out of the list, so both picks take the top row
        assert_eq!(field.selected(), ["Apple".to_string(), "Banana".to_string()]);
        assert!(!field.filtered_options().contains(&"Apple"));
        assert_eq!(field.input_text(), "");

        assert_eq!(
            field.handle_key(key(KeyCode::Backspace)).unwrap(),
            Some(AutocompleteEvent::Removed("Banana".to_string()))
        );
        assert_eq!(field.selected(), ["Apple".to_string()]);
    }

    #[test]
    fn test_esc_closes_list() {
        let mut field = Autocomplete::new(FRUITS);
        field.handle_key(key(KeyCode::Down)).unwrap();
        assert!(field.is_list_open());
        field.handle_key(key(KeyCode::Esc)).unwrap();
        assert!(!field.is_list_open());
        assert!(field.handle_key(key(KeyCode::Enter)).unwrap().is_none());
    }

    #[test]
    fn test_render_label_placeholder_and_helper() {
        let theme = Theme::default();
        let mut field = Autocomplete::new(FRUITS)
            .with_label("Fruit")
            .required(true)
            .with_placeholder("Pick one")
            .with_helper_text("Seasonal only");
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);

        field.render(area, &mut buf, &theme);

        assert!(row_text(&buf, 0).contains("Fruit *"));
        assert!(row_text(&buf, 1).contains("Pick one"));
        assert!(row_text(&buf, 3).contains("Seasonal only"));
    }

    #[test]
    fn test_error_text_replaces_helper() {
        let theme = Theme::default();
        let mut field = Autocomplete::new(FRUITS)
            .with_helper_text("Seasonal only")
            .with_error_text("Required");
        field.set_error(true);
        let area = Rect::new(0, 0, 30, 4);
        let mut buf = Buffer::empty(area);

        field.render(area, &mut buf, &theme);

        let text = buffer_text(&buf);
        assert!(text.contains("Required"));
        assert!(!text.contains("Seasonal"));
        assert_eq!(buf[(0, 0)].fg, theme.error.main);
    }

    #[test]
    fn test_no_options_text_shown() {
        let theme = Theme::default();
        let mut field = Autocomplete::new(FRUITS).with_no_options_text("Nothing here");
        field.set_focused(true);
        type_text(&mut field, "zzz");

        let area = Rect::new(0, 0, 30, 8);
        let mut buf = Buffer::empty(area);
        field.render(area, &mut buf, &theme);

        assert!(row_text(&buf, 4).contains("Nothing here"));
    }

    #[test]
    fn test_click_option_selects() {
        let theme = Theme::default();
        let mut field = Autocomplete::new(FRUITS);
        let area = Rect::new(0, 0, 30, 10);
        let mut buf = Buffer::empty(area);
        field.render(area, &mut buf, &theme);

        let click = |row| MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 5,
            row,
            modifiers: KeyModifiers::NONE,
        };

        // Clicking the field focuses it and opens the list
        assert!(field.handle_mouse(click(1)).unwrap().is_none());
        assert!(field.is_focused() && field.is_list_open());

        let mut buf = Buffer::empty(area);
        field.render(area, &mut buf, &theme);
        // List border on row 3, options from row 4
        assert_eq!(
            field.handle_mouse(click(5)).unwrap(),
            Some(AutocompleteEvent::Selected("Banana".to_string()))
        );
    }
}
