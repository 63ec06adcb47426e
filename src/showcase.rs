//! Interactive showcase: one story per component.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph, Tabs},
    Frame,
};

use petal_config::Config;
use petal_core::{AccordionGroup, Panel, PanelId, Size, ThemeColor, ToggleOutcome};
use petal_logger::LogLevel;
use petal_theme::Theme;
use petal_widgets::{
    Accordion, AccordionGroupView, Alert, AlertEvent, AlertVariant, Autocomplete,
    AutocompleteEvent, Avatar, AvatarShape, AvatarSize, Component, FieldSize, GroupEvent,
    Severity, Status, StyleDefaults,
};

const STORIES: [&str; 5] = ["Accordion", "Accordion group", "Alert", "Avatar", "Autocomplete"];
const GAP: u16 = 1;

pub struct Showcase {
    theme: &'static Theme,
    theme_index: usize,
    log_level: LogLevel,
    story: usize,
    status: String,
    pub should_quit: bool,

    accordions: Vec<Accordion>,
    accordion_focus: usize,
    controlled_open: Rc<Cell<bool>>,

    group: AccordionGroupView,
    group_open: Rc<RefCell<Vec<PanelId>>>,

    alerts: Vec<Alert>,
    alert_focus: usize,

    avatars: Vec<Avatar>,

    fields: Vec<Autocomplete>,
}

impl Showcase {
    pub fn new(config: &Config) -> Result<Self> {
        let defaults = StyleDefaults {
            size: config.components.size,
            rounded: config.components.rounded,
        };
        let theme = Theme::get_by_name(&config.general.theme);
        let theme_index = Theme::all_theme_names()
            .iter()
            .position(|name| *name == theme.name)
            .unwrap_or(0);

        // Controlled accordion: the showcase adopts every request
        let controlled_open = Rc::new(Cell::new(false));
        let read = Rc::clone(&controlled_open);
        let write = Rc::clone(&controlled_open);

        let mut accordions = vec![
            Accordion::new(Panel::new(
                "shipping",
                "Shipping",
                "Orders ship within three business days. Tracking numbers are emailed once the parcel leaves the warehouse.",
            ))
            .default_expanded(true),
            Accordion::new(
                Panel::new("returns", "Returns", "Unused items can be returned within 30 days.")
                    .with_size(Size::Large)
                    .with_rounded(true)
                    .with_header_color(ThemeColor::Secondary),
            ),
            Accordion::new(
                Panel::new("archive", "Archived (disabled)", "Not reachable.").disabled(true),
            ),
            Accordion::controlled(
                Panel::new("controlled", "Controlled by the showcase", "State lives outside the accordion.")
                    .with_header_color(ThemeColor::Tertiary),
                move || read.get(),
                move |open| write.set(open),
            ),
        ]
        .into_iter()
        .map(|accordion| accordion.with_defaults(defaults))
        .collect::<Vec<_>>();
        if let Some(first) = accordions.first_mut() {
            first.set_focused(true);
        }

        let group_open = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&group_open);
        let group = AccordionGroup::builder(
            vec![
                Panel::new("general", "General settings", "Theme, language and startup behaviour."),
                Panel::new("users", "Users", "Invite people and manage their roles.")
                    .with_header_color(ThemeColor::Info),
                Panel::new("advanced", "Advanced", "Experimental switches. Handle with care.")
                    .with_header_color(ThemeColor::Warning),
                Panel::new("danger", "Danger zone", "Delete the workspace permanently.")
                    .with_header_color(ThemeColor::Error),
            ],
            config.components.expansion_mode,
        )
        .default_open(["general"])
        .on_expansion_change(move |ids| *sink.borrow_mut() = ids.to_vec())
        .build()?;
        *group_open.borrow_mut() = group.open_ids();
        let group = AccordionGroupView::new(group).with_defaults(defaults);

        let alerts = vec![
            Alert::new("Your changes were saved.")
                .with_severity(Severity::Success)
                .closable(true),
            Alert::new("A new version is available.")
                .with_title("Update")
                .with_severity(Severity::Info)
                .with_variant(AlertVariant::Outlined)
                .closable(true),
            Alert::new("Storage is 90% full.")
                .with_severity(Severity::Warning)
                .with_variant(AlertVariant::Filled)
                .closable(true),
            Alert::new("Connection lost. Retrying in 5 seconds.")
                .with_title("Network error")
                .with_severity(Severity::Error)
                .with_size(Size::Large)
                .closable(true),
        ]
        .into_iter()
        .map(|alert| alert.with_defaults(defaults))
        .collect();

        let avatars = vec![
            Avatar::new("alice")
                .with_status(Status::Online)
                .with_tooltip("Alice (online)"),
            Avatar::new("bob")
                .with_shape(AvatarShape::Rounded)
                .with_color(ThemeColor::Secondary)
                .with_status(Status::Away)
                .with_tooltip("Bob (away)"),
            Avatar::new("carol")
                .with_shape(AvatarShape::Square)
                .with_size(AvatarSize::Preset(Size::Large))
                .with_color(ThemeColor::Success)
                .bordered(true)
                .with_status(Status::Busy)
                .with_tooltip("Carol (busy)"),
            Avatar::new("")
                .with_fallback("?")
                .with_size(AvatarSize::Preset(Size::Small))
                .with_color(ThemeColor::Info)
                .with_status(Status::Offline),
        ];

        let fruits = ["Apple", "Apricot", "Banana", "Cherry", "Grape", "Mango", "Pineapple"];
        let mut fields = vec![
            Autocomplete::new(fruits)
                .with_label("Favourite fruit")
                .required(true)
                .with_placeholder("Start typing...")
                .with_helper_text("Pick one from the list"),
            Autocomplete::new(fruits)
                .with_label("Basket")
                .multiple(true)
                .with_size(FieldSize::Small)
                .with_placeholder("Add fruit")
                .with_error_text("Pick at least one fruit"),
        ]
        .into_iter()
        .map(|field| {
            field
                .with_rounded(config.components.rounded)
                .with_no_options_text(config.components.no_options_text.clone())
        })
        .collect::<Vec<_>>();
        if let Some(first) = fields.first_mut() {
            first.set_focused(true);
        }

        Ok(Self {
            theme,
            theme_index,
            log_level: config.logging.min_level.parse().unwrap_or(LogLevel::Info),
            story: 0,
            status: "Tab: next story  t: theme  l: log level  q: quit".to_string(),
            should_quit: false,
            accordions,
            accordion_focus: 0,
            controlled_open,
            group,
            group_open,
            alerts,
            alert_focus: 0,
            avatars,
            fields,
        })
    }

    fn typing(&self) -> bool {
        STORIES[self.story] == "Autocomplete"
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') if ctrl => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Char('q') if !self.typing() => {
                self.should_quit = true;
                return Ok(());
            }
            KeyCode::Tab => {
                self.story = (self.story + 1) % STORIES.len();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.story = (self.story + STORIES.len() - 1) % STORIES.len();
                return Ok(());
            }
            KeyCode::Char('t') if !self.typing() => {
                self.next_theme();
                return Ok(());
            }
            KeyCode::Char('l') if !self.typing() => {
                self.next_log_level();
                return Ok(());
            }
            _ => {}
        }

        match self.story {
            0 => self.accordion_key(key),
            1 => {
                if let Some(event) = self.group.handle_key(key)? {
                    self.report_group(event);
                }
                Ok(())
            }
            2 => self.alert_key(key),
            4 => self.field_key(key),
            _ => Ok(()),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        match self.story {
            0 => {
                for index in 0..self.accordions.len() {
                    if let Some(outcome) = self.accordions[index].handle_mouse(mouse)? {
                        self.focus_accordion(index);
                        self.report_toggle(index, outcome);
                    }
                }
            }
            1 => {
                if let Some(event) = self.group.handle_mouse(mouse)? {
                    self.report_group(event);
                }
            }
            2 => {
                for index in 0..self.alerts.len() {
                    if let Some(AlertEvent::Closed) = self.alerts[index].handle_mouse(mouse)? {
                        self.close_alert(index);
                    }
                }
            }
            3 => {
                for avatar in &mut self.avatars {
                    if avatar.handle_mouse(mouse)?.is_some() {
                        self.status = format!("Clicked avatar {}", avatar.label());
                    }
                }
            }
            4 => {
                for index in 0..self.fields.len() {
                    if let Some(event) = self.fields[index].handle_mouse(mouse)? {
                        self.report_field(index, event);
                    }
                }
            }
            _ => {}
        }
        Ok(())
    }

    fn next_theme(&mut self) {
        let names = Theme::all_theme_names();
        self.theme_index = (self.theme_index + 1) % names.len();
        self.theme = Theme::get_by_name(names[self.theme_index]);
        self.status = format!("Theme: {}", self.theme.name);
        log::info!("Switched theme to {}", self.theme.name);
    }

    fn next_log_level(&mut self) {
        self.log_level = self.log_level.next();
        petal_logger::set_min_level(self.log_level);
        self.status = format!("Log level: {}", self.log_level.to_str());
        // Visible only when the new level admits it
        log::info!("Log level set to {}", self.log_level.to_str());
    }

    fn focus_accordion(&mut self, index: usize) {
        self.accordion_focus = index;
        for (i, accordion) in self.accordions.iter_mut().enumerate() {
            accordion.set_focused(i == index);
        }
    }

    fn accordion_key(&mut self, key: KeyEvent) -> Result<()> {
        let last = self.accordions.len().saturating_sub(1);
        match key.code {
            KeyCode::Up => self.focus_accordion(self.accordion_focus.saturating_sub(1)),
            KeyCode::Down => self.focus_accordion((self.accordion_focus + 1).min(last)),
            _ => {
                let index = self.accordion_focus;
                if let Some(outcome) = self.accordions[index].handle_key(key)? {
                    self.report_toggle(index, outcome);
                }
            }
        }
        Ok(())
    }

    fn report_toggle(&mut self, index: usize, outcome: ToggleOutcome) {
        let title = &self.accordions[index].panel().title;
        self.status = match outcome {
            ToggleOutcome::Applied { open, .. } => {
                format!("{}: {}", title, if open { "expanded" } else { "collapsed" })
            }
            ToggleOutcome::Forwarded { requested_open } => format!(
                "{}: caller asked to {} (now {})",
                title,
                if requested_open { "expand" } else { "collapse" },
                if self.controlled_open.get() { "open" } else { "closed" }
            ),
            ToggleOutcome::Ignored => return,
        };
    }

    fn report_group(&mut self, event: GroupEvent) {
        let open = self.group_open.borrow().join(", ");
        self.status = match event {
            GroupEvent::Toggled { id, open: is_open } => {
                format!("{} {} | open: [{}]", id, if is_open { "opened" } else { "closed" }, open)
            }
            GroupEvent::Forwarded { id, requested_open } => {
                format!("{} forwarded (open={}) | open: [{}]", id, requested_open, open)
            }
        };
    }

    fn alert_key(&mut self, key: KeyEvent) -> Result<()> {
        let last = self.alerts.len().saturating_sub(1);
        match key.code {
            KeyCode::Up => self.alert_focus = self.alert_focus.saturating_sub(1),
            KeyCode::Down => self.alert_focus = (self.alert_focus + 1).min(last),
            KeyCode::Char('r') => {
                for alert in &mut self.alerts {
                    alert.set_open(true);
                }
                self.status = "Alerts restored".to_string();
            }
            _ => {
                let index = self.alert_focus;
                if let Some(AlertEvent::Closed) = self.alerts[index].handle_key(key)? {
                    self.close_alert(index);
                }
            }
        }
        Ok(())
    }

    fn close_alert(&mut self, index: usize) {
        self.alerts[index].set_open(false);
        self.status = format!("{:?} alert closed (r restores)", self.alerts[index].severity());
    }

    fn field_key(&mut self, key: KeyEvent) -> Result<()> {
        let Some(index) = self.fields.iter().position(Autocomplete::is_focused) else {
            return Ok(());
        };
        if let Some(event) = self.fields[index].handle_key(key)? {
            self.report_field(index, event);
        }
        Ok(())
    }

    fn report_field(&mut self, index: usize, event: AutocompleteEvent) {
        let field = &mut self.fields[index];
        self.status = match event {
            AutocompleteEvent::Selected(value) => format!("Selected {}", value),
            AutocompleteEvent::Removed(value) => format!("Removed {}", value),
            AutocompleteEvent::InputChanged(text) => format!("Typing \"{}\"", text),
        };
        // The basket complains while empty
        if index == 1 {
            field.set_error(field.selected().is_empty());
        }
    }

    pub fn render(&mut self, frame: &mut Frame<'_>) {
        let theme = self.theme;
        let area = frame.area();
        frame.render_widget(
            Block::default().style(Style::default().bg(theme.bg).fg(theme.fg)),
            area,
        );

        let [tabs_area, body, status_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let tabs = Tabs::new(STORIES)
            .select(self.story)
            .style(Style::default().bg(theme.accented_bg).fg(theme.fg))
            .highlight_style(
                Style::default()
                    .bg(theme.selected_bg)
                    .fg(theme.selected_fg)
                    .add_modifier(Modifier::BOLD),
            );
        frame.render_widget(tabs, tabs_area);

        let body = Rect {
            x: body.x + 1,
            y: body.y + 1,
            width: body.width.saturating_sub(2).min(72),
            height: body.height.saturating_sub(1),
        };
        let buf = frame.buffer_mut();
        match self.story {
            0 => {
                let mut y = body.y;
                for accordion in &mut self.accordions {
                    let height = accordion.height(body.width);
                    if y >= body.bottom() {
                        break;
                    }
                    let rect = Rect {
                        y,
                        height: height.min(body.bottom() - y),
                        ..body
                    };
                    accordion.render(rect, buf, theme);
                    y = y.saturating_add(height + GAP);
                }
            }
            1 => self.group.render(body, buf, theme),
            2 => {
                let mut y = body.y;
                for alert in &mut self.alerts {
                    let height = alert.height(body.width);
                    if height == 0 {
                        continue;
                    }
                    if y >= body.bottom() {
                        break;
                    }
                    let rect = Rect {
                        y,
                        height: height.min(body.bottom() - y),
                        ..body
                    };
                    alert.render(rect, buf, theme);
                    y = y.saturating_add(height + GAP);
                }
            }
            3 => {
                let mut x = body.x;
                for avatar in &mut self.avatars {
                    let (columns, _) = avatar.footprint();
                    if x >= body.right() {
                        break;
                    }
                    let rect = Rect {
                        x,
                        width: body.right() - x,
                        height: avatar.height().min(body.height),
                        ..body
                    };
                    avatar.render(rect, buf, theme);
                    x = x.saturating_add(columns + 3);
                }
            }
            _ => {
                // Render bottom-up so an open list overlays the field below
                let rows: Vec<Rect> = {
                    let mut y = body.y;
                    self.fields
                        .iter()
                        .map(|field| {
                            let rect = Rect { y, ..body };
                            y = y.saturating_add(field.height() + GAP);
                            rect
                        })
                        .collect()
                };
                for (field, rect) in self.fields.iter_mut().zip(rows).rev() {
                    if rect.y >= body.bottom() {
                        continue;
                    }
                    let rect = Rect {
                        height: body.bottom() - rect.y,
                        ..rect
                    };
                    field.render(rect, buf, theme);
                }
            }
        }

        let last_log = petal_logger::get_entries()
            .last()
            .map(|entry| format!("  [{}] {}", entry.level.to_str(), entry.message))
            .unwrap_or_default();
        let status = Paragraph::new(Line::from(vec![
            Span::styled(format!(" {} ", self.status), Style::default().fg(theme.accented_fg)),
            Span::styled(last_log, Style::default().fg(theme.disabled)),
        ]))
        .style(Style::default().bg(theme.accented_bg));
        frame.render_widget(status, status_area);
    }
}
