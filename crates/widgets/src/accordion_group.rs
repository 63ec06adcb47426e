//! Vertical stack of accordion panels driven by an `AccordionGroup`.

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{buffer::Buffer, layout::Rect};

use petal_core::{AccordionGroup, PanelId, ToggleOutcome};
use petal_theme::Theme;

use crate::accordion::{render_panel, PanelLook, ICON_CLOSED, ICON_OPEN};
use crate::{hit, Component, StyleDefaults};

/// Blank rows between panels.
const GAP: u16 = 1;

/// What a gesture on the group did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupEvent {
    /// Uncontrolled panel changed state
    Toggled { id: PanelId, open: bool },
    /// Controlled panel: the caller was asked to change state
    Forwarded { id: PanelId, requested_open: bool },
}

/// Renders an [`AccordionGroup`] and routes keys and clicks to it.
#[derive(Debug)]
pub struct AccordionGroupView {
    group: AccordionGroup,
    defaults: StyleDefaults,
    focus: usize,
    focused: bool,
    header_areas: Vec<(usize, Rect)>,
}

impl AccordionGroupView {
    pub fn new(group: AccordionGroup) -> Self {
        Self {
            group,
            defaults: StyleDefaults::default(),
            focus: 0,
            focused: true,
            header_areas: Vec::new(),
        }
    }

    pub fn with_defaults(mut self, defaults: StyleDefaults) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn group(&self) -> &AccordionGroup {
        &self.group
    }

    pub fn group_mut(&mut self) -> &mut AccordionGroup {
        &mut self.group
    }

    /// Index of the panel whose header has keyboard focus.
    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn set_focused(&mut self, focused: bool) {
        self.focused = focused;
    }

    /// Rows needed to show every panel at `width`.
    pub fn height(&self, width: u16) -> u16 {
        (0..self.group.len())
            .map(|index| self.look(index).height(width))
            .enumerate()
            .fold(0u16, |total, (index, height)| {
                let gap = if index == 0 { 0 } else { GAP };
                total.saturating_add(gap).saturating_add(height)
            })
    }

    fn look(&self, index: usize) -> PanelLook<'_> {
        let binding = &self.group.bindings()[index];
        PanelLook {
            panel: binding.panel(),
            open: binding.is_open(self.group.controller()),
            focused: self.focused && index == self.focus,
            defaults: self.defaults,
            icons: (ICON_OPEN, ICON_CLOSED),
        }
    }

    fn clamp_focus(&mut self) {
        self.focus = self.focus.min(self.group.len().saturating_sub(1));
    }

    fn toggle_at(&mut self, index: usize) -> Option<GroupEvent> {
        let id = self.group.bindings().get(index)?.id().clone();
        self.focus = index;

        match self.group.toggle(&id) {
            ToggleOutcome::Applied { open, changed: true } => {
                Some(GroupEvent::Toggled { id, open })
            }
            ToggleOutcome::Forwarded { requested_open } => {
                Some(GroupEvent::Forwarded { id, requested_open })
            }
            ToggleOutcome::Applied { changed: false, .. } | ToggleOutcome::Ignored => None,
        }
    }
}

impl Component for AccordionGroupView {
    type Event = GroupEvent;

    fn render(&mut self, area: Rect, buf: &mut Buffer, theme: &Theme) {
        self.clamp_focus();
        self.header_areas.clear();

        let mut y = area.y;
        for index in 0..self.group.len() {
            if y >= area.bottom() {
                break;
            }
            let look = self.look(index);
            let height = look.height(area.width).min(area.bottom() - y);
            let panel_area = Rect {
                y,
                height,
                ..area
            };
            let header = render_panel(panel_area, buf, theme, &look);
            self.header_areas.push((index, header));

            y = y.saturating_add(height).saturating_add(GAP);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Result<Option<Self::Event>> {
        if self.group.is_empty() {
            return Ok(None);
        }

        match key.code {
            KeyCode::Up => {
                self.focus = self.focus.saturating_sub(1);
                Ok(None)
            }
            KeyCode::Down => {
                self.focus = (self.focus + 1).min(self.group.len() - 1);
                Ok(None)
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                self.clamp_focus();
                Ok(self.toggle_at(self.focus))
            }
            _ => Ok(None),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<Option<Self::Event>> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return Ok(None);
        }

        let clicked = self
            .header_areas
            .iter()
            .find(|(_, header)| hit(*header, mouse.column, mouse.row))
            .map(|(index, _)| *index);

        match clicked {
            Some(index) => Ok(self.toggle_at(index)),
            None => Ok(None),
        }
    }
}
