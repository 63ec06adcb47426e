//! Per-panel binding between a `Panel`, its controller and the renderer.

use std::fmt;

use crate::{ExpansionController, Panel, PanelId};

/// Where a panel's open state lives.
///
/// Resolved once when the binding is created; a binding never switches
/// between controlled and uncontrolled behavior afterwards.
pub enum ExpansionSource {
    /// Open state owned by the group's `ExpansionController`
    Uncontrolled,
    /// Open state owned by the caller
    Controlled {
        /// Reads the caller's current open flag
        is_open: Box<dyn Fn() -> bool>,
        /// Receives the requested open flag for every toggle gesture
        on_toggle: Box<dyn FnMut(bool)>,
    },
}

impl ExpansionSource {
    /// Build a controlled source from a getter and a toggle handler.
    pub fn controlled(
        is_open: impl Fn() -> bool + 'static,
        on_toggle: impl FnMut(bool) + 'static,
    ) -> Self {
        ExpansionSource::Controlled {
            is_open: Box::new(is_open),
            on_toggle: Box::new(on_toggle),
        }
    }

    pub fn is_controlled(&self) -> bool {
        matches!(self, ExpansionSource::Controlled { .. })
    }
}

impl fmt::Debug for ExpansionSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpansionSource::Uncontrolled => f.write_str("Uncontrolled"),
            ExpansionSource::Controlled { is_open, .. } => f
                .debug_struct("Controlled")
                .field("is_open", &is_open())
                .finish_non_exhaustive(),
        }
    }
}

/// Result of a toggle gesture on one panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Controller applied the request
    Applied {
        /// Open flag of this panel after the update
        open: bool,
        /// Whether the group's open set changed
        changed: bool,
    },
    /// Request handed to the caller's own handler
    Forwarded { requested_open: bool },
    /// Gesture dropped (disabled panel)
    Ignored,
}

/// One declared panel bound to its expansion source.
#[derive(Debug)]
pub struct PanelBinding {
    panel: Panel,
    source: ExpansionSource,
}

impl PanelBinding {
    /// Bind a panel whose state lives in the group controller.
    pub fn uncontrolled(panel: Panel) -> Self {
        Self {
            panel,
            source: ExpansionSource::Uncontrolled,
        }
    }

    /// Bind a panel whose state is owned by the caller.
    pub fn controlled(
        panel: Panel,
        is_open: impl Fn() -> bool + 'static,
        on_toggle: impl FnMut(bool) + 'static,
    ) -> Self {
        Self {
            panel,
            source: ExpansionSource::controlled(is_open, on_toggle),
        }
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn id(&self) -> &PanelId {
        &self.panel.id
    }

    pub fn source(&self) -> &ExpansionSource {
        &self.source
    }

    pub fn is_controlled(&self) -> bool {
        self.source.is_controlled()
    }

    /// Open flag to render.
    pub fn is_open(&self, controller: &ExpansionController) -> bool {
        match &self.source {
            ExpansionSource::Uncontrolled => controller.is_open(&self.panel.id),
            ExpansionSource::Controlled { is_open, .. } => is_open(),
        }
    }

    /// Handle a user toggle gesture on this panel.
    ///
    /// Controlled bindings never touch the controller.
    pub fn request_toggle(&mut self, controller: &mut ExpansionController) -> ToggleOutcome {
        if self.panel.style.disabled {
            return ToggleOutcome::Ignored;
        }

        match &mut self.source {
            ExpansionSource::Uncontrolled => {
                let desired_open = !controller.is_open(&self.panel.id);
                let changed = controller.toggle(&self.panel.id, desired_open);
                ToggleOutcome::Applied {
                    open: controller.is_open(&self.panel.id),
                    changed,
                }
            }
            ExpansionSource::Controlled { is_open, on_toggle } => {
                let requested_open = !is_open();
                on_toggle(requested_open);
                ToggleOutcome::Forwarded { requested_open }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;
    use crate::ExpansionMode;

    fn controller(defaults: &[&str]) -> ExpansionController {
        ExpansionController::new(ExpansionMode::Multiple, ["a", "b"], defaults.iter().copied())
    }

    #[test]
    fn test_uncontrolled_toggle_opens_then_closes() {
        let mut ctl = controller(&[]);
        let mut binding = PanelBinding::uncontrolled(Panel::new("a", "A", "body"));

        assert_eq!(
            binding.request_toggle(&mut ctl),
            ToggleOutcome::Applied {
                open: true,
                changed: true
            }
        );
        assert!(binding.is_open(&ctl));

        assert_eq!(
            binding.request_toggle(&mut ctl),
            ToggleOutcome::Applied {
                open: false,
                changed: true
            }
        );
        assert!(!binding.is_open(&ctl));
    }

    #[test]
    fn test_controlled_forwards_without_touching_controller() {
        let mut ctl = controller(&[]);
        let external = Rc::new(Cell::new(false));
        let requests = Rc::new(Cell::new(0));

        let read = Rc::clone(&external);
        let write = Rc::clone(&external);
        let count = Rc::clone(&requests);
        let mut binding = PanelBinding::controlled(
            Panel::new("a", "A", "body"),
            move || read.get(),
            move |open| {
                count.set(count.get() + 1);
                write.set(open);
            },
        );

        assert_eq!(
            binding.request_toggle(&mut ctl),
            ToggleOutcome::Forwarded {
                requested_open: true
            }
        );
        assert!(external.get());
        assert!(binding.is_open(&ctl));
        assert!(ctl.state().is_empty());
        assert_eq!(requests.get(), 1);
    }

    #[test]
    fn test_controlled_caller_may_refuse() {
        let mut ctl = controller(&[]);
        let mut binding = PanelBinding::controlled(Panel::new("a", "A", ""), || false, |_| {});

        binding.request_toggle(&mut ctl);
        binding.request_toggle(&mut ctl);
        assert!(!binding.is_open(&ctl));
        assert!(binding.is_controlled());
    }

    #[test]
    fn test_disabled_panel_ignores_gesture() {
        let mut ctl = controller(&[]);
        let mut binding = PanelBinding::uncontrolled(Panel::new("a", "A", "").disabled(true));

        assert_eq!(binding.request_toggle(&mut ctl), ToggleOutcome::Ignored);
        assert!(ctl.state().is_empty());
    }
}
