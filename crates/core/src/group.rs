//! Accordion group: ordered panel bindings sharing one controller.

use std::collections::HashSet;
use std::fmt;

use crate::{
    CoreError, ExpansionController, ExpansionMode, ExpansionSource, Panel, PanelBinding, PanelId,
    ToggleOutcome,
};

/// Observer notified with the open ids (in panel order) after every change.
pub type ExpansionObserver = Box<dyn FnMut(&[PanelId])>;

/// Builder for [`AccordionGroup`].
pub struct AccordionGroupBuilder {
    bindings: Vec<PanelBinding>,
    mode: ExpansionMode,
    default_open: Vec<PanelId>,
    observer: Option<ExpansionObserver>,
    strict: bool,
}

impl AccordionGroupBuilder {
    /// Ids open at construction; single mode keeps only the first.
    pub fn default_open<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PanelId>,
    {
        self.default_open = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Register the expansion change observer.
    pub fn on_expansion_change(mut self, observer: impl FnMut(&[PanelId]) + 'static) -> Self {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Add a panel whose open state is owned by the caller.
    pub fn controlled_panel(
        mut self,
        panel: Panel,
        is_open: impl Fn() -> bool + 'static,
        on_toggle: impl FnMut(bool) + 'static,
    ) -> Self {
        self.bindings
            .push(PanelBinding::controlled(panel, is_open, on_toggle));
        self
    }

    /// Reject unknown default ids instead of dropping them.
    ///
    /// Controlled panels count as unknown: their state is never held by
    /// the group.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    pub fn build(self) -> Result<AccordionGroup, CoreError> {
        ensure_unique(self.bindings.iter().map(PanelBinding::id))?;

        // Controlled panels stay out of the controller
        let ids: Vec<PanelId> = self
            .bindings
            .iter()
            .filter(|b| !b.is_controlled())
            .map(|b| b.id().clone())
            .collect();
        let controller = if self.strict {
            ExpansionController::try_new(self.mode, ids, self.default_open)?
        } else {
            ExpansionController::new(self.mode, ids, self.default_open)
        };

        log::debug!(
            "Accordion group built: {} panels, {:?} mode",
            self.bindings.len(),
            self.mode
        );

        Ok(AccordionGroup {
            bindings: self.bindings,
            controller,
            observer: self.observer,
        })
    }
}

/// Group of accordion panels with a shared expansion policy.
pub struct AccordionGroup {
    bindings: Vec<PanelBinding>,
    controller: ExpansionController,
    observer: Option<ExpansionObserver>,
}

impl AccordionGroup {
    /// Start building a group from uncontrolled panels.
    pub fn builder(panels: Vec<Panel>, mode: ExpansionMode) -> AccordionGroupBuilder {
        AccordionGroupBuilder {
            bindings: panels.into_iter().map(PanelBinding::uncontrolled).collect(),
            mode,
            default_open: Vec::new(),
            observer: None,
            strict: false,
        }
    }

    pub fn mode(&self) -> ExpansionMode {
        self.controller.mode()
    }

    pub fn controller(&self) -> &ExpansionController {
        &self.controller
    }

    pub fn bindings(&self) -> &[PanelBinding] {
        &self.bindings
    }

    /// Panels in declaration order.
    pub fn panels(&self) -> impl Iterator<Item = &Panel> {
        self.bindings.iter().map(PanelBinding::panel)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.bindings.iter().position(|b| b.id() == id)
    }

    /// Open flag of a panel as rendered (controlled panels ask the caller).
    pub fn is_open(&self, id: &str) -> bool {
        self.bindings
            .iter()
            .find(|b| b.id() == id)
            .is_some_and(|b| b.is_open(&self.controller))
    }

    /// Open ids owned by the controller, in panel order.
    pub fn open_ids(&self) -> Vec<PanelId> {
        self.bindings
            .iter()
            .filter(|b| self.controller.is_open(b.id()))
            .map(|b| b.id().clone())
            .collect()
    }

    /// Handle a user toggle gesture on panel `id`.
    ///
    /// Unknown ids yield `Ignored`.
    pub fn toggle(&mut self, id: &str) -> ToggleOutcome {
        let Some(index) = self.position(id) else {
            log::debug!("Toggle requested for unknown panel '{}'", id);
            return ToggleOutcome::Ignored;
        };

        let outcome = self.bindings[index].request_toggle(&mut self.controller);
        if let ToggleOutcome::Applied { changed: true, .. } = outcome {
            self.notify();
        }
        outcome
    }

    /// Explicitly open or close an uncontrolled panel.
    ///
    /// Returns `true` if the open set changed. Controlled panels and
    /// unknown ids are left alone.
    pub fn set_open(&mut self, id: &str, open: bool) -> bool {
        let uncontrolled = self
            .bindings
            .iter()
            .any(|b| b.id() == id && matches!(b.source(), ExpansionSource::Uncontrolled));
        if !uncontrolled {
            return false;
        }

        let changed = self.controller.toggle(id, open);
        if changed {
            self.notify();
        }
        changed
    }

    /// Replace the whole panel sequence.
    ///
    /// Every new panel is bound uncontrolled, including ids that were
    /// controlled before; their open state starts from whatever the
    /// controller holds (closed). Open ids that no longer exist are dropped
    /// silently; the observer is notified if that changed the open set.
    pub fn replace_panels(&mut self, panels: Vec<Panel>) -> Result<(), CoreError> {
        ensure_unique(panels.iter().map(|p| &p.id))?;

        self.bindings = panels.into_iter().map(PanelBinding::uncontrolled).collect();
        let changed = self
            .controller
            .rebind(self.bindings.iter().map(|b| b.id().clone()));
        if changed {
            self.notify();
        }
        Ok(())
    }

    fn notify(&mut self) {
        let open = self.open_ids();
        if let Some(observer) = self.observer.as_mut() {
            observer(open.as_slice());
        }
    }
}

impl fmt::Debug for AccordionGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccordionGroup")
            .field("bindings", &self.bindings)
            .field("controller", &self.controller)
            .field("has_observer", &self.observer.is_some())
            .finish()
    }
}

fn ensure_unique<'a>(ids: impl Iterator<Item = &'a PanelId>) -> Result<(), CoreError> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(CoreError::DuplicatePanelId(id.clone()));
        }
    }
    Ok(())
}
