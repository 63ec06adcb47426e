//! Expansion state and the controller enforcing the expansion mode.
//!
//! `ExpansionState` is an immutable open set with a pure reducer
//! (`toggled`); `ExpansionController` owns one state, the mode and the live
//! panel ids, and is the only place the state is replaced.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::{CoreError, PanelId};

/// How many panels may be open at the same time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpansionMode {
    /// At most one open panel; opening one closes the others
    Single,
    /// Any number of open panels
    #[default]
    Multiple,
}

/// Set of currently open panel ids.
///
/// Equality ignores the order in which panels were opened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpansionState {
    open: HashSet<PanelId>,
}

impl ExpansionState {
    /// Empty state (every panel closed).
    pub fn new() -> Self {
        Self::default()
    }

    /// Initial state for `mode` from caller defaults.
    ///
    /// Single mode keeps only the first default; multiple mode keeps the
    /// deduplicated defaults as given.
    pub fn initial<I, S>(mode: ExpansionMode, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<PanelId>,
    {
        let mut defaults = defaults.into_iter().map(Into::into);
        let open = match mode {
            ExpansionMode::Single => defaults.next().into_iter().collect(),
            ExpansionMode::Multiple => defaults.collect(),
        };
        Self { open }
    }

    /// Membership test.
    pub fn is_open(&self, id: &str) -> bool {
        self.open.contains(id)
    }

    /// Number of open panels.
    pub fn len(&self) -> usize {
        self.open.len()
    }

    pub fn is_empty(&self) -> bool {
        self.open.is_empty()
    }

    /// Iterate open ids in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &PanelId> {
        self.open.iter()
    }

    /// Reduce a toggle request into a new state.
    ///
    /// Opening in single mode replaces whatever was open. Closing a panel
    /// that is not open leaves the state unchanged in both modes.
    pub fn toggled(&self, mode: ExpansionMode, id: &str, desired_open: bool) -> Self {
        if !desired_open {
            if !self.is_open(id) {
                return self.clone();
            }
            let mut open = self.open.clone();
            open.remove(id);
            return Self { open };
        }

        match mode {
            ExpansionMode::Single => Self {
                open: HashSet::from([id.to_string()]),
            },
            ExpansionMode::Multiple => {
                let mut open = self.open.clone();
                open.insert(id.to_string());
                Self { open }
            }
        }
    }

    /// Copy of this state with ids outside `live` removed.
    pub fn retained(&self, live: &HashSet<PanelId>) -> Self {
        Self {
            open: self.open.intersection(live).cloned().collect(),
        }
    }
}

/// Owner of one `ExpansionState`.
///
/// The mode is fixed at construction and has no setter.
#[derive(Debug, Clone)]
pub struct ExpansionController {
    mode: ExpansionMode,
    live: HashSet<PanelId>,
    state: ExpansionState,
}

impl ExpansionController {
    /// Create a controller over the live panel ids.
    ///
    /// Defaults are clamped to the mode first, then ids not present in
    /// `panel_ids` are dropped silently.
    pub fn new<P, D, S, T>(mode: ExpansionMode, panel_ids: P, defaults: D) -> Self
    where
        P: IntoIterator<Item = S>,
        S: Into<PanelId>,
        D: IntoIterator<Item = T>,
        T: Into<PanelId>,
    {
        let live: HashSet<PanelId> = panel_ids.into_iter().map(Into::into).collect();
        let initial = ExpansionState::initial(mode, defaults);
        if initial.iter().any(|id| !live.contains(id)) {
            log::debug!("Dropping unknown default-open panel ids");
        }
        let state = initial.retained(&live);

        Self { mode, live, state }
    }

    /// Strict variant of [`ExpansionController::new`].
    ///
    /// Fails with `InvalidPanelId` if any default id (after clamping) is not
    /// a live panel.
    pub fn try_new<P, D, S, T>(
        mode: ExpansionMode,
        panel_ids: P,
        defaults: D,
    ) -> Result<Self, CoreError>
    where
        P: IntoIterator<Item = S>,
        S: Into<PanelId>,
        D: IntoIterator<Item = T>,
        T: Into<PanelId>,
    {
        let live: HashSet<PanelId> = panel_ids.into_iter().map(Into::into).collect();
        let state = ExpansionState::initial(mode, defaults);

        // Report the smallest unknown id so the error is deterministic
        if let Some(unknown) = state.iter().filter(|id| !live.contains(*id)).min() {
            return Err(CoreError::InvalidPanelId(unknown.clone()));
        }

        Ok(Self { mode, live, state })
    }

    pub fn mode(&self) -> ExpansionMode {
        self.mode
    }

    /// Current open set.
    pub fn state(&self) -> &ExpansionState {
        &self.state
    }

    pub fn is_open(&self, id: &str) -> bool {
        self.state.is_open(id)
    }

    /// Whether `id` belongs to the live panel sequence.
    pub fn is_live(&self, id: &str) -> bool {
        self.live.contains(id)
    }

    /// Apply a toggle request.
    ///
    /// Returns `true` if the open set changed. Ids outside the live
    /// sequence are ignored.
    pub fn toggle(&mut self, id: &str, desired_open: bool) -> bool {
        if !self.live.contains(id) {
            log::debug!("Ignoring toggle for unknown panel '{}'", id);
            return false;
        }

        let next = self.state.toggled(self.mode, id, desired_open);
        if next == self.state {
            return false;
        }

        self.state = next;
        true
    }

    /// Replace the live panel sequence, dropping stale open ids.
    ///
    /// Returns `true` if the open set changed.
    pub fn rebind<P, S>(&mut self, panel_ids: P) -> bool
    where
        P: IntoIterator<Item = S>,
        S: Into<PanelId>,
    {
        self.live = panel_ids.into_iter().map(Into::into).collect();
        let next = self.state.retained(&self.live);
        if next == self.state {
            return false;
        }

        log::debug!(
            "Dropped {} stale open panel id(s) on rebind",
            self.state.len() - next.len()
        );
        self.state = next;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(state: &ExpansionState) -> Vec<String> {
        let mut ids: Vec<String> = state.iter().cloned().collect();
        ids.sort();
        ids
    }

    fn controller(mode: ExpansionMode, defaults: &[&str]) -> ExpansionController {
        ExpansionController::new(mode, ["a", "b", "c"], defaults.iter().copied())
    }

    #[test]
    fn test_initial_single_keeps_first_default() {
        let state = ExpansionState::initial(ExpansionMode::Single, ["x", "y"]);
        assert_eq!(ids(&state), vec!["x"]);
    }

    #[test]
    fn test_initial_single_empty_defaults() {
        let state = ExpansionState::initial(ExpansionMode::Single, Vec::<String>::new());
        assert!(state.is_empty());
    }

    #[test]
    fn test_initial_multiple_deduplicates() {
        let state = ExpansionState::initial(ExpansionMode::Multiple, ["a", "b", "a"]);
        assert_eq!(ids(&state), vec!["a", "b"]);
    }

    #[test]
    fn test_single_open_replaces_other() {
        let state = ExpansionState::initial(ExpansionMode::Single, ["b"]);
        let next = state.toggled(ExpansionMode::Single, "a", true);
        assert_eq!(ids(&next), vec!["a"]);
    }

    #[test]
    fn test_single_close_open_panel() {
        let state = ExpansionState::initial(ExpansionMode::Single, ["a"]);
        assert!(state.toggled(ExpansionMode::Single, "a", false).is_empty());
    }

    #[test]
    fn test_close_not_open_is_noop() {
        let state = ExpansionState::initial(ExpansionMode::Single, ["a"]);
        assert_eq!(state.toggled(ExpansionMode::Single, "b", false), state);

        let state = ExpansionState::initial(ExpansionMode::Multiple, ["a"]);
        assert_eq!(state.toggled(ExpansionMode::Multiple, "c", false), state);
    }

    #[test]
    fn test_reducer_does_not_mutate_input() {
        let state = ExpansionState::initial(ExpansionMode::Multiple, ["a"]);
        let _ = state.toggled(ExpansionMode::Multiple, "b", true);
        assert_eq!(ids(&state), vec!["a"]);
    }

    #[test]
    fn test_multiple_open_is_commutative() {
        let empty = ExpansionState::new();
        let ab = empty
            .toggled(ExpansionMode::Multiple, "a", true)
            .toggled(ExpansionMode::Multiple, "b", true);
        let ba = empty
            .toggled(ExpansionMode::Multiple, "b", true)
            .toggled(ExpansionMode::Multiple, "a", true);
        assert_eq!(ab, ba);
        assert_eq!(ids(&ab), vec!["a", "b"]);
    }

    #[test]
    fn test_multiple_reopen_is_unchanged() {
        let mut ctl = controller(ExpansionMode::Multiple, &["a"]);
        assert!(!ctl.toggle("a", true));
        assert_eq!(ids(ctl.state()), vec!["a"]);
    }

    #[test]
    fn test_scenario_multiple() {
        let mut ctl = controller(ExpansionMode::Multiple, &[]);
        assert!(ctl.toggle("a", true));
        assert_eq!(ids(ctl.state()), vec!["a"]);
        assert!(ctl.toggle("c", true));
        assert_eq!(ids(ctl.state()), vec!["a", "c"]);
        assert!(ctl.toggle("a", false));
        assert_eq!(ids(ctl.state()), vec!["c"]);
    }

    #[test]
    fn test_scenario_single() {
        let mut ctl = controller(ExpansionMode::Single, &["b"]);
        assert!(ctl.is_open("b"));
        assert!(ctl.toggle("a", true));
        assert_eq!(ids(ctl.state()), vec!["a"]);
        assert!(ctl.toggle("a", false));
        assert!(ctl.state().is_empty());
    }

    #[test]
    fn test_single_never_exceeds_one_open() {
        let mut ctl = controller(ExpansionMode::Single, &[]);
        let script = [
            ("a", true),
            ("b", true),
            ("c", true),
            ("b", false),
            ("c", false),
            ("a", true),
            ("a", true),
            ("b", true),
        ];
        for (id, open) in script {
            ctl.toggle(id, open);
            assert!(ctl.state().len() <= 1);
        }
        assert_eq!(ids(ctl.state()), vec!["b"]);
    }

    #[test]
    fn test_toggle_unknown_id_is_noop() {
        let mut ctl = controller(ExpansionMode::Multiple, &["a"]);
        assert!(!ctl.toggle("zzz", true));
        assert_eq!(ids(ctl.state()), vec!["a"]);
    }

    #[test]
    fn test_new_drops_unknown_defaults() {
        let ctl = controller(ExpansionMode::Multiple, &["a", "ghost"]);
        assert_eq!(ids(ctl.state()), vec!["a"]);
    }

    #[test]
    fn test_new_single_clamps_before_filtering() {
        // First default wins even when it is unknown
        let ctl = controller(ExpansionMode::Single, &["ghost", "a"]);
        assert!(ctl.state().is_empty());
    }

    #[test]
    fn test_try_new_rejects_unknown_default() {
        let err = ExpansionController::try_new(ExpansionMode::Multiple, ["a"], ["a", "x"])
            .unwrap_err();
        assert_eq!(err, CoreError::InvalidPanelId("x".to_string()));
    }

    #[test]
    fn test_try_new_accepts_known_defaults() {
        let ctl =
            ExpansionController::try_new(ExpansionMode::Single, ["a", "b"], ["b", "zzz"]).unwrap();
        assert_eq!(ids(ctl.state()), vec!["b"]);
    }

    #[test]
    fn test_rebind_drops_stale_ids() {
        let mut ctl = controller(ExpansionMode::Multiple, &["a", "c"]);
        assert!(ctl.rebind(["c", "d"]));
        assert_eq!(ids(ctl.state()), vec!["c"]);
        assert!(!ctl.is_live("a"));
        assert!(ctl.toggle("d", true));
        assert_eq!(ids(ctl.state()), vec!["c", "d"]);
    }

    #[test]
    fn test_rebind_without_stale_ids_reports_no_change() {
        let mut ctl = controller(ExpansionMode::Multiple, &["a"]);
        assert!(!ctl.rebind(["a", "b"]));
    }

    #[test]
    fn test_mode_is_fixed() {
        let ctl = controller(ExpansionMode::Single, &[]);
        assert_eq!(ctl.mode(), ExpansionMode::Single);
    }
}
