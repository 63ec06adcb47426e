//! Core model for petal components.
//!
//! This crate is rendering-agnostic: it owns the accordion expansion state
//! machine, panel bindings and the vocabulary (sizes, palette roles,
//! accents) shared by every widget crate.

mod binding;
mod error;
mod expansion;
mod group;
mod panel;
mod types;

pub use binding::{ExpansionSource, PanelBinding, ToggleOutcome};
pub use error::CoreError;
pub use expansion::{ExpansionController, ExpansionMode, ExpansionState};
pub use group::{AccordionGroup, AccordionGroupBuilder, ExpansionObserver};
pub use panel::{Panel, PanelId, PanelStyle};
pub use types::{Accent, Size, ThemeColor};
