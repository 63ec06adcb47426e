//! Error types for the component model.

use thiserror::Error;

/// Errors raised by strict construction paths.
///
/// Toggle requests never fail; unknown ids there are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Id is not part of the live panel sequence.
    #[error("unknown panel id: {0}")]
    InvalidPanelId(String),

    /// Two panels in one group share an id.
    #[error("duplicate panel id: {0}")]
    DuplicatePanelId(String),

    /// Color string is not `#rgb` or `#rrggbb`.
    #[error("invalid color: {0}")]
    InvalidColor(String),
}
