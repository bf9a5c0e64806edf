//! Errors used throughout the board core.
//!
//! Square indices handed to the board are trusted and never produce errors.
//! The recoverable failures all come from text: algebraic squares, move
//! notation, and piece-placement strings. Each variant carries the offending
//! input so callers can report it verbatim.

use thiserror::Error;

/// Unified error type for the board core.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChessErrors {
    /// A file or rank character outside `a..h` / `1..8`.
    #[error("invalid algebraic character: {0:?}")]
    InvalidAlgebraicChar(char),

    /// A square token that is not exactly two characters long.
    #[error("invalid algebraic square: {0:?}")]
    InvalidAlgebraicString(String),

    /// Move notation that does not match the accepted grammar.
    #[error("invalid move notation {notation:?}: {reason}")]
    InvalidMoveNotation { notation: String, reason: String },

    /// Unexpected character in a piece-placement string.
    #[error("invalid placement token: {0:?}")]
    InvalidPlacementToken(char),

    /// Placement string with the wrong number of ranks or files.
    #[error("malformed placement string: {0:?}")]
    InvalidPlacementForm(String),
}

/// Result alias for fallible board-core operations.
pub type ChessResult<T> = Result<T, ChessErrors>;

impl ChessErrors {
    pub(crate) fn notation(notation: &str, reason: impl Into<String>) -> Self {
        ChessErrors::InvalidMoveNotation {
            notation: notation.to_owned(),
            reason: reason.into(),
        }
    }
}
