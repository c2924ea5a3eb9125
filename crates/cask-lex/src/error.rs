use thiserror::Error;

use cask_util::Position;

/// Errors the lexer itself can raise.
///
/// There is exactly one productive case today — an illegal character —
/// but this stays a real enum rather than a bare `String` so downstream
/// matches don't need to parse message text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LexError {
    #[error("Illegal character at {position}: '{character}'")]
    IllegalChar { position: Position, character: char },
}
