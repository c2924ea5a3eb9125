use std::fmt;

/// A byte offset into a source string.
///
/// Kept as a distinct type rather than a bare `usize` so that lexer and
/// parser error messages can't accidentally be built from the wrong
/// kind of integer (line number, token index, etc).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct Position(pub usize);

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for Position {
    fn from(value: usize) -> Self {
        Position(value)
    }
}
