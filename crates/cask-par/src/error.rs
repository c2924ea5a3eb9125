use std::fmt;

use cask_lex::TokenKind;
use thiserror::Error;

/// A set of token kinds rendered `[KIND1 KIND2]` — space separated, not
/// comma separated. That's the literal rendering the reference parser
/// produces (it formats a slice of stringers with `%v`), and the one
/// concrete worked example in the grammar notes uses it too, so it's
/// kept over the friendlier-looking comma list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpectedKinds(pub Vec<TokenKind>);

impl fmt::Display for ExpectedKinds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: Vec<&str> = self.0.iter().map(|k| k.name()).collect();
        write!(f, "[{}]", rendered.join(" "))
    }
}

/// Everything that can go wrong while parsing a cask. Each one is
/// collected into an [`cask_util::ErrorGroup`] rather than aborting the
/// parse — see `Parser::parse`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected next token to be of type {expected}, got {actual} instead")]
    UnexpectedToken { expected: ExpectedKinds, actual: TokenKind },

    #[error("version not found")]
    VersionNotFound,

    #[error("appcast not found")]
    AppcastNotFound,

    #[error("artifact not found")]
    ArtifactNotFound,

    #[error("error parsing \"{kind}\" artifact")]
    ArtifactParse { kind: &'static str },

    #[error("MacOS condition is unknown")]
    UnknownMacOSCondition,

    #[error("MacOS condition not found")]
    MacOSConditionNotFound,

    #[error("could not parse if expression: unexpected token {actual_kind}: '{actual_literal}'")]
    IfExpression { actual_kind: TokenKind, actual_literal: String },

    /// The illegal-character text the lexer produced, surfaced verbatim
    /// as a statement-level error.
    #[error("{0}")]
    Illegal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_kinds_render_space_separated() {
        let expected = ExpectedKinds(vec![TokenKind::Newline, TokenKind::Semicolon]);
        assert_eq!(expected.to_string(), "[NEWLINE SEMICOLON]");
    }

    #[test]
    fn if_expression_message_includes_actual_token() {
        let err = ParseError::IfExpression { actual_kind: TokenKind::Ident, actual_literal: "foo".to_string() };
        assert_eq!(err.to_string(), "could not parse if expression: unexpected token IDENT: 'foo'");
    }

    #[test]
    fn unexpected_token_message_matches_reference_wording() {
        let err = ParseError::UnexpectedToken {
            expected: ExpectedKinds(vec![TokenKind::Newline, TokenKind::Semicolon]),
            actual: TokenKind::Eof,
        };
        assert_eq!(
            err.to_string(),
            "expected next token to be of type [NEWLINE SEMICOLON], got EOF instead"
        );
    }
}
