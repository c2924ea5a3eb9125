use tracing::trace;

use cask_util::Position;

use crate::cursor::{Cursor, EOF_CHAR};
use crate::error::LexError;
use crate::token::{lookup_ident, Token, TokenKind};

/// Pull-based scanner producing one [`Token`] per call to [`Lexer::next_token`].
///
/// The reference lexer drove a state-function/channel pipeline; a direct
/// cursor scanner produces the identical token stream with none of that
/// machinery, so that's what this is. `next_token` is the dispatch the
/// old `startLexer` state function played; everything else is one lexing
/// routine per token shape.
pub struct Lexer<'a> {
    cursor: Cursor<'a>,
    start: usize,
    lines: u32,
    terminated: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            cursor: Cursor::new(source),
            start: 0,
            lines: 0,
            terminated: false,
        }
    }

    /// False once an illegal character has halted the scanner. A normal
    /// end of input does *not* trip this — callers may keep asking for
    /// tokens past EOF and will keep getting EOF tokens back.
    pub fn has_next(&self) -> bool {
        !self.terminated
    }

    fn emit(&mut self, kind: TokenKind) -> Token {
        let literal = self.cursor.slice(self.start);
        let token = Token::new(kind, literal, Position::from(self.start));
        self.start = self.cursor.position();
        token
    }

    fn ignore(&mut self) {
        self.start = self.cursor.position();
    }

    fn illegal_at(&mut self, position: usize, character: char) -> Token {
        self.terminated = true;
        let literal = LexError::IllegalChar { position: Position::from(position), character }.to_string();
        self.start = self.cursor.position();
        Token::new(TokenKind::Illegal, literal, Position::from(position))
    }

    /// Scans and returns the next token. Safe to keep calling after EOF;
    /// only an illegal character halts further progress (see
    /// [`Lexer::has_next`]).
    pub fn next_token(&mut self) -> Token {
        loop {
            let c = self.cursor.next();
            let token = match c {
                _ if is_whitespace(c) => {
                    self.ignore();
                    continue;
                }
                '$' => self.lex_global(),
                '\n' => {
                    self.lines += 1;
                    self.emit(TokenKind::Newline)
                }
                '\'' => self.lex_single_quote_string(),
                '"' => self.lex_string(),
                ':' => {
                    if self.cursor.peek() == ':' {
                        self.cursor.next();
                        self.emit(TokenKind::Scope)
                    } else {
                        self.lex_symbol()
                    }
                }
                '.' => self.emit(TokenKind::Dot),
                '=' => {
                    if self.cursor.peek() == '=' {
                        self.cursor.next();
                        self.emit(TokenKind::Eq)
                    } else {
                        self.emit(TokenKind::Assign)
                    }
                }
                '+' => self.emit(TokenKind::Plus),
                '-' => self.emit(TokenKind::Minus),
                '!' => {
                    if self.cursor.peek() == '=' {
                        self.cursor.next();
                        self.emit(TokenKind::NotEq)
                    } else {
                        self.emit(TokenKind::Bang)
                    }
                }
                '/' => self.emit(TokenKind::Slash),
                '*' => self.emit(TokenKind::Asterisk),
                '%' => self.emit(TokenKind::Modulus),
                '<' => self.emit(TokenKind::Lt),
                '>' => self.emit(TokenKind::Gt),
                '(' => self.emit(TokenKind::LParen),
                ')' => self.emit(TokenKind::RParen),
                '{' => self.emit(TokenKind::LBrace),
                '}' => self.emit(TokenKind::RBrace),
                '[' => self.emit(TokenKind::LBracket),
                ']' => self.emit(TokenKind::RBracket),
                ',' => self.emit(TokenKind::Comma),
                ';' => self.emit(TokenKind::Semicolon),
                '|' => self.emit(TokenKind::Pipe),
                '#' => {
                    self.lex_comment();
                    continue;
                }
                EOF_CHAR => self.emit(TokenKind::Eof),
                _ if is_letter(c) => self.lex_identifier(),
                _ if is_digit(c) => self.lex_digit(),
                _ => {
                    let pos = self.start;
                    self.illegal_at(pos, c)
                }
            };
            trace!(kind = %token.kind, literal = %token.literal, "lexed token");
            return token;
        }
    }

    fn lex_identifier(&mut self) -> Token {
        loop {
            let c = self.cursor.next();
            if !is_letter(c) && !is_digit(c) && c != '?' && c != '!' {
                self.cursor.backup();
                break;
            }
        }
        let literal = self.cursor.slice(self.start);
        let kind = lookup_ident(literal);
        self.emit(kind)
    }

    fn lex_digit(&mut self) -> Token {
        loop {
            let c = self.cursor.next();
            if !is_digit_or_underscore(c) {
                self.cursor.backup();
                break;
            }
        }
        self.emit(TokenKind::Int)
    }

    fn lex_single_quote_string(&mut self) -> Token {
        self.ignore();
        loop {
            let c = self.cursor.next();
            if c == '\'' || c == EOF_CHAR {
                self.cursor.backup();
                break;
            }
        }
        let token = self.emit(TokenKind::String);
        self.cursor.next();
        self.ignore();
        token
    }

    fn lex_string(&mut self) -> Token {
        self.ignore();
        loop {
            let c = self.cursor.next();
            if c == '"' || c == EOF_CHAR {
                self.cursor.backup();
                break;
            }
        }
        let token = self.emit(TokenKind::String);
        self.cursor.next();
        self.ignore();
        token
    }

    fn lex_symbol(&mut self) -> Token {
        self.ignore();
        loop {
            let c = self.cursor.next();
            if !is_letter(c) && !is_digit(c) {
                self.cursor.backup();
                break;
            }
        }
        self.emit(TokenKind::Symbol)
    }

    fn lex_global(&mut self) -> Token {
        let r = self.cursor.next();
        if is_expression_delimiter(r) || is_whitespace(r) {
            let pos = self.cursor.position();
            return self.illegal_at(pos, r);
        }
        loop {
            let c = self.cursor.next();
            if is_whitespace(c) || is_expression_delimiter(c) {
                self.cursor.backup();
                break;
            }
        }
        self.emit(TokenKind::Global)
    }

    /// Consumes a `#`-comment through and including its trailing newline,
    /// emitting nothing — the line break itself produces no `Newline`
    /// token, matching the reference scanner exactly.
    fn lex_comment(&mut self) {
        loop {
            let c = self.cursor.next();
            if c == '\n' {
                self.lines += 1;
                break;
            }
            if c == EOF_CHAR {
                break;
            }
        }
        self.ignore();
    }
}

fn is_whitespace(c: char) -> bool {
    c.is_whitespace() && c != '\n'
}

fn is_letter(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_digit(c: char) -> bool {
    c.is_ascii_digit()
}

fn is_digit_or_underscore(c: char) -> bool {
    is_digit(c) || c == '_'
}

fn is_expression_delimiter(c: char) -> bool {
    c == '\n' || c == ';' || c == EOF_CHAR
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            out.push((token.kind, token.literal));
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn lexes_assignment_and_comment_swallowing_its_newline() {
        let tokens = lex_all("five = 5\n# just comment\nfifty = 5_0\n");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Ident, "five".into()),
                (TokenKind::Assign, "=".into()),
                (TokenKind::Int, "5".into()),
                (TokenKind::Newline, "\n".into()),
                (TokenKind::Ident, "fifty".into()),
                (TokenKind::Assign, "=".into()),
                (TokenKind::Int, "5_0".into()),
                (TokenKind::Newline, "\n".into()),
                (TokenKind::Eof, "".into()),
            ]
        );
    }

    #[test]
    fn lexes_strings_with_quotes_stripped() {
        assert_eq!(
            lex_all("'single' \"double\" \"\"")[..3],
            [
                (TokenKind::String, "single".into()),
                (TokenKind::String, "double".into()),
                (TokenKind::String, "".into()),
            ]
        );
    }

    #[test]
    fn lexes_symbol_and_scope() {
        let tokens = lex_all(":latest A::B");
        assert_eq!(
            tokens[..3],
            [
                (TokenKind::Symbol, "latest".into()),
                (TokenKind::Const, "A".into()),
                (TokenKind::Scope, "::".into()),
            ]
        );
    }

    #[test]
    fn lexes_global_including_sigil() {
        let tokens = lex_all("$foo;");
        assert_eq!(tokens[0], (TokenKind::Global, "$foo".into()));
    }

    #[test]
    fn illegal_character_halts_further_progress() {
        let mut lexer = Lexer::new("\\");
        let token = lexer.next_token();
        assert_eq!(token.kind, TokenKind::Illegal);
        assert_eq!(token.literal, "Illegal character at 0: '\\\\'");
        assert!(!lexer.has_next());
    }

    #[test]
    fn lexes_operators_and_keywords() {
        let tokens = lex_all("if a == b then true else false end");
        let kinds: Vec<TokenKind> = tokens.into_iter().map(|(k, _)| k).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::If,
                TokenKind::Ident,
                TokenKind::Eq,
                TokenKind::Ident,
                TokenKind::Then,
                TokenKind::True,
                TokenKind::Else,
                TokenKind::False,
                TokenKind::End,
                TokenKind::Eof,
            ]
        );
    }
}
