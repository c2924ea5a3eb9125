use cask_lex::{Lexer, Token, TokenKind};
use cask_util::ErrorGroup;
use tracing::debug;

use crate::artifact::{Artifact, ArtifactType};
use crate::cask::Cask;
use crate::error::{ExpectedKinds, ParseError};
use crate::macos::{range_for, MacOS, MacOSRange};
use crate::stanza::{Appcast, Homepage, Name, Sha256, Url, Version};
use crate::variant::Variant;

/// Parses `source` into a [`Cask`].
///
/// Returns every variant's worth of accumulated errors together as one
/// [`ErrorGroup`] on failure; a non-empty error set means the returned
/// cask would have been unreliable, so there's no partial-success case.
pub fn parse(source: &str) -> Result<Cask, ErrorGroup> {
    Parser::new(source).run()
}

/// Recursive-descent parser with two-token lookahead. Short-lived: it
/// owns the cask under construction and is consumed by [`Parser::run`],
/// so there's no lingering back-reference from cask to parser.
struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
    errors: Vec<ParseError>,
    cask: Cask,
    current_variant: Option<Variant>,
    inside_if_else: bool,
    inside_if_condition_body: bool,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        let mut parser = Self {
            lexer: Lexer::new(source),
            current: Token::new(TokenKind::Eof, "", 0usize),
            peek: Token::new(TokenKind::Eof, "", 0usize),
            errors: Vec::new(),
            cask: Cask::new(source),
            current_variant: None,
            inside_if_else: false,
            inside_if_condition_body: false,
        };
        parser.advance();
        parser.advance();
        parser
    }

    fn run(mut self) -> Result<Cask, ErrorGroup> {
        while self.current.kind != TokenKind::Eof {
            self.parse_statement();
            if !self.advance() {
                break;
            }
        }

        if let Some(variant) = self.current_variant.take() {
            self.cask.add_variant(variant);
        }

        resolve(&mut self.cask);

        if self.errors.is_empty() {
            Ok(self.cask)
        } else {
            debug!(count = self.errors.len(), "parse finished with errors");
            Err(ErrorGroup::new("Parsing errors", self.errors))
        }
    }

    /// Advances the lookahead window by one token. Returns `false` once
    /// the lexer has nothing left to give (only happens after an
    /// illegal character), in which case `peek` is left stale and the
    /// caller should stop driving the parser.
    fn advance(&mut self) -> bool {
        self.current = self.peek.clone();
        if self.lexer.has_next() {
            self.peek = self.lexer.next_token();
            true
        } else {
            false
        }
    }

    fn accept(&mut self, kind: TokenKind) -> bool {
        self.accept_one_of(&[kind])
    }

    fn accept_one_of(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.peek.kind) {
            self.advance();
            true
        } else {
            self.errors.push(ParseError::UnexpectedToken {
                expected: ExpectedKinds(kinds.to_vec()),
                actual: self.peek.kind,
            });
            false
        }
    }

    /// Flushes the current variant to `cask.variants` when `predicate`
    /// says one of its fields is about to be overwritten, replacing it
    /// with a new variant seeded from the flushed one's global stanzas
    /// (see `Variant::seeded_from_globals`) rather than a blank one — a
    /// stanza declared before an `if` block still has to reach every
    /// branch, including ones that never restate it.
    fn flush_if(&mut self, predicate: impl FnOnce(&Variant) -> bool) {
        let should_flush = self.current_variant.as_ref().map(predicate).unwrap_or(false);
        if should_flush {
            if let Some(variant) = self.current_variant.take() {
                let seeded = variant.seeded_from_globals();
                self.cask.add_variant(variant);
                self.current_variant = Some(seeded);
            }
        }
    }

    fn current_variant_mut(&mut self) -> &mut Variant {
        self.current_variant.as_mut().expect("current variant primed by parse_expression_statement")
    }

    fn parse_statement(&mut self) {
        match self.current.kind {
            TokenKind::Illegal => {
                self.errors.push(ParseError::Illegal(self.current.literal.clone()));
            }
            TokenKind::Eof => {
                self.errors.push(ParseError::UnexpectedToken {
                    expected: ExpectedKinds(vec![TokenKind::Newline]),
                    actual: TokenKind::Eof,
                });
            }
            _ => self.parse_expression_statement(),
        }
    }

    fn parse_expression_statement(&mut self) {
        if self.current_variant.is_none() {
            self.current_variant = Some(Variant::new());
        }

        if self.current.kind == TokenKind::Ident {
            self.parse_ident_statement();
        } else {
            match self.current.kind {
                TokenKind::If | TokenKind::ElseIf => self.parse_if_expression(),
                TokenKind::Else => {
                    self.inside_if_else = true;
                    self.parse_block_statement(&[]);
                }
                _ => {}
            }
        }

        if matches!(self.peek.kind, TokenKind::Semicolon | TokenKind::Newline | TokenKind::Comma) {
            self.advance();
        }
    }

    fn parse_ident_statement(&mut self) {
        let literal = self.current.literal.clone();
        match literal.as_str() {
            "cask" if self.peek.kind == TokenKind::String => {
                self.advance();
                self.cask.token = self.current.literal.clone();
            }
            "sha256" if self.peek.kind == TokenKind::String => {
                self.advance();
                let value = self.current.literal.clone();
                let is_global = !self.inside_if_else;
                self.flush_if(|v| v.sha256.is_some());
                self.current_variant_mut().sha256 = Some(Sha256 { value, is_global });
            }
            "url" if self.peek.kind == TokenKind::String => {
                self.advance();
                let value = self.current.literal.clone();
                let is_global = !self.inside_if_else;
                self.flush_if(|v| v.url.is_some());
                self.current_variant_mut().url = Some(Url { value, is_global });
            }
            "homepage" if self.peek.kind == TokenKind::String => {
                self.advance();
                let value = self.current.literal.clone();
                let is_global = !self.inside_if_else;
                self.flush_if(|v| v.homepage.is_some());
                self.current_variant_mut().homepage = Some(Homepage { value, is_global });
            }
            "appcast" if self.peek.kind == TokenKind::String => {
                self.flush_if(|v| v.appcast.is_some());
                let is_global = !self.inside_if_else;
                match self.parse_appcast() {
                    Ok((url, checkpoint)) => {
                        self.current_variant_mut().appcast = Some(Appcast { url, checkpoint, is_global });
                    }
                    Err(err) => self.errors.push(err),
                }
            }
            "name" if self.peek.kind == TokenKind::String => {
                self.flush_if(|v| !v.names.is_empty());
                self.advance();
                let value = self.current.literal.clone();
                let is_global = !self.inside_if_else;
                self.current_variant_mut().names.push(Name { value, is_global });
            }
            "version" if self.peek.kind == TokenKind::String || self.peek.kind == TokenKind::Symbol => {
                self.flush_if(|v| v.version.is_some());
                let is_global = !self.inside_if_else;
                match self.parse_version() {
                    Ok(value) => {
                        self.current_variant_mut().version = Some(Version { value, is_global });
                    }
                    Err(err) => self.errors.push(err),
                }
            }
            "app" | "pkg" | "binary" => {
                if self.inside_if_condition_body {
                    self.flush_if(|v| !v.artifacts.is_empty());
                }
                match self.parse_artifact() {
                    Ok(artifact) => self.current_variant_mut().artifacts.push(artifact),
                    Err(err) => self.errors.push(err),
                }
            }
            _ => {}
        }
    }

    /// `current` is on the `appcast` ident when this is called; on
    /// success `current` ends on the last token consumed from the
    /// optional checkpoint clause (or the URL string, if absent).
    fn parse_appcast(&mut self) -> Result<(String, Option<String>), ParseError> {
        if self.peek.kind != TokenKind::String {
            return Err(ParseError::AppcastNotFound);
        }
        self.advance();
        let url = self.current.literal.clone();

        if self.peek.kind == TokenKind::Comma {
            self.advance();
        }
        if self.peek.kind == TokenKind::Newline {
            self.advance();
        }

        let mut checkpoint = None;
        if self.peek.kind == TokenKind::Ident && self.peek.literal == "checkpoint" {
            self.advance();
            if self.accept(TokenKind::Symbol) && self.accept(TokenKind::String) {
                checkpoint = Some(self.current.literal.clone());
            }
        }

        Ok((url, checkpoint))
    }

    /// `current` is on the `version` ident; handles both the `String`
    /// and `:latest` forms.
    fn parse_version(&mut self) -> Result<String, ParseError> {
        if self.peek.kind == TokenKind::String {
            self.advance();
            Ok(self.current.literal.clone())
        } else if self.peek.kind == TokenKind::Symbol {
            self.advance();
            if self.current.literal == "latest" {
                Ok("latest".to_string())
            } else {
                Err(ParseError::VersionNotFound)
            }
        } else {
            Err(ParseError::VersionNotFound)
        }
    }

    /// `current` is on the `app`/`pkg`/`binary` ident.
    fn parse_artifact(&mut self) -> Result<Artifact, ParseError> {
        let kind = match self.current.literal.as_str() {
            "app" => ArtifactType::App,
            "pkg" => ArtifactType::Pkg,
            "binary" => ArtifactType::Binary,
            _ => return Err(ParseError::ArtifactNotFound),
        };

        if self.peek.kind != TokenKind::String {
            return Err(ParseError::ArtifactParse { kind: kind.name() });
        }
        self.advance();
        let mut artifact = Artifact::new(kind, self.current.literal.clone());

        if self.peek.kind == TokenKind::Comma {
            self.advance();
        }
        if self.peek.kind == TokenKind::Newline {
            self.advance();
        }

        match kind {
            ArtifactType::App | ArtifactType::Binary => {
                if self.peek.kind == TokenKind::Ident && self.peek.literal == "target" {
                    self.advance();
                    if self.accept(TokenKind::Symbol) && self.accept(TokenKind::String) {
                        artifact.target = Some(self.current.literal.clone());
                    }
                }
            }
            ArtifactType::Pkg => {
                if self.peek.kind == TokenKind::Ident && self.peek.literal == "allow_untrusted" {
                    self.advance();
                    if self.accept(TokenKind::Symbol) && self.accept(TokenKind::True) {
                        artifact.allow_untrusted = true;
                    }
                }
            }
        }

        Ok(artifact)
    }

    /// `current` is on the `if`/`elsif` keyword when this is called.
    ///
    /// `inside_if_condition_body` brackets only this if/elsif body, unlike
    /// `inside_if_else` which also covers `else` bodies — the artifact
    /// re-declaration flush check needs to tell the two apart (see
    /// `parse_ident_statement`'s `app`/`pkg`/`binary` arm).
    fn parse_if_expression(&mut self) {
        self.advance();
        let range = self.parse_condition_macos();
        self.inside_if_else = true;
        self.inside_if_condition_body = true;

        if self.peek.kind == TokenKind::Then {
            self.advance();
        }

        if self.peek.kind != TokenKind::Newline && self.peek.kind != TokenKind::Semicolon {
            self.errors.push(ParseError::IfExpression {
                actual_kind: self.peek.kind,
                actual_literal: self.peek.literal.clone(),
            });
            self.inside_if_condition_body = false;
            return;
        }

        self.parse_block_statement(&[TokenKind::Else, TokenKind::ElseIf]);

        if let Some(variant) = self.current_variant.as_mut() {
            variant.maximum_supported_macos = range.newest;
            variant.minimum_supported_macos = range.oldest;
        }
        self.inside_if_else = false;
        self.inside_if_condition_body = false;
    }

    /// Parses statements until `peek` is `End`, `EOF`, or one of
    /// `extra_terminators`. Always clears `inside_if_else` on the way
    /// out, whether this block was an `if`/`elsif` body or an `else`.
    fn parse_block_statement(&mut self, extra_terminators: &[TokenKind]) {
        loop {
            if self.peek.kind == TokenKind::End
                || self.peek.kind == TokenKind::Eof
                || extra_terminators.contains(&self.peek.kind)
            {
                break;
            }
            self.advance();
            self.parse_expression_statement();
        }
        self.inside_if_else = false;
    }

    fn macos_condition_not_found(&mut self) -> MacOSRange {
        self.errors.push(ParseError::MacOSConditionNotFound);
        MacOSRange { newest: MacOS::HighSierra, oldest: MacOS::HighSierra }
    }

    /// Recognizes exactly `MacOS.release <op> :<symbol>`. `current` is
    /// on the first token of the condition on entry.
    fn parse_condition_macos(&mut self) -> MacOSRange {
        let default_range = MacOSRange { newest: MacOS::HighSierra, oldest: MacOS::HighSierra };

        if !(self.current.kind == TokenKind::Const && self.current.literal == "MacOS") {
            return self.macos_condition_not_found();
        }
        if self.peek.kind != TokenKind::Dot {
            return self.macos_condition_not_found();
        }
        self.advance();

        if !(self.peek.kind == TokenKind::Ident && self.peek.literal == "release") {
            return self.macos_condition_not_found();
        }
        self.advance();

        let op = self.peek.kind;
        if !matches!(op, TokenKind::Eq | TokenKind::Gt | TokenKind::Lt) {
            return self.macos_condition_not_found();
        }
        self.advance();

        let mut has_equal = false;
        if op != TokenKind::Eq && self.peek.kind == TokenKind::Assign {
            self.advance();
            has_equal = true;
        }

        if self.peek.kind != TokenKind::Symbol {
            return self.macos_condition_not_found();
        }
        self.advance();
        let symbol = self.current.literal.clone();

        match MacOS::from_symbol(&symbol) {
            Some(release) => range_for(op, has_equal, release).unwrap_or(default_range),
            None => {
                self.errors.push(ParseError::UnknownMacOSCondition);
                default_range
            }
        }
    }
}

/// Propagates globally-declared stanzas into every variant. `version`
/// prefers the last variant's global value, falling back to the first's;
/// every other field only ever looks at `last` — this asymmetry is
/// carried over unchanged from the reference resolver.
fn resolve(cask: &mut Cask) {
    if cask.variants.is_empty() {
        return;
    }

    let last = cask.variants.last().expect("checked non-empty above").clone();
    let first = cask.variants.first().expect("checked non-empty above").clone();

    for variant in cask.variants.iter_mut() {
        if variant.version.is_none() {
            if last.version.as_ref().is_some_and(|v| v.is_global) {
                variant.version = last.version.clone();
            } else if first.version.as_ref().is_some_and(|v| v.is_global) {
                variant.version = first.version.clone();
            }
        }
        if variant.sha256.is_none() && last.sha256.as_ref().is_some_and(|s| s.is_global) {
            variant.sha256 = last.sha256.clone();
        }
        if variant.url.is_none() && last.url.as_ref().is_some_and(|u| u.is_global) {
            variant.url = last.url.clone();
        }
        if variant.appcast.is_none() && last.appcast.as_ref().is_some_and(|a| a.is_global) {
            variant.appcast = last.appcast.clone();
        }
        if variant.names.is_empty() && last.names.iter().any(|n| n.is_global) {
            variant.names = last.names.clone();
        }
        if variant.homepage.is_none() && last.homepage.as_ref().is_some_and(|h| h.is_global) {
            variant.homepage = last.homepage.clone();
        }
        if variant.artifacts.is_empty() {
            variant.artifacts = last.artifacts.clone();
        }
    }
}
