//! Parser state and error handling

use crate::frontend::core::lexer::tokens::*;
use crate::util::diagnostic::codes::{
    EMPTY_FEATURE_SET, INVALID_QUALIFIED_NOUN, INVALID_STATEMENT, MISSING_BUSINESS_ACTIVITY,
    MISSING_FEATURE_SET_NAME, UNEXPECTED_TOKEN,
};
use crate::util::diagnostic::{Diagnostic, ToDiagnostic};
use crate::util::span::Span;

/// Parse error types. All of them are recovered locally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Unexpected token '{found}', expected {expected} at {}", .span.start)]
    UnexpectedToken {
        expected: String,
        found: String,
        span: Span,
    },
    #[error("Missing feature set name at {}", .span.start)]
    MissingFeatureSetName { span: Span },
    #[error("Missing business activity for feature set '{name}' at {}", .span.start)]
    MissingBusinessActivity { name: String, span: Span },
    #[error("Invalid statement at {}: {reason}", .span.start)]
    InvalidStatement { reason: String, span: Span },
    #[error("Invalid qualified noun at {}: {reason}", .span.start)]
    InvalidQualifiedNoun { reason: String, span: Span },
    #[error("Feature set '{name}' has an empty body at {}", .span.start)]
    EmptyFeatureSet { name: String, span: Span },
}

impl ParseError {
    pub fn span(&self) -> Span {
        match self {
            ParseError::UnexpectedToken { span, .. }
            | ParseError::MissingFeatureSetName { span }
            | ParseError::MissingBusinessActivity { span, .. }
            | ParseError::InvalidStatement { span, .. }
            | ParseError::InvalidQualifiedNoun { span, .. }
            | ParseError::EmptyFeatureSet { span, .. } => *span,
        }
    }
}

impl ToDiagnostic for ParseError {
    fn to_diagnostic(&self) -> Diagnostic {
        let builder = match self {
            ParseError::UnexpectedToken {
                expected, found, ..
            } => UNEXPECTED_TOKEN
                .builder()
                .param("expected", expected.as_str())
                .param("found", found.as_str()),
            ParseError::MissingFeatureSetName { .. } => MISSING_FEATURE_SET_NAME.builder(),
            ParseError::MissingBusinessActivity { name, .. } => {
                MISSING_BUSINESS_ACTIVITY.builder().param("name", name.as_str())
            }
            ParseError::InvalidStatement { reason, .. } => {
                INVALID_STATEMENT.builder().param("reason", reason.as_str())
            }
            ParseError::InvalidQualifiedNoun { reason, .. } => {
                INVALID_QUALIFIED_NOUN.builder().param("reason", reason.as_str())
            }
            ParseError::EmptyFeatureSet { name, .. } => {
                EMPTY_FEATURE_SET.builder().param("name", name.as_str())
            }
        };
        builder.at(self.span()).build()
    }
}

static EOF: TokenKind = TokenKind::Eof;

/// Parser state shared by the statement and expression parsers
pub struct ParserState<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<ParseError>,
    /// Span of the most recently consumed token
    last_span: Span,
}

impl<'a> ParserState<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        Self {
            tokens,
            pos: 0,
            errors: Vec::new(),
            last_span: Span::dummy(),
        }
    }

    pub fn at_end(&self) -> bool {
        matches!(self.kind(), TokenKind::Eof)
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    /// Current token kind; `Eof` past the end
    pub fn kind(&self) -> &TokenKind {
        self.current().map(|t| &t.kind).unwrap_or(&EOF)
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos + 1)
    }

    pub fn peek_kind(
        &self,
        n: usize,
    ) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&EOF)
    }

    /// Span of the current token
    pub fn span(&self) -> Span {
        self.current()
            .map(|t| t.span)
            .unwrap_or(self.last_span)
    }

    /// Span from `start` up to the end of the last consumed token
    pub fn span_from(
        &self,
        start: Span,
    ) -> Span {
        start.merge(self.last_span)
    }

    pub fn last_span(&self) -> Span {
        self.last_span
    }

    pub fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned()?;
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        self.last_span = token.span;
        Some(token)
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.kind() == kind
    }

    pub fn at_keyword(
        &self,
        keyword: Keyword,
    ) -> bool {
        matches!(self.kind(), TokenKind::Keyword(k) if *k == keyword)
    }

    pub fn at_preposition(
        &self,
        preposition: Preposition,
    ) -> bool {
        matches!(self.kind(), TokenKind::Preposition(p) if *p == preposition)
    }

    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume an optional `a` / `an` / `the`
    pub fn skip_article(&mut self) {
        if matches!(self.kind(), TokenKind::Article(_)) {
            self.bump();
        }
    }

    /// Consume `kind` or record an `UnexpectedToken` error
    pub fn expect(
        &mut self,
        kind: &TokenKind,
        expected: &str,
    ) -> Option<Token> {
        if self.at(kind) {
            self.bump()
        } else {
            self.unexpected(expected)
        }
    }

    /// Record an `UnexpectedToken` error at the current token
    pub fn unexpected<T>(
        &mut self,
        expected: &str,
    ) -> Option<T> {
        let found = self
            .current()
            .map(|t| {
                if t.kind == TokenKind::Eof {
                    t.kind.describe()
                } else {
                    t.lexeme.clone()
                }
            })
            .unwrap_or_else(|| EOF.describe());
        self.error(ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found,
            span: self.span(),
        });
        None
    }

    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        tracing::debug!("parse error: {}", error);
        self.errors.push(error);
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Current token starts exactly where the previous one ended
    pub fn touches_previous(&self) -> bool {
        match (self.pos.checked_sub(1).and_then(|i| self.tokens.get(i)), self.current()) {
            (Some(prev), Some(cur)) => prev.span.end.offset == cur.span.start.offset,
            _ => false,
        }
    }

    /// Next token starts exactly where the current one ends
    pub fn touches_next(&self) -> bool {
        match (self.current(), self.peek()) {
            (Some(cur), Some(next)) => cur.span.end.offset == next.span.start.offset,
            _ => false,
        }
    }

    /// Skip to the next statement boundary after an error.
    ///
    /// Stops after a `.` at brace depth 0, after the `}` that closes a block
    /// opened during the skip, or before a `}` that closes the enclosing block.
    pub fn synchronize(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::Dot if depth == 0 => {
                    self.bump();
                    break;
                }
                TokenKind::LBrace => {
                    depth += 1;
                    self.bump();
                }
                TokenKind::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                    self.bump();
                    if depth == 0 {
                        break;
                    }
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Skip the rest of a feature set whose header is broken: up to and
    /// including a balanced body, or up to the next `(`.
    pub fn skip_feature_set(&mut self) {
        loop {
            match self.kind() {
                TokenKind::Eof | TokenKind::LParen => break,
                TokenKind::LBrace => {
                    self.skip_balanced_braces();
                    break;
                }
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Skip a `{ ... }` block, nested blocks included
    pub fn skip_balanced_braces(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.kind() {
                TokenKind::Eof => break,
                TokenKind::LBrace => depth += 1,
                TokenKind::RBrace => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        self.bump();
                        break;
                    }
                }
                _ => {}
            }
            self.bump();
        }
    }

    /// Skip forward to `kind` without leaving the enclosing block.
    /// Returns true when `kind` was found.
    pub fn skip_to(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        while !self.at_end() && !self.at(&TokenKind::RBrace) {
            if self.at(kind) {
                return true;
            }
            self.bump();
        }
        self.at(kind)
    }

    /// Skip to the next `(` at top level
    pub fn skip_to_feature_set(&mut self) {
        while !self.at_end() && !self.at(&TokenKind::LParen) {
            if self.at(&TokenKind::LBrace) {
                self.skip_balanced_braces();
            } else {
                self.bump();
            }
        }
    }
}
