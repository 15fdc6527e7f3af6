//! Lexer state management
//! Word classification and the bookkeeping that spans several tokens
//! (string interpolation nesting, regex context).

use crate::frontend::core::lexer::tokens::{Article, Keyword, Preposition, TokenKind};
use crate::util::span::Span;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Lowercase word -> token kind. Built once, shared by every lexer.
static WORDS: Lazy<HashMap<&'static str, TokenKind>> = Lazy::new(|| {
    let mut words = HashMap::new();

    for kw in [
        Keyword::Import,
        Keyword::Publish,
        Keyword::Require,
        Keyword::Match,
        Keyword::Case,
        Keyword::Otherwise,
        Keyword::Parallel,
        Keyword::Each,
        Keyword::Where,
        Keyword::When,
        Keyword::As,
        Keyword::And,
        Keyword::Or,
        Keyword::Not,
        Keyword::Is,
        Keyword::Exists,
        Keyword::Contains,
        Keyword::Matches,
    ] {
        words.insert(kw.as_str(), TokenKind::Keyword(kw));
    }

    words.insert("a", TokenKind::Article(Article::A));
    words.insert("an", TokenKind::Article(Article::An));
    words.insert("the", TokenKind::Article(Article::The));

    for prep in [
        Preposition::From,
        Preposition::For,
        Preposition::With,
        Preposition::To,
        Preposition::Into,
        Preposition::In,
        Preposition::On,
        Preposition::At,
        Preposition::By,
        Preposition::Via,
        Preposition::Against,
    ] {
        words.insert(prep.as_str(), TokenKind::Preposition(prep));
    }

    words.insert("true", TokenKind::BoolLiteral(true));
    words.insert("false", TokenKind::BoolLiteral(false));
    words.insert("nil", TokenKind::NilLiteral);
    words.insert("null", TokenKind::NilLiteral);

    words
});

/// Cross-token lexer state
#[derive(Debug, Default)]
pub struct LexerState {
    /// Each open `${ ... }`: where it started and its brace depth, innermost last
    interpolations: Vec<(Span, usize)>,
    /// Kind of the last emitted token
    last_kind: Option<TokenKind>,
}

impl LexerState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Classify a word. Matching ignores case.
    pub fn keyword_from_str(
        &self,
        s: &str,
    ) -> Option<TokenKind> {
        if let Some(kind) = WORDS.get(s) {
            return Some(kind.clone());
        }
        if s.chars().any(|c| c.is_uppercase()) {
            return WORDS.get(s.to_lowercase().as_str()).cloned();
        }
        None
    }

    /// Record an emitted token
    pub fn record(
        &mut self,
        kind: &TokenKind,
    ) {
        self.last_kind = Some(kind.clone());
    }

    /// A `/` starts a regex only right after `case` or `matches`
    pub fn regex_allowed(&self) -> bool {
        matches!(
            self.last_kind,
            Some(TokenKind::Keyword(Keyword::Case)) | Some(TokenKind::Keyword(Keyword::Matches))
        )
    }

    /// Last token can end an operand, so a following `-` is binary
    pub fn after_operand(&self) -> bool {
        matches!(
            self.last_kind,
            Some(
                TokenKind::Identifier(_)
                    | TokenKind::IntLiteral(_)
                    | TokenKind::FloatLiteral(_)
                    | TokenKind::StringLiteral(_)
                    | TokenKind::StringSegment(_)
                    | TokenKind::BoolLiteral(_)
                    | TokenKind::NilLiteral
                    | TokenKind::RParen
                    | TokenKind::RBracket
                    | TokenKind::Gt
            )
        )
    }

    /// `span` covers the `${` opener
    pub fn enter_interpolation(
        &mut self,
        span: Span,
    ) {
        self.interpolations.push((span, 0));
    }

    pub fn in_interpolation(&self) -> bool {
        !self.interpolations.is_empty()
    }

    /// Opener of the outermost interpolation still open
    pub fn unclosed_interpolation(&self) -> Option<Span> {
        self.interpolations.first().map(|(span, _)| *span)
    }

    /// `{` inside an interpolation
    pub fn open_brace(&mut self) {
        if let Some((_, depth)) = self.interpolations.last_mut() {
            *depth += 1;
        }
    }

    /// `}` inside an interpolation. Returns true when it closes the interpolation.
    pub fn close_brace(&mut self) -> bool {
        match self.interpolations.last_mut() {
            Some((_, 0)) => {
                self.interpolations.pop();
                true
            }
            Some((_, depth)) => {
                *depth -= 1;
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_lookup() {
        let state = LexerState::new();
        assert_eq!(
            state.keyword_from_str("MATCH"),
            Some(TokenKind::Keyword(Keyword::Match))
        );
        assert_eq!(
            state.keyword_from_str("The"),
            Some(TokenKind::Article(Article::The))
        );
        assert_eq!(
            state.keyword_from_str("fRoM"),
            Some(TokenKind::Preposition(Preposition::From))
        );
        assert_eq!(state.keyword_from_str("Extract"), None);
    }

    #[test]
    fn test_interpolation_brace_tracking() {
        let mut state = LexerState::new();
        state.enter_interpolation(Span::default());
        state.open_brace();
        assert!(!state.close_brace());
        assert!(state.in_interpolation());
        assert_eq!(state.unclosed_interpolation(), Some(Span::default()));
        assert!(state.close_brace());
        assert!(!state.in_interpolation());
        assert_eq!(state.unclosed_interpolation(), None);
    }
}
