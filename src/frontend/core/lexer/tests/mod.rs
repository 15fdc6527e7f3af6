//! Lexer tests module
//!
//! - basic: words, identifiers, spans and lexemes
//! - literals: numbers and plain strings
//! - strings: escapes, raw strings and interpolation
//! - operators: operators and delimiters
//! - keywords: case-insensitive word classification
//! - comments: block and line comments
//! - errors: fatal lexical errors
//! - properties: proptest round-trip properties

mod errors;
mod keywords;

use super::{tokenize, TokenKind};

/// Token kinds without the trailing `Eof`
pub(super) fn kinds(source: &str) -> Vec<TokenKind> {
    let mut kinds: Vec<TokenKind> = tokenize(source)
        .unwrap_or_else(|e| panic!("tokenize failed for {:?}: {}", source, e))
        .into_iter()
        .map(|t| t.kind)
        .collect();
    assert_eq!(kinds.pop(), Some(TokenKind::Eof));
    kinds
}
