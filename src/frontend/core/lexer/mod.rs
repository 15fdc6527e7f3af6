//! Lexer module
//!
//! Turns ARO source into a token vector ending in `Eof`. The first lexical
//! error aborts the whole run.

pub mod literals;
pub mod state;
pub mod tokenizer;
pub mod tokens;
#[cfg(test)]
mod tests;

// Re-export types
pub use tokenizer::Lexer;
pub use tokens::{Article, Keyword, LexError, Preposition, Token, TokenKind};

use crate::util::span::Span;

/// Tokenize source code
pub fn tokenize(source: &str) -> Result<Vec<Token>, LexError> {
    tracing::debug!("lexing {} bytes", source.len());

    let mut lexer = Lexer::new(source);
    let mut tokens = Vec::new();

    while let Some(token) = lexer.next_token() {
        log_token(&token);
        tokens.push(token);
    }

    if lexer.error.is_none() {
        if let Some(span) = lexer.state.unclosed_interpolation() {
            lexer.error = Some(LexError::UnterminatedString { span });
        }
    }

    if let Some(err) = lexer.error {
        tracing::debug!("lexing failed: {}", err);
        Err(err)
    } else {
        let end = lexer.position();
        tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));
        tracing::debug!("lexing complete, {} tokens", tokens.len());
        Ok(tokens)
    }
}

/// Log a token for debugging
fn log_token(token: &Token) {
    let category = match &token.kind {
        TokenKind::Identifier(_) => "identifier",
        TokenKind::Keyword(_) => "keyword",
        TokenKind::Article(_) => "article",
        TokenKind::Preposition(_) => "preposition",
        TokenKind::IntLiteral(_) | TokenKind::FloatLiteral(_) => "number",
        TokenKind::StringLiteral(_)
        | TokenKind::StringSegment(_)
        | TokenKind::InterpolationStart
        | TokenKind::InterpolationEnd => "string",
        TokenKind::BoolLiteral(_) | TokenKind::NilLiteral | TokenKind::RegexLiteral { .. } => {
            "literal"
        }
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Star
        | TokenKind::Slash
        | TokenKind::Percent
        | TokenKind::PlusPlus
        | TokenKind::EqEq
        | TokenKind::Neq
        | TokenKind::Le
        | TokenKind::Ge
        | TokenKind::Arrow
        | TokenKind::FatArrow
        | TokenKind::ColonColon
        | TokenKind::PipeForward => "operator",
        _ => "punctuation",
    };
    tracing::trace!("{} {:?} at {}", category, token.lexeme, token.span.start);
}
