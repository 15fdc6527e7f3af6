//! Token types

use crate::util::diagnostic::{Diagnostic, ToDiagnostic};
use crate::util::diagnostic::codes::{
    INVALID_ESCAPE_SEQUENCE, INVALID_NUMBER, INVALID_UNICODE_SCALAR, UNEXPECTED_CHARACTER,
    UNTERMINATED_REGEX, UNTERMINATED_STRING,
};
use crate::util::span::Span;

/// Lexer error. Any of these aborts tokenization.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unterminated string starting at {}", .span.start)]
    UnterminatedString { span: Span },
    #[error("Invalid escape sequence '{sequence}' at {}", .span.start)]
    InvalidEscapeSequence { sequence: String, span: Span },
    #[error("Invalid Unicode scalar value '{value}' at {}", .span.start)]
    InvalidUnicodeScalar { value: String, span: Span },
    #[error("Unexpected character '{ch}' at {}", .span.start)]
    UnexpectedCharacter { ch: char, span: Span },
    #[error("Invalid number literal at {}: {reason}", .span.start)]
    InvalidNumber { reason: String, span: Span },
    #[error("Unterminated regex literal starting at {}", .span.start)]
    UnterminatedRegex { span: Span },
}

impl LexError {
    pub fn span(&self) -> Span {
        match self {
            LexError::UnterminatedString { span }
            | LexError::InvalidEscapeSequence { span, .. }
            | LexError::InvalidUnicodeScalar { span, .. }
            | LexError::UnexpectedCharacter { span, .. }
            | LexError::InvalidNumber { span, .. }
            | LexError::UnterminatedRegex { span } => *span,
        }
    }
}

impl ToDiagnostic for LexError {
    fn to_diagnostic(&self) -> Diagnostic {
        let builder = match self {
            LexError::UnterminatedString { .. } => UNTERMINATED_STRING.builder(),
            LexError::InvalidEscapeSequence { sequence, .. } => INVALID_ESCAPE_SEQUENCE
                .builder()
                .param("sequence", sequence.as_str()),
            LexError::InvalidUnicodeScalar { value, .. } => {
                INVALID_UNICODE_SCALAR.builder().param("value", value.as_str())
            }
            LexError::UnexpectedCharacter { ch, .. } => {
                UNEXPECTED_CHARACTER.builder().param("ch", ch.to_string())
            }
            LexError::InvalidNumber { reason, .. } => {
                INVALID_NUMBER.builder().param("reason", reason.as_str())
            }
            LexError::UnterminatedRegex { .. } => UNTERMINATED_REGEX.builder(),
        };
        builder.at(self.span()).build()
    }
}

/// Reserved words (matched case-insensitively)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Import,
    Publish,
    Require,
    Match,
    Case,
    Otherwise,
    Parallel,
    Each,
    Where,
    When,
    As,
    And,
    Or,
    Not,
    Is,
    Exists,
    Contains,
    Matches,
}

impl Keyword {
    pub fn as_str(&self) -> &'static str {
        match self {
            Keyword::Import => "import",
            Keyword::Publish => "publish",
            Keyword::Require => "require",
            Keyword::Match => "match",
            Keyword::Case => "case",
            Keyword::Otherwise => "otherwise",
            Keyword::Parallel => "parallel",
            Keyword::Each => "each",
            Keyword::Where => "where",
            Keyword::When => "when",
            Keyword::As => "as",
            Keyword::And => "and",
            Keyword::Or => "or",
            Keyword::Not => "not",
            Keyword::Is => "is",
            Keyword::Exists => "exists",
            Keyword::Contains => "contains",
            Keyword::Matches => "matches",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Article {
    A,
    An,
    The,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Preposition {
    From,
    For,
    With,
    To,
    Into,
    In,
    On,
    At,
    By,
    Via,
    Against,
}

impl Preposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Preposition::From => "from",
            Preposition::For => "for",
            Preposition::With => "with",
            Preposition::To => "to",
            Preposition::Into => "into",
            Preposition::In => "in",
            Preposition::On => "on",
            Preposition::At => "at",
            Preposition::By => "by",
            Preposition::Via => "via",
            Preposition::Against => "against",
        }
    }
}

impl std::fmt::Display for Preposition {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    /// `<`, also opens a qualified noun
    Lt,
    /// `>`, also closes a qualified noun
    Gt,
    Colon,
    Dot,
    Comma,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    PlusPlus,
    EqEq,
    Neq,
    Le,
    Ge,
    Arrow,
    FatArrow,
    ColonColon,
    PipeForward,

    // Words
    Keyword(Keyword),
    Article(Article),
    Preposition(Preposition),
    Identifier(String),

    // Literals
    StringLiteral(String),
    StringSegment(String),
    InterpolationStart,
    InterpolationEnd,
    IntLiteral(i64),
    FloatLiteral(f64),
    BoolLiteral(bool),
    NilLiteral,
    RegexLiteral { pattern: String, flags: String },

    // Special
    Eof,
}

impl TokenKind {
    /// Identifier, keyword, article or preposition
    pub fn is_word(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier(_)
                | TokenKind::Keyword(_)
                | TokenKind::Article(_)
                | TokenKind::Preposition(_)
        )
    }

    /// Short human description used in "expected X, found Y" messages
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Identifier(name) => format!("identifier '{}'", name),
            TokenKind::Keyword(kw) => format!("keyword '{}'", kw.as_str()),
            TokenKind::Article(_) => "article".to_string(),
            TokenKind::Preposition(p) => format!("preposition '{}'", p),
            TokenKind::StringLiteral(_) | TokenKind::StringSegment(_) => "string".to_string(),
            TokenKind::IntLiteral(n) => n.to_string(),
            TokenKind::FloatLiteral(f) => f.to_string(),
            TokenKind::BoolLiteral(b) => b.to_string(),
            TokenKind::NilLiteral => "nil".to_string(),
            TokenKind::RegexLiteral { pattern, .. } => format!("/{}/", pattern),
            TokenKind::Eof => "end of input".to_string(),
            other => format!("{:?}", other),
        }
    }
}

/// Token. `lexeme` is the exact source slice.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        lexeme: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            span,
        }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            lexeme: String::new(),
            span: Span::dummy(),
        }
    }
}
