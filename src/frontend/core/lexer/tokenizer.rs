//! Tokenizer implementation
//! Main lexer structure and token generation logic

use super::literals::{
    is_identifier_char, is_identifier_start, scan_number, scan_raw_string, scan_regex, scan_string,
};
use super::state::LexerState;
use crate::frontend::core::lexer::tokens::*;
use crate::util::span::{Position, Span};
use std::collections::VecDeque;
use std::iter::Peekable;
use std::str::Chars;

/// Main lexer structure
pub struct Lexer<'a> {
    source: &'a str,
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    /// First fatal error; once set, no more tokens are produced
    pub error: Option<LexError>,
    pub(super) state: LexerState,
    /// Tokens produced ahead of time (interpolation openers)
    pub(super) pending: VecDeque<Token>,
    /// Next call continues a string after `}` closed an interpolation
    resume_string: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().peekable(),
            offset: 0,
            line: 1,
            column: 1,
            start_offset: 0,
            start_line: 1,
            start_column: 1,
            error: None,
            state: LexerState::new(),
            pending: VecDeque::new(),
            resume_string: false,
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Begin a new token at the current position
    pub(super) fn mark_start(&mut self) {
        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<&char> {
        self.chars.peek()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Get a clone of chars for lookahead operations
    pub fn chars_clone(&self) -> Peekable<Chars<'a>> {
        self.chars.clone()
    }

    /// Record a fatal error and stop
    pub(super) fn fail<T>(
        &mut self,
        error: LexError,
    ) -> Option<T> {
        if self.error.is_none() {
            self.error = Some(error);
        }
        None
    }

    /// Skip whitespace, `(* block *)` and `// line` comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&c) = self.peek() {
            match c {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(&c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                '(' if self.peek_next() == Some('*') => {
                    self.advance();
                    self.advance();
                    // non-nesting; an unterminated comment runs to EOF
                    while let Some(c) = self.advance() {
                        if c == '*' && self.peek() == Some(&')') {
                            self.advance();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Generate next token; `None` at end of input or after an error
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.scan_token()?;
        self.state.record(&token.kind);
        Some(token)
    }

    fn scan_token(&mut self) -> Option<Token> {
        if self.error.is_some() {
            return None;
        }
        if let Some(token) = self.pending.pop_front() {
            return Some(token);
        }
        if self.resume_string {
            self.resume_string = false;
            self.mark_start();
            return scan_string(self, true);
        }

        self.skip_whitespace_and_comments();
        self.peek()?;
        self.mark_start();

        let c = self.advance()?;

        match c {
            c if is_identifier_start(c) => self.scan_identifier(c),
            c if c.is_ascii_digit() => scan_number(self, c, false),
            '"' => scan_string(self, false),
            '\'' => scan_raw_string(self),
            '(' => Some(self.make_token(TokenKind::LParen)),
            ')' => Some(self.make_token(TokenKind::RParen)),
            '[' => Some(self.make_token(TokenKind::LBracket)),
            ']' => Some(self.make_token(TokenKind::RBracket)),
            '{' => {
                self.state.open_brace();
                Some(self.make_token(TokenKind::LBrace))
            }
            '}' => {
                if self.state.in_interpolation() && self.state.close_brace() {
                    self.resume_string = true;
                    Some(self.make_token(TokenKind::InterpolationEnd))
                } else {
                    Some(self.make_token(TokenKind::RBrace))
                }
            }
            ',' => Some(self.make_token(TokenKind::Comma)),
            '.' => Some(self.make_token(TokenKind::Dot)),
            '*' => Some(self.make_token(TokenKind::Star)),
            '%' => Some(self.make_token(TokenKind::Percent)),
            '+' => Some(self.two_char('+', TokenKind::PlusPlus, TokenKind::Plus)),
            '-' => {
                let digit_follows = self.peek().map(|c| c.is_ascii_digit()).unwrap_or(false);
                if self.peek() == Some(&'>') {
                    self.advance();
                    Some(self.make_token(TokenKind::Arrow))
                } else if digit_follows && !self.state.after_operand() {
                    // `-` glued to digits folds into a negative literal
                    let first = self.advance()?;
                    scan_number(self, first, true)
                } else {
                    Some(self.make_token(TokenKind::Minus))
                }
            }
            '=' => match self.peek().copied() {
                Some('=') => {
                    self.advance();
                    Some(self.make_token(TokenKind::EqEq))
                }
                Some('>') => {
                    self.advance();
                    Some(self.make_token(TokenKind::FatArrow))
                }
                _ => self.unexpected('='),
            },
            '!' => {
                if self.peek() == Some(&'=') {
                    self.advance();
                    Some(self.make_token(TokenKind::Neq))
                } else {
                    self.unexpected('!')
                }
            }
            '<' => Some(self.two_char('=', TokenKind::Le, TokenKind::Lt)),
            '>' => Some(self.two_char('=', TokenKind::Ge, TokenKind::Gt)),
            ':' => Some(self.two_char(':', TokenKind::ColonColon, TokenKind::Colon)),
            '|' => {
                if self.peek() == Some(&'>') {
                    self.advance();
                    Some(self.make_token(TokenKind::PipeForward))
                } else {
                    self.unexpected('|')
                }
            }
            '/' => {
                if self.state.regex_allowed() {
                    scan_regex(self)
                } else {
                    Some(self.make_token(TokenKind::Slash))
                }
            }
            c => self.unexpected(c),
        }
    }

    /// `first` already consumed; take `second` greedily if present
    fn two_char(
        &mut self,
        second: char,
        double: TokenKind,
        single: TokenKind,
    ) -> Token {
        if self.peek() == Some(&second) {
            self.advance();
            self.make_token(double)
        } else {
            self.make_token(single)
        }
    }

    fn unexpected(
        &mut self,
        ch: char,
    ) -> Option<Token> {
        let span = self.span();
        self.fail(LexError::UnexpectedCharacter { ch, span })
    }

    /// Scan identifier token. A `-` continues the word when a letter or digit follows.
    fn scan_identifier(
        &mut self,
        first_char: char,
    ) -> Option<Token> {
        let mut value = String::new();
        value.push(first_char);

        while let Some(&c) = self.peek() {
            if is_identifier_char(c) {
                value.push(c);
                self.advance();
            } else if c == '-' && self.peek_next().map(char::is_alphanumeric).unwrap_or(false) {
                value.push(c);
                self.advance();
            } else {
                break;
            }
        }

        let kind = self
            .state
            .keyword_from_str(&value)
            .unwrap_or(TokenKind::Identifier(value));
        Some(self.make_token(kind))
    }

    /// Create token with current span and its source lexeme
    pub fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        let lexeme = self
            .source
            .get(self.start_offset..self.offset)
            .unwrap_or_default();
        Token::new(kind, lexeme, self.span())
    }
}
