//! Literal scanning implementations
//! Handles number, string (cooked, raw, interpolated) and regex literals

use super::tokenizer::Lexer;
use crate::frontend::core::lexer::tokens::*;
use crate::util::span::Span;

/// Scan a number literal. The first digit (and a folded leading `-`) is already consumed.
pub fn scan_number(
    lexer: &mut Lexer<'_>,
    first_char: char,
    negative: bool,
) -> Option<Token> {
    if first_char == '0' {
        match lexer.peek().copied() {
            Some('x') | Some('X') => {
                lexer.advance();
                return scan_radix_number(lexer, 16, negative);
            }
            Some('b') | Some('B') => {
                lexer.advance();
                return scan_radix_number(lexer, 2, negative);
            }
            _ => {}
        }
    }
    scan_decimal_number(lexer, first_char, negative)
}

/// Hexadecimal or binary integer after its `0x` / `0b` prefix
fn scan_radix_number(
    lexer: &mut Lexer<'_>,
    radix: u32,
    negative: bool,
) -> Option<Token> {
    let mut digits = String::new();
    if negative {
        digits.push('-');
    }
    let mut has_digits = false;

    while let Some(&c) = lexer.peek() {
        if c.is_digit(radix) {
            digits.push(c);
            lexer.advance();
            has_digits = true;
        } else if c == '_' {
            let next_is_digit = lexer.peek_next().map(|n| n.is_digit(radix)).unwrap_or(false);
            if !has_digits || !next_is_digit {
                lexer.advance();
                return invalid_number(lexer, "underscore must be between digits");
            }
            lexer.advance();
        } else {
            break;
        }
    }

    if !has_digits {
        let reason = if radix == 16 {
            "expected hex digits after '0x'"
        } else {
            "expected binary digits after '0b'"
        };
        return invalid_number(lexer, reason);
    }

    match i64::from_str_radix(&digits, radix) {
        Ok(n) => Some(lexer.make_token(TokenKind::IntLiteral(n))),
        Err(_) => invalid_number(lexer, "integer literal out of range"),
    }
}

/// Decimal integer or float, with optional fraction and exponent
fn scan_decimal_number(
    lexer: &mut Lexer<'_>,
    first_char: char,
    negative: bool,
) -> Option<Token> {
    let mut text = String::new();
    if negative {
        text.push('-');
    }
    text.push(first_char);
    scan_decimal_digits(lexer, &mut text)?;

    let mut is_float = false;

    // `5.` stays an integer followed by a statement terminator
    if lexer.peek() == Some(&'.') && lexer.peek_next().map(|c| c.is_ascii_digit()).unwrap_or(false)
    {
        lexer.advance();
        text.push('.');
        scan_decimal_digits(lexer, &mut text)?;
        is_float = true;
    }

    if matches!(lexer.peek(), Some('e') | Some('E')) && exponent_follows(lexer) {
        lexer.advance();
        text.push('e');
        if let Some(&sign) = lexer.peek() {
            if sign == '+' || sign == '-' {
                text.push(sign);
                lexer.advance();
            }
        }
        scan_decimal_digits(lexer, &mut text)?;
        is_float = true;
    }

    if is_float {
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Some(lexer.make_token(TokenKind::FloatLiteral(n))),
            _ => invalid_number(lexer, "float literal out of range"),
        }
    } else {
        match text.parse::<i64>() {
            Ok(n) => Some(lexer.make_token(TokenKind::IntLiteral(n))),
            Err(_) => invalid_number(lexer, "integer literal out of range"),
        }
    }
}

/// Consume decimal digits and `_` separators into `text` (separators dropped)
fn scan_decimal_digits(
    lexer: &mut Lexer<'_>,
    text: &mut String,
) -> Option<()> {
    while let Some(&c) = lexer.peek() {
        if c.is_ascii_digit() {
            text.push(c);
            lexer.advance();
        } else if c == '_' {
            let prev_is_digit = text.chars().last().map(|p| p.is_ascii_digit()).unwrap_or(false);
            let next_is_digit = lexer.peek_next().map(|n| n.is_ascii_digit()).unwrap_or(false);
            if !prev_is_digit || !next_is_digit {
                lexer.advance();
                return invalid_number(lexer, "underscore must be between digits");
            }
            lexer.advance();
        } else {
            break;
        }
    }
    Some(())
}

/// `e` / `E` followed by digits or a signed digit
fn exponent_follows(lexer: &Lexer<'_>) -> bool {
    let mut ahead = lexer.chars_clone();
    ahead.next();
    match ahead.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('+') | Some('-') => ahead.next().map(|c| c.is_ascii_digit()).unwrap_or(false),
        _ => false,
    }
}

fn invalid_number<T>(
    lexer: &mut Lexer<'_>,
    reason: &str,
) -> Option<T> {
    let span = lexer.span();
    lexer.fail(LexError::InvalidNumber {
        reason: reason.to_string(),
        span,
    })
}

/// Scan a double-quoted string body.
///
/// `resumed` is true when scanning continues after an interpolation, in which
/// case the result is always a `StringSegment`. Hitting `${` ends the current
/// segment and queues an `InterpolationStart`.
pub fn scan_string(
    lexer: &mut Lexer<'_>,
    resumed: bool,
) -> Option<Token> {
    let mut value = String::new();

    loop {
        match lexer.peek().copied() {
            None | Some('\n') => {
                let span = lexer.span();
                return lexer.fail(LexError::UnterminatedString { span });
            }
            Some('"') => {
                lexer.advance();
                let kind = if resumed {
                    TokenKind::StringSegment(value)
                } else {
                    TokenKind::StringLiteral(value)
                };
                return Some(lexer.make_token(kind));
            }
            Some('\\') => {
                let escape_start = lexer.position();
                lexer.advance();
                match lexer.advance() {
                    Some('n') => value.push('\n'),
                    Some('t') => value.push('\t'),
                    Some('r') => value.push('\r'),
                    Some('\\') => value.push('\\'),
                    Some('"') => value.push('"'),
                    Some('$') => value.push('$'),
                    Some('u') => {
                        let ch = scan_unicode_escape(lexer, escape_start)?;
                        value.push(ch);
                    }
                    Some(other) => {
                        let span = Span::new(escape_start, lexer.position());
                        return lexer.fail(LexError::InvalidEscapeSequence {
                            sequence: format!("\\{}", other),
                            span,
                        });
                    }
                    None => {
                        let span = lexer.span();
                        return lexer.fail(LexError::UnterminatedString { span });
                    }
                }
            }
            Some('$') if lexer.peek_next() == Some('{') => {
                let segment = lexer.make_token(TokenKind::StringSegment(value));
                lexer.mark_start();
                lexer.advance();
                lexer.advance();
                let open = lexer.make_token(TokenKind::InterpolationStart);
                lexer.state.enter_interpolation(open.span);
                lexer.pending.push_back(open);
                return Some(segment);
            }
            Some(c) => {
                lexer.advance();
                value.push(c);
            }
        }
    }
}

/// `\u{X..}` after the `\u` has been consumed
fn scan_unicode_escape(
    lexer: &mut Lexer<'_>,
    escape_start: crate::util::span::Position,
) -> Option<char> {
    let mut hex = String::new();
    let braced = lexer.peek() == Some(&'{');
    if braced {
        lexer.advance();
        while let Some(&c) = lexer.peek() {
            if c.is_ascii_hexdigit() && hex.len() < 6 {
                hex.push(c);
                lexer.advance();
            } else {
                break;
            }
        }
    }

    if !braced || hex.is_empty() || lexer.peek() != Some(&'}') {
        let span = Span::new(escape_start, lexer.position());
        return lexer.fail(LexError::InvalidEscapeSequence {
            sequence: format!("\\u{}{}", if braced { "{" } else { "" }, hex),
            span,
        });
    }
    lexer.advance();

    let scalar = u32::from_str_radix(&hex, 16).ok().and_then(char::from_u32);
    match scalar {
        Some(ch) => Some(ch),
        None => {
            let span = Span::new(escape_start, lexer.position());
            lexer.fail(LexError::InvalidUnicodeScalar {
                value: format!("\\u{{{}}}", hex),
                span,
            })
        }
    }
}

/// Scan a single-quoted raw string. Only `\'` is unescaped; newlines are kept.
pub fn scan_raw_string(lexer: &mut Lexer<'_>) -> Option<Token> {
    let mut value = String::new();

    loop {
        match lexer.peek().copied() {
            None => {
                let span = lexer.span();
                return lexer.fail(LexError::UnterminatedString { span });
            }
            Some('\'') => {
                lexer.advance();
                return Some(lexer.make_token(TokenKind::StringLiteral(value)));
            }
            Some('\\') => {
                lexer.advance();
                if lexer.peek() == Some(&'\'') {
                    lexer.advance();
                    value.push('\'');
                } else {
                    value.push('\\');
                }
            }
            Some(c) => {
                lexer.advance();
                value.push(c);
            }
        }
    }
}

/// Scan `/pattern/flags` after the opening slash
pub fn scan_regex(lexer: &mut Lexer<'_>) -> Option<Token> {
    let mut pattern = String::new();

    loop {
        match lexer.peek().copied() {
            None | Some('\n') => {
                let span = lexer.span();
                return lexer.fail(LexError::UnterminatedRegex { span });
            }
            Some('/') => {
                lexer.advance();
                break;
            }
            Some('\\') => {
                lexer.advance();
                match lexer.peek().copied() {
                    Some('/') => {
                        lexer.advance();
                        pattern.push('/');
                    }
                    Some(c) if c != '\n' => {
                        lexer.advance();
                        pattern.push('\\');
                        pattern.push(c);
                    }
                    _ => {
                        let span = lexer.span();
                        return lexer.fail(LexError::UnterminatedRegex { span });
                    }
                }
            }
            Some(c) => {
                lexer.advance();
                pattern.push(c);
            }
        }
    }

    let mut flags = String::new();
    while let Some(&c) = lexer.peek() {
        if c.is_ascii_alphabetic() {
            flags.push(c);
            lexer.advance();
        } else {
            break;
        }
    }

    Some(lexer.make_token(TokenKind::RegexLiteral { pattern, flags }))
}

/// Check if character can start an identifier
#[inline]
pub fn is_identifier_start(c: char) -> bool {
    c == '_' || unicode_ident::is_xid_start(c)
}

/// Check if character can continue an identifier (hyphens are handled by the caller)
#[inline]
pub fn is_identifier_char(c: char) -> bool {
    unicode_ident::is_xid_continue(c)
}
