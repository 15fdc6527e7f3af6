//! Lexical error tests

use crate::frontend::core::lexer::{tokenize, LexError};
use crate::util::diagnostic::{Severity, ToDiagnostic};

#[cfg(test)]
mod lexer_errors_tests {
    use super::*;

    #[test]
    fn test_unterminated_string() {
        let err = tokenize("Log \"oops to <console>.").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
        assert_eq!(err.span().start.column, 5);
    }

    #[test]
    fn test_newline_ends_string() {
        let err = tokenize("\"line one\nline two\"").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_unterminated_raw_string() {
        let err = tokenize("'abc").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
    }

    #[test]
    fn test_unclosed_interpolation_at_end_of_input() {
        let err = tokenize("Log \"Hello ${<name>").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
        // reported at the `${` opener
        assert_eq!(err.span().start.column, 12);
        assert_eq!(err.span().end.column, 14);
    }

    #[test]
    fn test_unclosed_nested_interpolation_reports_outermost() {
        let err = tokenize("\"a ${<x> ++ \"b ${<y>}\"").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedString { .. }));
        assert_eq!(err.span().start.column, 4);
    }

    #[test]
    fn test_invalid_escape() {
        match tokenize(r#""bad \q""#).unwrap_err() {
            LexError::InvalidEscapeSequence { sequence, .. } => assert_eq!(sequence, "\\q"),
            other => panic!("Expected invalid escape, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_unicode_escape() {
        let err = tokenize(r#""\u{zz}""#).unwrap_err();
        assert!(matches!(err, LexError::InvalidEscapeSequence { .. }));
        let err = tokenize(r#""\u0041""#).unwrap_err();
        assert!(matches!(err, LexError::InvalidEscapeSequence { .. }));
    }

    #[test]
    fn test_invalid_unicode_scalar() {
        match tokenize(r#""\u{D800}""#).unwrap_err() {
            LexError::InvalidUnicodeScalar { value, .. } => assert_eq!(value, "\\u{D800}"),
            other => panic!("Expected invalid scalar, got {:?}", other),
        }
        let err = tokenize(r#""\u{110000}""#).unwrap_err();
        assert!(matches!(err, LexError::InvalidUnicodeScalar { .. }));
    }

    #[test]
    fn test_unexpected_characters() {
        for source in ["@", "#", "=", "!", "|", "~"] {
            let err = tokenize(source).unwrap_err();
            assert!(
                matches!(err, LexError::UnexpectedCharacter { .. }),
                "source {:?} gave {:?}",
                source,
                err
            );
        }
    }

    #[test]
    fn test_invalid_numbers() {
        for source in ["1__0", "1_", "0x", "0b", "0x_1"] {
            let err = tokenize(source);
            assert!(
                matches!(err, Err(LexError::InvalidNumber { .. })),
                "source {:?} gave {:?}",
                source,
                err
            );
        }
    }

    #[test]
    fn test_integer_overflow() {
        match tokenize("9223372036854775808").unwrap_err() {
            LexError::InvalidNumber { reason, .. } => assert!(reason.contains("out of range")),
            other => panic!("Expected invalid number, got {:?}", other),
        }
    }

    #[test]
    fn test_unterminated_regex() {
        let err = tokenize("<x> matches /abc").unwrap_err();
        assert!(matches!(err, LexError::UnterminatedRegex { .. }));
    }

    #[test]
    fn test_first_error_wins() {
        let err = tokenize("@ \"unterminated").unwrap_err();
        assert!(matches!(err, LexError::UnexpectedCharacter { ch: '@', .. }));
    }

    #[test]
    fn test_error_to_diagnostic() {
        let diag = tokenize("\n  @").unwrap_err().to_diagnostic();
        assert_eq!(diag.severity, Severity::Error);
        assert_eq!(diag.code, "E0004");
        assert!(diag.message.contains('@'));
        let location = diag.location.expect("location");
        assert_eq!(location.start.line, 2);
        assert_eq!(location.start.column, 3);
    }
}
