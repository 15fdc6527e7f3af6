//! Parser state tests

use crate::frontend::core::lexer::tokenize;
use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParserState};

#[cfg(test)]
mod parser_state_tests {
    use super::*;

    #[test]
    fn test_parser_state_new() {
        let tokens = vec![];
        let state = ParserState::new(&tokens);

        assert!(state.at_end());
        assert!(!state.has_errors());
        assert_eq!(state.kind(), &TokenKind::Eof);
    }

    #[test]
    fn test_bump_stops_at_eof() {
        let tokens = tokenize("<x>").unwrap();
        let mut state = ParserState::new(&tokens);
        for _ in 0..10 {
            state.bump();
        }
        assert!(state.at_end());
        assert_eq!(state.kind(), &TokenKind::Eof);
    }

    #[test]
    fn test_expect_records_error() {
        let tokens = tokenize("foo").unwrap();
        let mut state = ParserState::new(&tokens);
        assert!(state.expect(&TokenKind::Dot, "'.'").is_none());
        match &state.errors()[0] {
            ParseError::UnexpectedToken {
                expected, found, ..
            } => {
                assert_eq!(expected, "'.'");
                assert_eq!(found, "foo");
            }
            other => panic!("Expected UnexpectedToken, got {:?}", other),
        }
    }

    #[test]
    fn test_skip_article_and_keywords() {
        let tokens = tokenize("the match from").unwrap();
        let mut state = ParserState::new(&tokens);
        state.skip_article();
        assert!(state.at_keyword(Keyword::Match));
        state.bump();
        assert!(state.at_preposition(Preposition::From));
    }

    #[test]
    fn test_adjacency() {
        let tokens = tokenize("<a>.b <a> . b").unwrap();
        let mut state = ParserState::new(&tokens);
        for _ in 0..3 {
            state.bump();
        }
        assert!(state.touches_previous());
        assert!(state.touches_next());
        for _ in 0..5 {
            state.bump();
        }
        assert_eq!(state.kind(), &TokenKind::Dot);
        assert!(!state.touches_previous());
        assert!(!state.touches_next());
    }

    #[test]
    fn test_synchronize_consumes_terminator() {
        let tokens = tokenize("a b c. d").unwrap();
        let mut state = ParserState::new(&tokens);
        state.synchronize();
        assert_eq!(state.kind(), &TokenKind::Identifier("d".to_string()));
    }

    #[test]
    fn test_synchronize_stops_before_closing_brace() {
        let tokens = tokenize("a b } c").unwrap();
        let mut state = ParserState::new(&tokens);
        state.synchronize();
        assert_eq!(state.kind(), &TokenKind::RBrace);
    }

    #[test]
    fn test_synchronize_skips_nested_block() {
        let tokens = tokenize("x { y. z. } w.").unwrap();
        let mut state = ParserState::new(&tokens);
        state.synchronize();
        assert_eq!(state.kind(), &TokenKind::Identifier("w".to_string()));
    }

    #[test]
    fn test_skip_feature_set_stops_at_next_header() {
        let tokens = tokenize("junk junk (Next: API)").unwrap();
        let mut state = ParserState::new(&tokens);
        state.skip_feature_set();
        assert_eq!(state.kind(), &TokenKind::LParen);
    }

    #[test]
    fn test_parse_error_to_diagnostic() {
        use crate::util::diagnostic::ToDiagnostic;
        let tokens = tokenize("(: API) { Log \"x\" to <console>. }").unwrap();
        let errors = crate::frontend::core::parser::parse(&tokens).unwrap_err();
        let diag = errors[0].to_diagnostic();
        assert_eq!(diag.code, "E0102");
        assert!(diag.is_error());
        assert_eq!(diag.location.map(|s| s.start.column), Some(2));
    }
}
