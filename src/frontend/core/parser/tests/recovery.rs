//! Error recovery tests - every independent error is reported in one pass

use super::{body, parse_err};
use crate::frontend::core::parser::ParseError;

#[cfg(test)]
mod recovery_tests {
    use super::*;

    #[test]
    fn test_collects_errors_across_statements() {
        let errors = parse_err(&body(
            "Extract the <a> from.\n\
             Compute the <b> from <c>\n\
             Return an <OK: status>.\n\
             Log the <x: > to <console>.",
        ));
        assert_eq!(errors.len(), 3, "{:?}", errors);
        assert!(matches!(errors[0], ParseError::UnexpectedToken { .. }));
        assert!(matches!(errors[1], ParseError::UnexpectedToken { .. }));
        assert!(matches!(errors[2], ParseError::InvalidQualifiedNoun { .. }));
    }

    #[test]
    fn test_errors_in_sorted_order() {
        let errors = parse_err(
            "(A: X) { Extract the <a> from. }\n\
             (B: Y) { }\n\
             (C: Z) { Return <OK: status> }",
        );
        let lines: Vec<usize> = errors.iter().map(|e| e.span().start.line).collect();
        let mut sorted = lines.clone();
        sorted.sort_unstable();
        assert_eq!(lines, sorted);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn test_third_operand_is_invalid() {
        let errors = parse_err(&body("Compute the <x> from <a> with 1 with 2."));
        assert_eq!(errors.len(), 1);
        match &errors[0] {
            ParseError::InvalidStatement { reason, .. } => {
                assert!(reason.contains("already has an object and a value"))
            }
            other => panic!("Expected InvalidStatement, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_nouns() {
        let errors = parse_err(&body("Extract the <> from <request>."));
        assert!(matches!(&errors[0], ParseError::InvalidQualifiedNoun { reason, .. } if reason.contains("name")));

        let errors = parse_err(&body("Extract the <id from <request>."));
        assert!(matches!(&errors[0], ParseError::InvalidQualifiedNoun { reason, .. } if reason.contains("'>'")));
    }

    #[test]
    fn test_bad_case_pattern_keeps_match() {
        let errors = parse_err(&body(
            "match <x> {\n\
             case <y> { Log \"y\" to <console>. }\n\
             case 2 { Log \"two\" to <console>. }\n\
             }\n\
             Return an <OK: status>.",
        ));
        assert_eq!(errors.len(), 1, "{:?}", errors);
    }

    #[test]
    fn test_case_after_otherwise() {
        let errors = parse_err(&body(
            "match <x> {\n\
             otherwise { Log \"a\" to <console>. }\n\
             case 1 { Log \"b\" to <console>. }\n\
             }",
        ));
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ParseError::InvalidStatement { .. }));
    }

    #[test]
    fn test_zero_concurrency() {
        let errors = parse_err(&body(
            "parallel for each <u> in <urls> with concurrency: 0 { Fetch the <p> from <u>. }",
        ));
        assert!(matches!(&errors[0], ParseError::InvalidStatement { reason, .. } if reason.contains("positive")));
    }

    #[test]
    fn test_error_inside_loop_body_recovers() {
        let errors = parse_err(&body(
            "for each <i> in <items> {\n\
             Log <i> to.\n\
             Log <i> to <console>.\n\
             }\n\
             Return an <OK: status> with .",
        ));
        assert_eq!(errors.len(), 2, "{:?}", errors);
    }

    #[test]
    fn test_missing_closing_brace() {
        let errors = parse_err("(A: X) { Return an <OK: status>.");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::UnexpectedToken { found, .. } if found == "end of input"));
    }
}
