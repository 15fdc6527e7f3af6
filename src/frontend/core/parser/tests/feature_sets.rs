//! Program structure tests - feature set headers and imports

use super::{parse_err, parse_ok};
use crate::frontend::core::parser::{ParseError, Statement};

#[cfg(test)]
mod feature_set_tests {
    use super::*;

    #[test]
    fn test_single_feature_set() {
        let program = parse_ok(
            "(Create User: User API) {\n\
             Extract the <data> from the <request: body>.\n\
             Return a <Created: status> with <data>.\n\
             }",
        );
        assert_eq!(program.feature_sets.len(), 1);
        let fs = &program.feature_sets[0];
        assert_eq!(fs.name, "Create User");
        assert_eq!(fs.business_activity, "User API");
        assert_eq!(fs.statements.len(), 2);
        assert_eq!(fs.handled_event(), None);
    }

    #[test]
    fn test_hyphenated_and_handler_names() {
        let program = parse_ok(
            "(Application-Start: Entry Point) { Return an <OK: status>. }\n\
             (Send Welcome: UserCreated Handler) { Return an <OK: status>. }",
        );
        assert_eq!(program.feature_sets[0].name, "Application-Start");
        assert_eq!(program.feature_sets[1].handled_event(), Some("UserCreated"));
    }

    #[test]
    fn test_header_keeps_keywords_and_case() {
        let program = parse_ok("(Match For The Win: Order API) { Return an <OK: status>. }");
        assert_eq!(program.feature_sets[0].name, "Match For The Win");
    }

    #[test]
    fn test_multiple_feature_sets_in_order() {
        let program = parse_ok(
            "(A: X) { Return an <OK: status>. }\n\
             (B: Y) { Return an <OK: status>. }\n\
             (C: Z) { Return an <OK: status>. }",
        );
        let names: Vec<&str> = program.feature_sets.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_imports() {
        let program = parse_ok(
            "import \"shared/auth.aro\"\n\
             import ../user-service\n\
             (A: X) { Return an <OK: status>. }",
        );
        assert_eq!(program.imports.len(), 2);
        assert_eq!(program.imports[0].path, "shared/auth.aro");
        assert_eq!(program.imports[1].path, "../user-service");
        assert_eq!(program.feature_sets.len(), 1);
    }

    #[test]
    fn test_empty_program() {
        let program = parse_ok("(* nothing here *)");
        assert!(program.is_empty());
    }

    #[test]
    fn test_empty_body_is_error() {
        let errors = parse_err("(Empty: Thing) { }");
        assert_eq!(errors.len(), 1);
        assert!(matches!(&errors[0], ParseError::EmptyFeatureSet { name, .. } if name == "Empty"));
    }

    #[test]
    fn test_missing_name() {
        let errors = parse_err("(: API) { Return an <OK: status>. }");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ParseError::MissingFeatureSetName { .. }));
    }

    #[test]
    fn test_missing_activity() {
        let errors = parse_err("(Lonely) { Return an <OK: status>. }");
        assert_eq!(errors.len(), 1);
        assert!(
            matches!(&errors[0], ParseError::MissingBusinessActivity { name, .. } if name == "Lonely")
        );

        let errors = parse_err("(Lonely:) { Return an <OK: status>. }");
        assert!(matches!(errors[0], ParseError::MissingBusinessActivity { .. }));
    }

    #[test]
    fn test_header_error_skips_body_and_continues() {
        let errors = parse_err(
            "(: Broken) { Extract the <a> from the <b>. }\n\
             (Fine: API) { Return an <OK: status>. }\n\
             (Empty: API) { }",
        );
        assert_eq!(errors.len(), 2);
        assert!(matches!(errors[0], ParseError::MissingFeatureSetName { .. }));
        assert!(matches!(errors[1], ParseError::EmptyFeatureSet { .. }));
    }

    #[test]
    fn test_stray_top_level_token() {
        let errors = parse_err("Extract the <x>.\n(A: X) { Return an <OK: status>. }");
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0], ParseError::UnexpectedToken { .. }));
    }

    #[test]
    fn test_statement_count_includes_nested() {
        let program = parse_ok(
            "(A: X) {\n\
             match <x> { case 1 { Log \"a\" to <console>. } otherwise { Log \"b\" to <console>. } }\n\
             for each <i> in <items> { Log <i> to <console>. }\n\
             Return an <OK: status>.\n\
             }",
        );
        assert_eq!(program.statement_count(), 6);
        assert!(matches!(program.feature_sets[0].statements[0], Statement::Match(_)));
    }
}
