//! Whole-pipeline behavior on realistic programs

use arolang::frontend::semantic::{SymbolSource, Visibility};
use arolang::frontend::CompilationPhase;
use arolang::util::diagnostic::JsonEmitter;
use arolang::{check, compile};

const USER_SERVICE: &str = r#"
import "shared/auth.aro"

(* User service: creation and notification *)

(Create User: User API) {
    Extract the <data> from the <request: body>.
    Validate the <valid-data> for the <data>.
    Create the <user: User> with <valid-data>.
    Store the <user> into the <user-repository>.
    Publish as <created-user> <user>.
    Emit the <UserCreated: event> with <user>.
    Return a <Created: status> with <user>.
}

(Send Welcome: UserCreated Handler) {
    Extract the <user> from the <event: user>.
    Send the <welcome-email> to the <user>.email.
    Return an <OK: status>.
}

(List Users: User API) {
    Retrieve the <users> from the <user-repository>.
    for each <user> in <users> where <user>.active {
        Log <user> to the <console>.
    }
    Return an <OK: status> with <users>.
}
"#;

#[test]
fn test_user_service_compiles_cleanly() {
    let result = compile(USER_SERVICE);
    assert!(result.is_success(), "{:?}", result.diagnostics);
    assert!(result.diagnostics.is_empty(), "{:?}", result.diagnostics);

    let program = &result.program;
    assert_eq!(program.imports.len(), 1);
    assert_eq!(program.feature_sets.len(), 3);

    let analyzed = &result.analyzed_program;
    let create = analyzed.feature_set("Create User").expect("Create User");
    assert!(create.dependencies.is_empty());
    assert!(create.emitted_events.contains("UserCreated"));
    assert_eq!(
        create.symbol_table.lookup("user").map(|s| s.visibility),
        Some(Visibility::Published)
    );
    assert_eq!(
        analyzed.registry.get("created-user").map(|s| s.source.clone()),
        Some(SymbolSource::AliasOf("user".to_string()))
    );
    assert!(analyzed.cycles.is_empty());

    let list = analyzed.feature_set("List Users").expect("List Users");
    assert!(list.dependencies.contains("user-repository"));
    assert_eq!(list.child_scopes.len(), 1);
}

#[test]
fn test_every_independent_finding_in_one_run() {
    let result = compile(
        "(Broken: Orders API) {\n\
         Make the <total> with 1.\n\
         Make the <total> with 2.\n\
         Return an <OK: status> with <missing>.\n\
         Log \"after\" to <console>.\n\
         }\n\
         (Broken: Other API) {\n\
         Emit the <Nobody: event>.\n\
         }",
    );
    let codes: Vec<&str> = result.diagnostics.iter().map(|d| d.code.as_str()).collect();
    for code in ["E2002", "E2003", "E2001", "W2001", "W2002", "W2003", "W2004"] {
        assert!(codes.contains(&code), "missing {} in {:?}", code, codes);
    }
    assert_eq!(result.error_count(), 3);
    assert!(!result.is_success());
}

#[test]
fn test_lexer_error_is_a_diagnostic() {
    let result = compile("(A: B) {\n    Log \"bad \\q escape\" to <console>.\n}");
    assert_eq!(result.failed_phase, Some(CompilationPhase::Lexing));
    assert_eq!(result.diagnostics.len(), 1);
    assert_eq!(result.diagnostics[0].code, "E0002");
    assert_eq!(result.diagnostics[0].location.map(|s| s.start.line), Some(2));
}

#[test]
fn test_check_wraps_errors() {
    assert!(check(USER_SERVICE).is_ok());

    let err = check("(A: B) {\nMake the <x> with 1.\nMake the <x> with 2.\nReturn an <OK: status> with <x>.\n}")
        .expect_err("rebinding must fail");
    let chain = format!("{:#}", err);
    assert!(chain.contains("did not compile"));
    assert!(chain.contains("Cannot rebind variable 'x'"));
}

#[test]
fn test_diagnostics_serialize_to_json() {
    let result = compile("(A: B) {\nLog \"x\" to <console>.\n}");
    let json = JsonEmitter::render_all(&result.diagnostics);
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert!(value.is_array());
    assert!(json.contains("W2003"));
}
