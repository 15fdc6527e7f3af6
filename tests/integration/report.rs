//! Golden report output

use arolang::compile_with_report;

const GREET: &str = "(Greet User: User API) {\n\
                     \x20   Extract the <name> from the <request: body>.\n\
                     \x20   Return an <OK: status> with <name>.\n\
                     }\n";

const GREET_REPORT: &str = "\
ARO Compilation Report
======================
Status: SUCCESS (0 errors, 0 warnings)

AST Summary
-----------
Imports: 0
Feature sets: 1
Statements: 2
  [1] Greet User (User API) - 2 statements
      Extract <name>
      Return <OK: status>

Symbols: Greet User
-------------------
  scope 0 (depth 0)
    name: ? [internal, extracted(from: request)]
  dependencies: []
  exports: []
  emits: []

Data Flow: Greet User
---------------------
  Extract <name>: in [request] out [name]
  Return <OK: status>: in [name] out []

Diagnostics (0)
---------------
  (none)
";

#[test]
fn test_golden_report() {
    assert_eq!(compile_with_report(GREET), GREET_REPORT);
}

#[test]
fn test_report_lists_nested_structure_and_scopes() {
    let report = compile_with_report(
        "(Route: Order API) {\n\
         Extract the <kind> from the <request>.\n\
         match <kind> {\n\
         case \"a\" { Make the <note> with 1. Log <note> to <console>. }\n\
         otherwise { Return an <OK: status>. }\n\
         }\n\
         Return an <OK: status>.\n\
         }",
    );
    assert!(report.contains("      match\n        case \"a\"\n          Make <note>\n"));
    assert!(report.contains("        otherwise\n          Return <OK: status>\n"));
    assert!(report.contains("  scope 1 (depth 1)\n    note: ? [internal, computed]\n"));
    assert!(report.contains("  scope 2 (depth 1)\n    (empty)\n"));
}
