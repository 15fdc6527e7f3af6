//! W20xx: semantic warnings

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::Severity;

pub const UNUSED_VARIABLE: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "W2001",
    category: ErrorCategory::Semantic,
    severity: Severity::Warning,
    message_template: "Variable '{name}' is defined but never used",
    help_template: "Use it, publish it, or prefix it with '_' to silence this warning",
};

pub const UNREACHABLE_CODE: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "W2002",
    category: ErrorCategory::Semantic,
    severity: Severity::Warning,
    message_template: "Unreachable code after '{verb}' in feature set '{feature_set}'",
    help_template: "Statements after an unconditional Return or Throw never run",
};

pub const MISSING_TERMINAL_RETURN: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "W2003",
    category: ErrorCategory::Semantic,
    severity: Severity::Warning,
    message_template: "Feature set '{name}' ends with no Return or Throw statement",
    help_template: "End the feature set with e.g. 'Return an <OK: status> for the <result>.'",
};

pub const ORPHANED_EVENT: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "W2004",
    category: ErrorCategory::Semantic,
    severity: Severity::Warning,
    message_template: "Event '{event}' is emitted but no handler exists",
    help_template: "Add a feature set with business activity '{event} Handler'",
};

pub const DUPLICATE_PUBLISHED_NAME: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "W2005",
    category: ErrorCategory::Semantic,
    severity: Severity::Warning,
    message_template: "'{name}' is published by both '{first}' and '{second}'",
    help_template: "Later lookups resolve to the first publisher",
};

pub static W2XXX: &[ErrorCodeDefinition] = &[
    UNUSED_VARIABLE,
    UNREACHABLE_CODE,
    MISSING_TERMINAL_RETURN,
    ORPHANED_EVENT,
    DUPLICATE_PUBLISHED_NAME,
];

impl ErrorCodeDefinition {
    /// W2001
    pub fn unused_variable(name: &str) -> DiagnosticBuilder {
        UNUSED_VARIABLE.builder().param("name", name)
    }

    /// W2002
    pub fn unreachable_code(
        verb: &str,
        feature_set: &str,
    ) -> DiagnosticBuilder {
        UNREACHABLE_CODE
            .builder()
            .param("verb", verb)
            .param("feature_set", feature_set)
    }

    /// W2003
    pub fn missing_terminal_return(name: &str) -> DiagnosticBuilder {
        MISSING_TERMINAL_RETURN.builder().param("name", name)
    }

    /// W2004
    pub fn orphaned_event(event: &str) -> DiagnosticBuilder {
        ORPHANED_EVENT.builder().param("event", event)
    }

    /// W2005
    pub fn duplicate_published_name(
        name: &str,
        first: &str,
        second: &str,
    ) -> DiagnosticBuilder {
        DUPLICATE_PUBLISHED_NAME
            .builder()
            .param("name", name)
            .param("first", first)
            .param("second", second)
    }
}
