//! E20xx: semantic errors

use super::{DiagnosticBuilder, ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::Severity;

pub const UNDEFINED_VARIABLE: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E2001",
    category: ErrorCategory::Semantic,
    severity: Severity::Error,
    message_template: "Undefined variable '{name}': '{name}' is not defined in this scope",
    help_template: "",
};

pub const DUPLICATE_FEATURE_SET: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E2002",
    category: ErrorCategory::Semantic,
    severity: Severity::Error,
    message_template: "Duplicate feature set '{name}'",
    help_template: "Feature set names must be unique; rename this one",
};

pub const CANNOT_REBIND_VARIABLE: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E2003",
    category: ErrorCategory::Semantic,
    severity: Severity::Error,
    message_template: "Cannot rebind variable '{name}': variables are immutable",
    help_template: "Create a new variable instead, e.g. '{name}-updated'",
};

pub const CIRCULAR_EVENT_CHAIN: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E2004",
    category: ErrorCategory::Semantic,
    severity: Severity::Error,
    message_template: "Circular event chain detected: {chain}",
    help_template: "Emitting these events in a loop triggers the handlers forever",
};

pub const INVALID_REGEX_PATTERN: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E2005",
    category: ErrorCategory::Semantic,
    severity: Severity::Error,
    message_template: "Invalid regex pattern '/{pattern}/': {reason}",
    help_template: "",
};

pub static E2XXX: &[ErrorCodeDefinition] = &[
    UNDEFINED_VARIABLE,
    DUPLICATE_FEATURE_SET,
    CANNOT_REBIND_VARIABLE,
    CIRCULAR_EVENT_CHAIN,
    INVALID_REGEX_PATTERN,
];

impl ErrorCodeDefinition {
    /// E2001
    pub fn undefined_variable(name: &str) -> DiagnosticBuilder {
        UNDEFINED_VARIABLE.builder().param("name", name)
    }

    /// E2002
    pub fn duplicate_feature_set(name: &str) -> DiagnosticBuilder {
        DUPLICATE_FEATURE_SET.builder().param("name", name)
    }

    /// E2003
    pub fn cannot_rebind(name: &str) -> DiagnosticBuilder {
        CANNOT_REBIND_VARIABLE.builder().param("name", name)
    }

    /// E2004, `chain` already rendered as `A → B → A`
    pub fn circular_event_chain(chain: &str) -> DiagnosticBuilder {
        CIRCULAR_EVENT_CHAIN.builder().param("chain", chain)
    }

    /// E2005
    pub fn invalid_regex(
        pattern: &str,
        reason: &str,
    ) -> DiagnosticBuilder {
        INVALID_REGEX_PATTERN
            .builder()
            .param("pattern", pattern)
            .param("reason", reason)
    }
}
