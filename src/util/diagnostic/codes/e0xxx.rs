//! E00xx: lexical errors, E01xx: syntax errors

use super::{ErrorCategory, ErrorCodeDefinition};
use crate::util::diagnostic::Severity;

pub const UNTERMINATED_STRING: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0001",
    category: ErrorCategory::Lexer,
    severity: Severity::Error,
    message_template: "Unterminated string literal",
    help_template: "Close the string with a matching quote on the same line",
};

pub const INVALID_ESCAPE_SEQUENCE: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0002",
    category: ErrorCategory::Lexer,
    severity: Severity::Error,
    message_template: "Invalid escape sequence '{sequence}'",
    help_template: "Supported escapes are \\n \\t \\r \\\\ \\\" \\$ and \\u{XXXX}",
};

pub const INVALID_UNICODE_SCALAR: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0003",
    category: ErrorCategory::Lexer,
    severity: Severity::Error,
    message_template: "Invalid Unicode scalar value '{value}'",
    help_template: "",
};

pub const UNEXPECTED_CHARACTER: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0004",
    category: ErrorCategory::Lexer,
    severity: Severity::Error,
    message_template: "Unexpected character '{ch}'",
    help_template: "",
};

pub const INVALID_NUMBER: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0005",
    category: ErrorCategory::Lexer,
    severity: Severity::Error,
    message_template: "Invalid number literal: {reason}",
    help_template: "",
};

pub const UNTERMINATED_REGEX: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0006",
    category: ErrorCategory::Lexer,
    severity: Severity::Error,
    message_template: "Unterminated regex literal",
    help_template: "Close the pattern with '/' before the end of the line",
};

pub const UNEXPECTED_TOKEN: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0101",
    category: ErrorCategory::Parser,
    severity: Severity::Error,
    message_template: "Unexpected token '{found}', expected {expected}",
    help_template: "",
};

pub const MISSING_FEATURE_SET_NAME: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0102",
    category: ErrorCategory::Parser,
    severity: Severity::Error,
    message_template: "Missing feature set name",
    help_template: "A feature set starts with '(Name: Business Activity)'",
};

pub const MISSING_BUSINESS_ACTIVITY: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0103",
    category: ErrorCategory::Parser,
    severity: Severity::Error,
    message_template: "Missing business activity for feature set '{name}'",
    help_template: "Add the activity after a colon, e.g. '({name}: User API)'",
};

pub const INVALID_STATEMENT: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0104",
    category: ErrorCategory::Parser,
    severity: Severity::Error,
    message_template: "Invalid statement: {reason}",
    help_template: "",
};

pub const INVALID_QUALIFIED_NOUN: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0105",
    category: ErrorCategory::Parser,
    severity: Severity::Error,
    message_template: "Invalid qualified noun: {reason}",
    help_template: "Write nouns as <name> or <name: specifier.specifier>",
};

pub const EMPTY_FEATURE_SET: ErrorCodeDefinition = ErrorCodeDefinition {
    code: "E0106",
    category: ErrorCategory::Parser,
    severity: Severity::Error,
    message_template: "Feature set '{name}' has an empty body",
    help_template: "A feature set needs at least one statement",
};

pub static E0XXX: &[ErrorCodeDefinition] = &[
    UNTERMINATED_STRING,
    INVALID_ESCAPE_SEQUENCE,
    INVALID_UNICODE_SCALAR,
    UNEXPECTED_CHARACTER,
    INVALID_NUMBER,
    UNTERMINATED_REGEX,
    UNEXPECTED_TOKEN,
    MISSING_FEATURE_SET_NAME,
    MISSING_BUSINESS_ACTIVITY,
    INVALID_STATEMENT,
    INVALID_QUALIFIED_NOUN,
    EMPTY_FEATURE_SET,
];
