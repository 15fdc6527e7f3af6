//! Diagnostic code registry
//!
//! Central definition of every code the front end can report.

pub mod e0xxx;
pub mod e2xxx;
pub mod w2xxx;

pub use e0xxx::*;
pub use e2xxx::*;
pub use w2xxx::*;

pub mod builder;
pub use builder::DiagnosticBuilder;

use crate::util::diagnostic::Severity;
use once_cell::sync::Lazy;

/// Code category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Lexer,    // E00xx
    Parser,   // E01xx
    Semantic, // E20xx, W20xx
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ErrorCategory::Lexer => write!(f, "Lexer"),
            ErrorCategory::Parser => write!(f, "Parser"),
            ErrorCategory::Semantic => write!(f, "Semantic"),
        }
    }
}

/// Code definition (metadata plus message templates)
#[derive(Debug, Clone, Copy)]
pub struct ErrorCodeDefinition {
    /// Code, e.g. "E2001"
    pub code: &'static str,
    /// Category
    pub category: ErrorCategory,
    /// Default severity
    pub severity: Severity,
    /// Message template with `{param}` placeholders
    pub message_template: &'static str,
    /// Hint template; empty when the code carries no default hint
    pub help_template: &'static str,
}

/// The full registry
static ERROR_CODES: Lazy<Vec<ErrorCodeDefinition>> = Lazy::new(|| {
    let mut codes: Vec<ErrorCodeDefinition> = Vec::new();

    // E00xx / E01xx: lexing and parsing
    codes.extend_from_slice(e0xxx::E0XXX);
    // E20xx: semantic errors
    codes.extend_from_slice(e2xxx::E2XXX);
    // W20xx: semantic warnings
    codes.extend_from_slice(w2xxx::W2XXX);

    codes
});

impl ErrorCodeDefinition {
    /// Look up a definition by code
    pub fn find(code: &str) -> Option<&'static Self> {
        ERROR_CODES.iter().find(|c| c.code == code)
    }

    /// All registered codes
    pub fn all() -> &'static [Self] {
        &ERROR_CODES
    }

    /// Codes of one category
    pub fn by_category(category: ErrorCategory) -> impl Iterator<Item = &'static Self> {
        ERROR_CODES.iter().filter(move |c| c.category == category)
    }

    /// Start a builder for this code
    pub fn builder(&self) -> DiagnosticBuilder {
        DiagnosticBuilder::new(*self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_error_code() {
        let code = ErrorCodeDefinition::find("E2003");
        assert!(code.is_some());
        assert_eq!(code.unwrap().category, ErrorCategory::Semantic);
    }

    #[test]
    fn test_find_unknown_code() {
        assert!(ErrorCodeDefinition::find("E9999").is_none());
    }

    #[test]
    fn test_codes_are_unique() {
        let mut seen = HashSet::new();
        for def in ErrorCodeDefinition::all() {
            assert!(seen.insert(def.code), "duplicate code {}", def.code);
        }
    }

    #[test]
    fn test_warning_codes_have_warning_severity() {
        for def in ErrorCodeDefinition::all() {
            if def.code.starts_with('W') {
                assert_eq!(def.severity, Severity::Warning, "{}", def.code);
            } else {
                assert_eq!(def.severity, Severity::Error, "{}", def.code);
            }
        }
    }

    #[test]
    fn test_by_category() {
        let lexer: Vec<_> = ErrorCodeDefinition::by_category(ErrorCategory::Lexer).collect();
        assert_eq!(lexer.len(), 6);
        assert!(lexer.iter().all(|d| d.code.starts_with("E00")));
    }
}
