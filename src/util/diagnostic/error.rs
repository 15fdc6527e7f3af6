//! Diagnostic data structures
//!
//! `Diagnostic` is the stable shape handed to tooling: severity, code,
//! rendered message, optional location and ordered remediation hints.
//!
//! Diagnostics are only created through [`DiagnosticBuilder`](super::DiagnosticBuilder),
//! so every code that reaches a caller is registered in
//! [`ErrorCodeDefinition`](super::ErrorCodeDefinition).

use crate::util::span::Span;
use serde::Serialize;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Error,
    Warning,
    Note,
}

impl Severity {
    /// Numeric rank, higher is more severe
    pub fn as_u8(&self) -> u8 {
        match self {
            Severity::Error => 3,
            Severity::Warning => 2,
            Severity::Note => 1,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
            Severity::Note => write!(f, "note"),
        }
    }
}

/// A rendered compiler finding
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Severity level
    pub severity: Severity,
    /// Registered code, e.g. `E2003`
    pub code: String,
    /// Fully rendered message
    pub message: String,
    /// Location, when the finding is tied to source
    pub location: Option<Span>,
    /// Ordered remediation hints
    pub hints: Vec<String>,
}

impl Diagnostic {
    /// `pub(crate)`: only `DiagnosticBuilder::build()` constructs diagnostics.
    pub(crate) fn new(
        severity: Severity,
        code: String,
        message: String,
        location: Option<Span>,
        hints: Vec<String>,
    ) -> Self {
        Self {
            severity,
            code,
            message,
            location,
            hints,
        }
    }

    #[inline]
    pub fn is_error(&self) -> bool {
        self.severity.is_error()
    }

    #[inline]
    pub fn is_warning(&self) -> bool {
        matches!(self.severity, Severity::Warning)
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{}[{}]: {}", self.severity, self.code, self.message)?;
        if let Some(span) = &self.location {
            if !span.is_dummy() {
                write!(f, " at {}", span.start)?;
            }
        }
        Ok(())
    }
}
