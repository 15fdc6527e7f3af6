//! JSON diagnostic renderer
//!
//! LSP-shaped output (0-based line/character ranges) for editor tooling.

use crate::util::diagnostic::Diagnostic;
use crate::util::diagnostic::Severity;
use crate::util::span::Span;
use serde::Serialize;
use serde_json::to_string_pretty;

/// LSP severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LspDiagnosticSeverity {
    Error = 1,
    Warning = 2,
    Information = 3,
}

impl Serialize for LspDiagnosticSeverity {
    fn serialize<S: serde::Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(*self as u8)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LspPosition {
    pub line: u32,
    pub character: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LspRange {
    pub start: LspPosition,
    pub end: LspPosition,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LspDiagnostic {
    pub range: LspRange,
    pub severity: LspDiagnosticSeverity,
    pub code: String,
    pub source: String,
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
}

/// JSON renderer
#[derive(Debug, Clone)]
pub struct JsonEmitter;

impl JsonEmitter {
    /// Render one diagnostic
    pub fn render(diagnostic: &Diagnostic) -> String {
        to_string_pretty(&Self::to_lsp_diagnostic(diagnostic)).unwrap_or_else(|_| "{}".to_string())
    }

    /// Render a list of diagnostics as a JSON array
    pub fn render_all(diagnostics: &[Diagnostic]) -> String {
        let lsp_diagnostics: Vec<LspDiagnostic> =
            diagnostics.iter().map(Self::to_lsp_diagnostic).collect();
        to_string_pretty(&lsp_diagnostics).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn to_lsp_diagnostic(diagnostic: &Diagnostic) -> LspDiagnostic {
        LspDiagnostic {
            range: Self::span_to_range(diagnostic.location.as_ref()),
            severity: match diagnostic.severity {
                Severity::Error => LspDiagnosticSeverity::Error,
                Severity::Warning => LspDiagnosticSeverity::Warning,
                Severity::Note => LspDiagnosticSeverity::Information,
            },
            code: diagnostic.code.clone(),
            source: "aro".to_string(),
            message: diagnostic.message.clone(),
            hints: diagnostic.hints.clone(),
        }
    }

    fn span_to_range(span: Option<&Span>) -> LspRange {
        match span {
            Some(s) if !s.is_dummy() => LspRange {
                start: LspPosition {
                    line: s.start.line.saturating_sub(1) as u32,
                    character: s.start.column.saturating_sub(1) as u32,
                },
                end: LspPosition {
                    line: s.end.line.saturating_sub(1) as u32,
                    character: s.end.column.saturating_sub(1) as u32,
                },
            },
            _ => LspRange {
                start: LspPosition { line: 0, character: 0 },
                end: LspPosition { line: 0, character: 0 },
            },
        }
    }
}
