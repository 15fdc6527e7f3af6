//! Compiler driver
//!
//! Sequences lexer, parser and semantic analyzer and packages everything
//! they found into a [`CompilationResult`]. Nothing is shared between
//! calls: each compile owns its collector and symbol registry, so one
//! `Compiler` can be used from many threads at once.

use rayon::prelude::*;
use thiserror::Error;
use tracing::debug;

use super::config::CompileConfig;
use super::core::lexer::{self, LexError, Token};
use super::core::parser::{self, ParseError, Program};
use super::report;
use super::semantic::{AnalyzedProgram, SemanticAnalyzer};
use crate::util::diagnostic::{Diagnostic, DiagnosticCollector, Severity, ToDiagnostic};

/// Phase that can stop a compile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompilationPhase {
    Lexing,
    Parsing,
}

impl std::fmt::Display for CompilationPhase {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            CompilationPhase::Lexing => write!(f, "lexing"),
            CompilationPhase::Parsing => write!(f, "parsing"),
        }
    }
}

/// Everything one compile produced
#[derive(Debug, Clone)]
pub struct CompilationResult {
    /// Parsed program; empty when lexing or parsing failed
    pub program: Program,
    /// Analysis result; empty when lexing or parsing failed
    pub analyzed_program: AnalyzedProgram,
    /// Diagnostics that passed the configured `diag_level`, in report order
    pub diagnostics: Vec<Diagnostic>,
    /// Phase that stopped the compile early
    pub failed_phase: Option<CompilationPhase>,
    // Counted before `diag_level` filtering
    error_count: usize,
    warning_count: usize,
}

impl CompilationResult {
    fn new(
        program: Program,
        analyzed_program: AnalyzedProgram,
        collector: DiagnosticCollector,
        failed_phase: Option<CompilationPhase>,
        config: &CompileConfig,
    ) -> Self {
        let error_count = collector.error_count();
        let warning_count = collector.warning_count();
        let diagnostics = collector
            .into_diagnostics()
            .into_iter()
            .filter(|d| config.diag_level.keeps(d.severity))
            .collect();

        Self {
            program,
            analyzed_program,
            diagnostics,
            failed_phase,
            error_count,
            warning_count,
        }
    }

    /// No error was found, whether or not it was kept
    pub fn is_success(&self) -> bool {
        self.error_count == 0
    }

    pub fn has_errors(&self) -> bool {
        self.error_count > 0
    }

    pub fn error_count(&self) -> usize {
        self.error_count
    }

    pub fn warning_count(&self) -> usize {
        self.warning_count
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == Severity::Warning)
    }

    /// The analyzed program, or the errors that make it unusable
    pub fn into_result(self) -> Result<AnalyzedProgram, CompileError> {
        if self.is_success() {
            return Ok(self.analyzed_program);
        }
        let summary = self
            .errors()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join("; ");
        Err(CompileError::Failed {
            count: self.error_count,
            summary,
        })
    }
}

/// Compilation failure, as seen from convenience entry points
#[derive(Debug, Error)]
pub enum CompileError {
    #[error("compilation failed with {count} error(s): {summary}")]
    Failed { count: usize, summary: String },
}

/// Compiler
#[derive(Debug, Clone, Default)]
pub struct Compiler {
    config: CompileConfig,
}

impl Compiler {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_config(config: CompileConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Lexing only
    pub fn lex(
        &self,
        source: &str,
    ) -> Result<Vec<Token>, LexError> {
        lexer::tokenize(source)
    }

    /// Parsing only
    pub fn parse(
        &self,
        tokens: &[Token],
    ) -> Result<Program, Vec<ParseError>> {
        parser::parse(tokens)
    }

    /// Semantic analysis only
    pub fn analyze(
        &self,
        program: &Program,
        diagnostics: &mut DiagnosticCollector,
    ) -> AnalyzedProgram {
        SemanticAnalyzer::with_config(self.config.clone()).analyze(program, diagnostics)
    }

    /// Run the whole front end. Never fails: problems end up in the
    /// result's diagnostics.
    pub fn compile(
        &self,
        source: &str,
    ) -> CompilationResult {
        debug!("compiling {} bytes", source.len());
        let mut collector = DiagnosticCollector::new();

        let tokens = match self.lex(source) {
            Ok(tokens) => tokens,
            Err(err) => {
                debug!("lexing failed: {}", err);
                collector.push(err.to_diagnostic());
                return self.failed(collector, CompilationPhase::Lexing);
            }
        };

        let program = match self.parse(&tokens) {
            Ok(program) => program,
            Err(errors) => {
                debug!("parsing failed with {} errors", errors.len());
                collector.extend(errors.iter().map(ToDiagnostic::to_diagnostic));
                return self.failed(collector, CompilationPhase::Parsing);
            }
        };

        let analyzed = self.analyze(&program, &mut collector);
        debug!(
            "compiled {} feature sets: {} errors, {} warnings",
            analyzed.feature_sets.len(),
            collector.error_count(),
            collector.warning_count()
        );

        CompilationResult::new(program, analyzed, collector, None, &self.config)
    }

    /// Compile and render the deterministic text report
    pub fn compile_with_report(
        &self,
        source: &str,
    ) -> String {
        report::render(&self.compile(source))
    }

    /// Compile independent units in parallel; results keep input order
    pub fn compile_batch(
        &self,
        sources: &[&str],
    ) -> Vec<CompilationResult> {
        debug!("compiling batch of {} units", sources.len());
        sources.par_iter().map(|source| self.compile(source)).collect()
    }

    fn failed(
        &self,
        collector: DiagnosticCollector,
        phase: CompilationPhase,
    ) -> CompilationResult {
        CompilationResult::new(
            Program::default(),
            AnalyzedProgram::default(),
            collector,
            Some(phase),
            &self.config,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::config::DiagLevel;

    const GREET: &str = "(Greet User: User API) {\n\
                         Extract the <name> from the <request: body>.\n\
                         Return an <OK: status> with <name>.\n\
                         }";

    #[test]
    fn test_compile_success() {
        let result = Compiler::new().compile(GREET);
        assert!(result.is_success());
        assert!(!result.has_errors());
        assert!(result.diagnostics.is_empty());
        assert_eq!(result.failed_phase, None);
        assert_eq!(result.program.feature_sets.len(), 1);
        assert_eq!(result.analyzed_program.feature_sets.len(), 1);
    }

    #[test]
    fn test_lex_failure_yields_empty_program() {
        let result = Compiler::new().compile("(A: B) {\n  Log \"open to <console>.\n}");
        assert!(!result.is_success());
        assert_eq!(result.failed_phase, Some(CompilationPhase::Lexing));
        assert!(result.program.is_empty());
        assert!(result.analyzed_program.is_empty());
        assert_eq!(result.error_count(), 1);
        assert_eq!(result.diagnostics[0].code, "E0001");
    }

    #[test]
    fn test_parse_failure_reports_every_error() {
        let result = Compiler::new().compile(
            "(A: B) {\n\
             Extract the <a> from.\n\
             Return an <OK: status>.\n\
             Log the <x: > to <console>.\n\
             }",
        );
        assert_eq!(result.failed_phase, Some(CompilationPhase::Parsing));
        assert!(result.program.is_empty());
        assert_eq!(result.error_count(), 2);
        assert!(result.errors().all(|d| d.code.starts_with("E01")));
    }

    #[test]
    fn test_warnings_do_not_block_success() {
        let result = Compiler::new().compile("(Startup: Application-Start) {\n Log \"x\" to <console>.\n}");
        assert!(result.is_success());
        assert_eq!(result.warnings().count(), 1);
        assert_eq!(result.warning_count(), 1);
    }

    #[test]
    fn test_diag_level_filters_but_still_counts() {
        let config = CompileConfig {
            diag_level: DiagLevel::Errors,
            ..CompileConfig::default()
        };
        let source = "(A: B) {\n\
                      Make the <x> with 1.\n\
                      Make the <x> with 2.\n\
                      }";
        let result = Compiler::with_config(config).compile(source);
        assert!(result.diagnostics.iter().all(Diagnostic::is_error));
        assert_eq!(result.error_count(), 1);
        assert!(result.warning_count() >= 1);

        let config = CompileConfig {
            diag_level: DiagLevel::None,
            ..CompileConfig::default()
        };
        let result = Compiler::with_config(config).compile(source);
        assert!(result.diagnostics.is_empty());
        assert!(!result.is_success());
    }

    #[test]
    fn test_into_result() {
        assert!(Compiler::new().compile(GREET).into_result().is_ok());

        let err = Compiler::new()
            .compile("(A: B) {\nReturn an <OK: status> with <ghost>.\n}")
            .into_result()
            .unwrap_err();
        let message = err.to_string();
        assert!(message.contains("1 error"));
        assert!(message.contains("E2001"));
    }

    #[test]
    fn test_compile_batch_keeps_order() {
        let sources = [GREET, "(", "(Other: Thing) {\nReturn an <OK: status>.\n}"];
        let results = Compiler::new().compile_batch(&sources);
        assert_eq!(results.len(), 3);
        assert!(results[0].is_success());
        assert!(!results[1].is_success());
        assert_eq!(results[2].program.feature_sets[0].name, "Other");
    }
}
