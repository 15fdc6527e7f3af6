//! Semantic analyzer tests
//!
//! - properties: the headline guarantees (cycles, rebinding, publish, ...)
//! - scoping: bindings, child scopes, Require and Publish
//! - passes: unreachable code, missing return, orphaned events, regex
//! - flows: data-flow records and side-effect tags

mod flows;

use super::{AnalyzedProgram, SemanticAnalyzer};
use crate::frontend::config::CompileConfig;
use crate::frontend::core::lexer::tokenize;
use crate::frontend::core::parser::parse;
use crate::util::diagnostic::{Diagnostic, DiagnosticCollector};

/// Analyze source that must lex and parse cleanly
pub(super) fn analyze_with(
    source: &str,
    config: CompileConfig,
) -> (AnalyzedProgram, Vec<Diagnostic>) {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("lex failed: {}", e));
    let program = parse(&tokens).unwrap_or_else(|errors| panic!("parse failed: {:?}", errors));
    let mut diagnostics = DiagnosticCollector::new();
    let analyzed = SemanticAnalyzer::with_config(config).analyze(&program, &mut diagnostics);
    (analyzed, diagnostics.into_diagnostics())
}

pub(super) fn analyze(source: &str) -> (AnalyzedProgram, Vec<Diagnostic>) {
    analyze_with(source, CompileConfig::default())
}

/// Diagnostics carrying `code`
pub(super) fn with_code<'a>(
    diagnostics: &'a [Diagnostic],
    code: &str,
) -> Vec<&'a Diagnostic> {
    diagnostics.iter().filter(|d| d.code == code).collect()
}

/// Wrap statements in a single, non-handler feature set
pub(super) fn feature_set(statements: &str) -> String {
    format!("(Test: Test API) {{\n{}\n}}", statements)
}
