//! Plain-text compilation report
//!
//! The layout depends only on the compilation result, so reports can be
//! compared against golden files.

use std::fmt::{self, Write};

use super::compiler::CompilationResult;
use super::core::parser::{Program, Statement};
use super::semantic::{AnalyzedFeatureSet, AnalyzedProgram, SymbolTable};
use crate::util::diagnostic::Diagnostic;

/// Render the full report
pub fn render(result: &CompilationResult) -> String {
    Report(result).to_string()
}

/// Display adapter over a result
pub struct Report<'a>(pub &'a CompilationResult);

impl fmt::Display for Report<'_> {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        let result = self.0;
        heading(f, "ARO Compilation Report", '=')?;
        write_status(f, result)?;

        writeln!(f)?;
        write_ast_summary(f, &result.program)?;

        for analyzed in &result.analyzed_program.feature_sets {
            writeln!(f)?;
            write_symbols(f, analyzed)?;
        }
        for analyzed in &result.analyzed_program.feature_sets {
            writeln!(f)?;
            write_data_flow(f, analyzed)?;
        }
        if !result.analyzed_program.event_graph.is_empty() {
            writeln!(f)?;
            write_event_graph(f, &result.analyzed_program)?;
        }

        writeln!(f)?;
        write_diagnostics(f, &result.diagnostics)
    }
}

fn heading(
    f: &mut impl Write,
    title: &str,
    underline: char,
) -> fmt::Result {
    writeln!(f, "{}", title)?;
    let rule: String = std::iter::repeat(underline).take(title.chars().count()).collect();
    writeln!(f, "{}", rule)
}

fn plural(
    count: usize,
    noun: &str,
) -> String {
    if count == 1 {
        format!("1 {}", noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn write_status(
    f: &mut impl Write,
    result: &CompilationResult,
) -> fmt::Result {
    let counts = format!(
        "{}, {}",
        plural(result.error_count(), "error"),
        plural(result.warning_count(), "warning")
    );
    match (result.is_success(), result.failed_phase) {
        (true, _) => writeln!(f, "Status: SUCCESS ({})", counts),
        (false, Some(phase)) => writeln!(f, "Status: FAILED during {} ({})", phase, counts),
        (false, None) => writeln!(f, "Status: FAILED ({})", counts),
    }
}

fn write_ast_summary(
    f: &mut impl Write,
    program: &Program,
) -> fmt::Result {
    heading(f, "AST Summary", '-')?;
    writeln!(f, "Imports: {}", program.imports.len())?;
    for import in &program.imports {
        writeln!(f, "  import {}", import.path)?;
    }
    writeln!(f, "Feature sets: {}", program.feature_sets.len())?;
    writeln!(f, "Statements: {}", program.statement_count())?;
    for (i, fs) in program.feature_sets.iter().enumerate() {
        writeln!(
            f,
            "  [{}] {} ({}) - {}",
            i + 1,
            fs.name,
            fs.business_activity,
            plural(fs.statements.len(), "statement")
        )?;
        write_outline(f, &fs.statements, 3)?;
    }
    Ok(())
}

fn write_outline(
    f: &mut impl Write,
    statements: &[Statement],
    depth: usize,
) -> fmt::Result {
    let indent = "  ".repeat(depth);
    for statement in statements {
        writeln!(f, "{}{}", indent, statement.label())?;
        match statement {
            Statement::Match(m) => {
                for case in &m.cases {
                    writeln!(f, "{}  case {}", indent, case.pattern)?;
                    write_outline(f, &case.body, depth + 2)?;
                }
                if let Some(otherwise) = &m.otherwise {
                    writeln!(f, "{}  otherwise", indent)?;
                    write_outline(f, otherwise, depth + 2)?;
                }
            }
            Statement::ForEach(each) => write_outline(f, &each.body, depth + 1)?,
            _ => {}
        }
    }
    Ok(())
}

fn write_scope(
    f: &mut impl Write,
    table: &SymbolTable,
) -> fmt::Result {
    writeln!(f, "  scope {} (depth {})", table.scope(), table.depth())?;
    if table.is_empty() {
        writeln!(f, "    (empty)")?;
    }
    for symbol in table.symbols() {
        writeln!(f, "    {}", symbol)?;
    }
    Ok(())
}

fn join<'a>(items: impl IntoIterator<Item = &'a String>) -> String {
    items.into_iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn write_symbols(
    f: &mut impl Write,
    analyzed: &AnalyzedFeatureSet,
) -> fmt::Result {
    heading(f, &format!("Symbols: {}", analyzed.name()), '-')?;
    for table in analyzed.scopes() {
        write_scope(f, table)?;
    }
    writeln!(f, "  dependencies: [{}]", join(&analyzed.dependencies))?;
    writeln!(f, "  exports: [{}]", join(&analyzed.exports))?;
    writeln!(f, "  emits: [{}]", join(&analyzed.emitted_events))
}

fn write_data_flow(
    f: &mut impl Write,
    analyzed: &AnalyzedFeatureSet,
) -> fmt::Result {
    heading(f, &format!("Data Flow: {}", analyzed.name()), '-')?;
    if analyzed.data_flows.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for flow in &analyzed.data_flows {
        writeln!(f, "  {}", flow)?;
    }
    Ok(())
}

fn write_event_graph(
    f: &mut impl Write,
    analyzed: &AnalyzedProgram,
) -> fmt::Result {
    let graph = &analyzed.event_graph;
    heading(f, "Event Graph", '-')?;
    for node in graph.nodes() {
        let successors: Vec<&str> = graph.successors(node).collect();
        if successors.is_empty() {
            writeln!(f, "  {}", node)?;
        } else {
            writeln!(f, "  {} -> {}", node, successors.join(", "))?;
        }
    }
    for cycle in &analyzed.cycles {
        writeln!(f, "  cycle: {}", cycle)?;
    }
    Ok(())
}

fn write_diagnostics(
    f: &mut impl Write,
    diagnostics: &[Diagnostic],
) -> fmt::Result {
    heading(f, &format!("Diagnostics ({})", diagnostics.len()), '-')?;
    if diagnostics.is_empty() {
        writeln!(f, "  (none)")?;
    }
    for diagnostic in diagnostics {
        writeln!(f, "  {}", diagnostic)?;
        for hint in &diagnostic.hints {
            writeln!(f, "    help: {}", hint)?;
        }
    }
    Ok(())
}
