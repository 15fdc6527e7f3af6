//! Program-wide static checks
//!
//! Each pass is independent and only appends diagnostics.

use super::event_graph::{CycleSearch, EventGraph};
use super::visit;
use crate::frontend::config::CompileConfig;
use crate::frontend::core::parser::ast::*;
use crate::util::diagnostic::{DiagnosticCollector, ErrorCodeDefinition};
use crate::util::span::Span;
use indexmap::IndexSet;
use std::collections::HashSet;

/// One error for every feature set whose name was already used
pub fn check_duplicate_feature_sets(
    program: &Program,
    diagnostics: &mut DiagnosticCollector,
) {
    let mut seen: HashSet<&str> = HashSet::new();
    for feature_set in &program.feature_sets {
        if !seen.insert(feature_set.name.as_str()) {
            diagnostics.push(
                ErrorCodeDefinition::duplicate_feature_set(&feature_set.name)
                    .at(feature_set.span)
                    .build(),
            );
        }
    }
}

/// One warning per statement list, at the first statement after an
/// unguarded `Return`/`Throw`
pub fn check_unreachable_code(
    program: &Program,
    diagnostics: &mut DiagnosticCollector,
) {
    for feature_set in &program.feature_sets {
        visit::walk_blocks(&feature_set.statements, &mut |block| {
            let Some(terminal) = block.iter().position(Statement::is_terminal) else {
                return;
            };
            let Some(unreachable) = block.get(terminal + 1) else {
                return;
            };
            let verb = match &block[terminal] {
                Statement::Aro(aro) => aro.action.verb.clone(),
                Statement::Pipeline(p) => p
                    .stages
                    .last()
                    .map(|s| s.action.verb.clone())
                    .unwrap_or_default(),
                _ => String::new(),
            };
            diagnostics.push(
                ErrorCodeDefinition::unreachable_code(&verb, &feature_set.name)
                    .at(unreachable.span())
                    .build(),
            );
        });
    }
}

/// A warning for each feature set whose body can fall off the end
pub fn check_missing_return(
    program: &Program,
    diagnostics: &mut DiagnosticCollector,
) {
    for feature_set in &program.feature_sets {
        if !visit::ends_terminally(&feature_set.statements) {
            let span = feature_set
                .statements
                .last()
                .map(Statement::span)
                .unwrap_or(feature_set.span);
            diagnostics.push(
                ErrorCodeDefinition::missing_terminal_return(&feature_set.name)
                    .at(span)
                    .build(),
            );
        }
    }
}

/// A warning for each `Emit` whose event has no `"<Event> Handler"` feature set
pub fn check_orphaned_events(
    program: &Program,
    diagnostics: &mut DiagnosticCollector,
) {
    let handled: HashSet<&str> = program
        .feature_sets
        .iter()
        .filter_map(FeatureSet::handled_event)
        .collect();

    for feature_set in &program.feature_sets {
        for (event, span) in visit::emitted_events(&feature_set.statements) {
            if !handled.contains(event) {
                diagnostics.push(ErrorCodeDefinition::orphaned_event(event).at(span).build());
            }
        }
    }
}

/// Edges run from a handler's event to every event its body emits.
/// Handlers of externally triggered events add their node but no edges.
pub fn build_event_graph(
    program: &Program,
    config: &CompileConfig,
) -> EventGraph {
    let mut graph = EventGraph::new();

    for feature_set in &program.feature_sets {
        let Some(handled) = feature_set.handled_event() else {
            continue;
        };
        graph.add_node(handled);
        if config.is_external_event(handled) {
            tracing::trace!("'{}' handles external event '{}'", feature_set.name, handled);
            continue;
        }
        for (emitted, _) in visit::emitted_events(&feature_set.statements) {
            graph.add_edge(handled, emitted, &feature_set.name);
        }
    }

    graph
}

/// One error per cycle, located at the first implicated handler
pub fn report_cycles(
    program: &Program,
    search: &CycleSearch,
    diagnostics: &mut DiagnosticCollector,
) {
    let last = search.cycles.len().saturating_sub(1);
    for (i, cycle) in search.cycles.iter().enumerate() {
        let location: Option<Span> = cycle.feature_sets.first().and_then(|name| {
            program
                .feature_sets
                .iter()
                .find(|fs| &fs.name == name)
                .map(|fs| fs.span)
        });

        let mut builder = ErrorCodeDefinition::circular_event_chain(&cycle.chain());
        if let Some(span) = location {
            builder = builder.at(span);
        }
        if let Some(first) = cycle.feature_sets.first() {
            builder = builder.hint(format!(
                "Break the chain by removing or guarding one Emit, e.g. in '{}'",
                first
            ));
        }
        if !cycle.feature_sets.is_empty() {
            builder = builder.hint(format!(
                "Feature sets involved: {}",
                cycle.feature_sets.join(", ")
            ));
        }
        if search.truncated && i == last {
            builder = builder.hint(format!(
                "Only the first {} cycles are reported; raise `max_event_cycles` to see more",
                search.cycles.len()
            ));
        }
        diagnostics.push(builder.build());
    }
}

/// A name published by two different feature sets
#[derive(Debug, Clone, PartialEq)]
pub struct PublishConflict {
    pub name: String,
    pub first: String,
    pub second: String,
    pub span: Span,
}

/// One warning per conflicting publication
pub fn report_duplicate_exports(
    conflicts: &[PublishConflict],
    diagnostics: &mut DiagnosticCollector,
) {
    let mut reported: IndexSet<(&str, &str)> = IndexSet::new();
    for conflict in conflicts {
        if reported.insert((conflict.name.as_str(), conflict.second.as_str())) {
            diagnostics.push(
                ErrorCodeDefinition::duplicate_published_name(
                    &conflict.name,
                    &conflict.first,
                    &conflict.second,
                )
                .at(conflict.span)
                .build(),
            );
        }
    }
}
