//! AST traversal helpers
//!
//! Statements are walked pre-order, left to right: match cases in source
//! order, then `otherwise`, loop bodies, and pipeline stages.

use crate::frontend::core::parser::ast::*;
use crate::util::span::Span;

/// Visit every ARO statement, including those nested in match and loop
/// bodies and every pipeline stage
pub fn walk_aro<'a>(
    statements: &'a [Statement],
    visit: &mut impl FnMut(&'a AroStatement),
) {
    for statement in statements {
        match statement {
            Statement::Aro(aro) => visit(aro),
            Statement::Pipeline(pipeline) => {
                for stage in &pipeline.stages {
                    visit(stage);
                }
            }
            Statement::Match(m) => {
                for case in &m.cases {
                    walk_aro(&case.body, visit);
                }
                if let Some(otherwise) = &m.otherwise {
                    walk_aro(otherwise, visit);
                }
            }
            Statement::ForEach(f) => walk_aro(&f.body, visit),
            Statement::Publish(_) | Statement::Require(_) => {}
        }
    }
}

/// Visit every statement list: `statements` itself, then nested bodies
pub fn walk_blocks<'a>(
    statements: &'a [Statement],
    visit: &mut impl FnMut(&'a [Statement]),
) {
    visit(statements);
    for statement in statements {
        match statement {
            Statement::Match(m) => {
                for case in &m.cases {
                    walk_blocks(&case.body, visit);
                }
                if let Some(otherwise) = &m.otherwise {
                    walk_blocks(otherwise, visit);
                }
            }
            Statement::ForEach(f) => walk_blocks(&f.body, visit),
            _ => {}
        }
    }
}

/// Event name of an `Emit` statement: the result's base
pub fn emitted_event(aro: &AroStatement) -> Option<&str> {
    if aro.action.is("emit") {
        aro.result.as_ref().map(|r| r.base.as_str())
    } else {
        None
    }
}

/// Every emitted event with the span of its statement, in traversal order
pub fn emitted_events(statements: &[Statement]) -> Vec<(&str, Span)> {
    let mut events = Vec::new();
    walk_aro(statements, &mut |aro| {
        if let Some(event) = emitted_event(aro) {
            events.push((event, aro.span));
        }
    });
    events
}

/// Variable nouns referenced by an expression, left to right
pub fn expression_variables<'a>(
    expr: &'a Expression,
    out: &mut Vec<&'a QualifiedNoun>,
) {
    match expr {
        Expression::Variable(noun) => out.push(noun),
        Expression::Literal(..) => {}
        Expression::Array(items, _) => {
            for item in items {
                expression_variables(item, out);
            }
        }
        Expression::Map(entries, _) => {
            for (_, value) in entries {
                expression_variables(value, out);
            }
        }
        Expression::Binary { left, right, .. } => {
            expression_variables(left, out);
            expression_variables(right, out);
        }
        Expression::Unary { operand, .. } => expression_variables(operand, out),
        Expression::Member { object, .. } => expression_variables(object, out),
        Expression::Subscript { object, index, .. } => {
            expression_variables(object, out);
            expression_variables(index, out);
        }
        Expression::Grouped(inner, _) | Expression::Exists(inner, _) => {
            expression_variables(inner, out)
        }
        Expression::TypeCheck { expr, .. } => expression_variables(expr, out),
        Expression::Interpolated(parts, _) => {
            for part in parts {
                if let InterpolationPart::Expr(expr) = part {
                    expression_variables(expr, out);
                }
            }
        }
    }
}

/// Whether a statement list always ends in `Return`/`Throw`. A match
/// counts only with `otherwise` and when every branch ends terminally.
pub fn ends_terminally(statements: &[Statement]) -> bool {
    match statements.last() {
        Some(Statement::Match(m)) => match &m.otherwise {
            Some(otherwise) => {
                ends_terminally(otherwise) && m.cases.iter().all(|c| ends_terminally(&c.body))
            }
            None => false,
        },
        Some(last) => last.is_terminal(),
        None => false,
    }
}
