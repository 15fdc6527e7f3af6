//! ARO statement parsing
//! `Action [article] <Result> { Preposition [article] Operand } [when Guard].`

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::pratt::BP_LOWEST;
use crate::frontend::core::parser::{ParseError, ParserState};
use crate::util::span::Span;

/// Parse an ARO statement, or a pipeline when `|>` follows the first stage
pub fn parse_aro_or_pipeline_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Option<Statement> {
    let first = parse_aro_clause(state)?;

    if !state.at(&TokenKind::PipeForward) {
        state.expect(&TokenKind::Dot, "'.' to end the statement")?;
        let mut aro = first;
        aro.span = state.span_from(span);
        return Some(Statement::Aro(aro));
    }

    let mut stages = vec![first];
    while state.skip(&TokenKind::PipeForward) {
        stages.push(parse_aro_clause(state)?);
    }
    state.expect(&TokenKind::Dot, "'.' to end the pipeline")?;

    Some(Statement::Pipeline(PipelineStatement {
        stages,
        span: state.span_from(span),
    }))
}

/// One ARO clause without its terminating `.`
pub fn parse_aro_clause(state: &mut ParserState<'_>) -> Option<AroStatement> {
    let start = state.span();
    let action = parse_action(state)?;
    state.skip_article();

    let mut result = None;
    let mut value = None;
    if state.at(&TokenKind::Lt) {
        result = Some(state.parse_qualified_noun()?);
    } else {
        // value-first form: `Log "x" to <console>.`
        value = Some(state.parse_expression(BP_LOWEST)?);
    }

    let mut object: Option<ObjectClause> = None;
    while let TokenKind::Preposition(preposition) = *state.kind() {
        let clause_start = state.span();
        state.bump();
        state.skip_article();
        let operand = state.parse_expression(BP_LOWEST)?;

        match operand {
            Expression::Variable(noun) if object.is_none() => {
                object = Some(ObjectClause {
                    preposition,
                    noun,
                    span: state.span_from(clause_start),
                });
            }
            operand if value.is_none() => value = Some(operand),
            operand => {
                state.error(ParseError::InvalidStatement {
                    reason: format!(
                        "'{}' already has an object and a value; unexpected operand after '{}'",
                        action.verb, preposition
                    ),
                    span: operand.span(),
                });
                return None;
            }
        }
    }

    let guard = if state.at_keyword(Keyword::When) {
        state.bump();
        Some(state.parse_expression(BP_LOWEST)?)
    } else {
        None
    };

    Some(AroStatement {
        action,
        result,
        object,
        value,
        guard,
        span: state.span_from(start),
    })
}

/// `Verb` or `<Verb>`
fn parse_action(state: &mut ParserState<'_>) -> Option<Action> {
    let start = state.span();
    let angled = state.skip(&TokenKind::Lt);

    if !state.kind().is_word() {
        return state.unexpected("action verb");
    }
    let verb = state.bump()?.lexeme;

    if angled {
        state.expect(&TokenKind::Gt, "'>' after the action verb")?;
    }

    Some(Action::new(verb, state.span_from(start)))
}
