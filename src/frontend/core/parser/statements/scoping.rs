//! Scoping statements: `Publish as` and `Require`

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::ParserState;
use crate::util::span::Span;

/// Parse `Publish as <alias> <variable>.`
pub fn parse_publish_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Option<Statement> {
    state.bump(); // consume 'Publish'
    state.bump(); // consume 'as'

    let alias = state.parse_qualified_noun()?;
    state.skip_article();
    let variable = state.parse_qualified_noun()?;
    state.expect(&TokenKind::Dot, "'.' to end the statement")?;

    Some(Statement::Publish(PublishStatement {
        alias,
        variable,
        span: state.span_from(span),
    }))
}

/// Parse `Require [article] <name> [from [article] (<noun> | word)].`
pub fn parse_require_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Option<Statement> {
    state.bump(); // consume 'Require'
    state.skip_article();

    let variable = if state.at(&TokenKind::Lt) {
        state.parse_qualified_noun()?
    } else if let TokenKind::Identifier(name) = state.kind() {
        let noun = QualifiedNoun::new(name.clone(), state.span());
        state.bump();
        noun
    } else {
        return state.unexpected("required name");
    };

    let source = if state.at_preposition(Preposition::From) {
        state.bump();
        state.skip_article();
        if state.at(&TokenKind::Lt) {
            Some(state.parse_qualified_noun()?.to_string())
        } else if state.kind().is_word() {
            state.bump().map(|t| t.lexeme)
        } else {
            return state.unexpected("source after 'from'");
        }
    } else {
        None
    };

    state.expect(&TokenKind::Dot, "'.' to end the statement")?;

    Some(Statement::Require(RequireStatement {
        variable,
        source,
        span: state.span_from(span),
    }))
}
