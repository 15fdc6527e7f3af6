//! Control flow statement parsing
//! Handles `match` and `for each` (plain, parallel and bounded-parallel)

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::pratt::BP_LOWEST;
use crate::frontend::core::parser::statements::StatementParser;
use crate::frontend::core::parser::{ParseError, ParserState};
use crate::util::span::Span;
use crate::util::Spanned;

/// Parse `match Expr { (case Literal { Stmt* })* [otherwise { Stmt* }] }`
///
/// Errors inside the braces are recovered here, so once the body is open the
/// statement is always returned.
pub fn parse_match_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Option<Statement> {
    state.bump(); // consume 'match'

    let subject = state.parse_expression(BP_LOWEST)?;
    state.expect(&TokenKind::LBrace, "'{' after the match subject")?;

    let mut cases = Vec::new();
    let mut otherwise: Option<Vec<Statement>> = None;

    while !state.at(&TokenKind::RBrace) && !state.at_end() {
        let clause_start = state.span();
        match state.kind() {
            TokenKind::Keyword(Keyword::Case) => {
                state.bump();
                if otherwise.is_some() {
                    state.error(ParseError::InvalidStatement {
                        reason: "'case' after 'otherwise' can never match".to_string(),
                        span: clause_start,
                    });
                }
                let Some(pattern) = state.parse_literal() else {
                    if state.skip_to(&TokenKind::LBrace) {
                        state.skip_balanced_braces();
                    }
                    continue;
                };
                if let Some(body) = state.parse_block() {
                    cases.push(CaseClause {
                        pattern,
                        body,
                        span: state.span_from(clause_start),
                    });
                }
            }
            TokenKind::Keyword(Keyword::Otherwise) => {
                state.bump();
                if otherwise.is_some() {
                    state.error(ParseError::InvalidStatement {
                        reason: "a match has at most one 'otherwise'".to_string(),
                        span: clause_start,
                    });
                }
                if let Some(body) = state.parse_block() {
                    otherwise.get_or_insert(body);
                }
            }
            TokenKind::LBrace => {
                state.unexpected::<()>("'case' or 'otherwise'");
                state.skip_balanced_braces();
            }
            _ => {
                state.unexpected::<()>("'case', 'otherwise' or '}'");
                state.bump();
            }
        }
    }
    state.expect(&TokenKind::RBrace, "'}' closing the match");

    Some(Statement::Match(MatchStatement {
        subject,
        cases,
        otherwise,
        span: state.span_from(span),
    }))
}

/// Parse `[parallel] for each <item> [at <index>] in Expr [where Expr] [with concurrency: N] { Stmt* }`
pub fn parse_for_each_stmt(
    state: &mut ParserState<'_>,
    span: Span,
) -> Option<Statement> {
    let parallel = state.at_keyword(Keyword::Parallel);
    if parallel {
        state.bump();
    }
    if !state.at_preposition(Preposition::For) {
        return state.unexpected("'for' after 'parallel'");
    }
    state.bump();
    if !state.at_keyword(Keyword::Each) {
        return state.unexpected("'each' after 'for'");
    }
    state.bump();

    let item = parse_loop_variable(state, "loop item")?;

    let index = if state.at_preposition(Preposition::At) {
        state.bump();
        Some(parse_loop_variable(state, "loop index")?)
    } else {
        None
    };

    if !state.at_preposition(Preposition::In) {
        return state.unexpected("'in' before the collection");
    }
    state.bump();
    state.skip_article();
    let collection = state.parse_expression(BP_LOWEST)?;

    let filter = if state.at_keyword(Keyword::Where) {
        state.bump();
        Some(state.parse_expression(BP_LOWEST)?)
    } else {
        None
    };

    let concurrency = if state.at_preposition(Preposition::With) {
        state.bump();
        Some(parse_concurrency(state)?)
    } else {
        None
    };

    let body = state.parse_block()?;

    Some(Statement::ForEach(ForEachStatement {
        item,
        index,
        collection,
        filter,
        parallel,
        concurrency,
        body,
        span: state.span_from(span),
    }))
}

/// `<name>` or a bare identifier
fn parse_loop_variable(
    state: &mut ParserState<'_>,
    what: &str,
) -> Option<Spanned<String>> {
    if state.at(&TokenKind::Lt) {
        let noun = state.parse_qualified_noun()?;
        if !noun.specifiers.is_empty() {
            state.error(ParseError::InvalidQualifiedNoun {
                reason: format!("{} '{}' cannot have specifiers", what, noun),
                span: noun.span,
            });
            return None;
        }
        return Some(Spanned::new(noun.base, noun.span));
    }

    if let TokenKind::Identifier(name) = state.kind() {
        let name = Spanned::new(name.clone(), state.span());
        state.bump();
        return Some(name);
    }

    state.unexpected(what)
}

/// `concurrency: N` after `with`; N is a positive integer
fn parse_concurrency(state: &mut ParserState<'_>) -> Option<u32> {
    let is_concurrency = matches!(
        state.kind(),
        TokenKind::Identifier(name) if name.eq_ignore_ascii_case("concurrency")
    );
    if !is_concurrency {
        return state.unexpected("'concurrency' after 'with'");
    }
    state.bump();
    state.expect(&TokenKind::Colon, "':' after 'concurrency'")?;

    let span = state.span();
    match *state.kind() {
        TokenKind::IntLiteral(n) => {
            state.bump();
            match u32::try_from(n) {
                Ok(bound) if bound > 0 => Some(bound),
                _ => {
                    state.error(ParseError::InvalidStatement {
                        reason: format!("concurrency must be a positive integer, found {}", n),
                        span,
                    });
                    None
                }
            }
        }
        _ => state.unexpected("integer concurrency bound"),
    }
}
