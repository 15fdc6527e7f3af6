//! Top-level parsing: imports and feature sets

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::statements::StatementParser;
use crate::frontend::core::parser::{ParseError, ParserState};

/// Parse a whole program. Errors are recorded on `state`.
pub fn parse_program(state: &mut ParserState<'_>) -> Program {
    let start = state.span();
    let mut program = Program::default();

    while !state.at_end() {
        match state.kind() {
            TokenKind::Keyword(Keyword::Import) => {
                if let Some(import) = parse_import(state) {
                    program.imports.push(import);
                }
            }
            TokenKind::LParen => {
                if let Some(feature_set) = parse_feature_set(state) {
                    tracing::debug!(
                        "parsed feature set '{}' ({} statements)",
                        feature_set.name,
                        feature_set.statements.len()
                    );
                    program.feature_sets.push(feature_set);
                }
            }
            _ => {
                state.unexpected::<()>("feature set or import");
                state.bump();
                state.skip_to_feature_set();
            }
        }
    }

    program.span = state.span_from(start);
    program
}

/// `import <path>`: a string literal, or every token up to the end of the line
pub fn parse_import(state: &mut ParserState<'_>) -> Option<ImportDeclaration> {
    let start = state.span();
    let line = start.start.line;
    state.bump(); // consume 'import'

    if let TokenKind::StringLiteral(path) = state.kind() {
        let path = path.clone();
        state.bump();
        return Some(ImportDeclaration {
            path,
            span: state.span_from(start),
        });
    }

    let mut path = String::new();
    while let Some(token) = state.current() {
        if token.kind == TokenKind::Eof || token.span.start.line != line {
            break;
        }
        path.push_str(&token.lexeme);
        state.bump();
    }

    if path.is_empty() {
        return state.unexpected("import path");
    }

    Some(ImportDeclaration {
        path,
        span: state.span_from(start),
    })
}

/// `( Name : Business Activity ) { Statement+ }`
pub fn parse_feature_set(state: &mut ParserState<'_>) -> Option<FeatureSet> {
    let start = state.span();
    state.bump(); // consume '('

    let name = parse_header_words(state);
    if name.is_empty() {
        state.error(ParseError::MissingFeatureSetName { span: state.span() });
        state.skip_feature_set();
        return None;
    }

    if !state.skip(&TokenKind::Colon) {
        state.error(ParseError::MissingBusinessActivity {
            name,
            span: state.span(),
        });
        state.skip_feature_set();
        return None;
    }

    let business_activity = parse_header_words(state);
    if business_activity.is_empty() {
        state.error(ParseError::MissingBusinessActivity {
            name,
            span: state.span(),
        });
        state.skip_feature_set();
        return None;
    }

    if state.expect(&TokenKind::RParen, "')' closing the feature set header").is_none() {
        state.skip_feature_set();
        return None;
    }

    if !state.at(&TokenKind::LBrace) {
        state.unexpected::<()>("'{' opening the feature set body");
        state.skip_feature_set();
        return None;
    }

    if matches!(state.peek_kind(1), TokenKind::RBrace) {
        state.bump();
        state.bump();
        state.error(ParseError::EmptyFeatureSet {
            name,
            span: state.span_from(start),
        });
        return None;
    }

    let statements = state.parse_block()?;

    Some(FeatureSet {
        name,
        business_activity,
        statements,
        span: state.span_from(start),
    })
}

/// Word tokens (and numbers) joined by single spaces
fn parse_header_words(state: &mut ParserState<'_>) -> String {
    let mut words: Vec<String> = Vec::new();
    while let Some(token) = state.current() {
        let is_header_word = token.kind.is_word()
            || matches!(token.kind, TokenKind::IntLiteral(_) | TokenKind::FloatLiteral(_));
        if !is_header_word {
            break;
        }
        words.push(token.lexeme.clone());
        state.bump();
    }
    words.join(" ")
}

