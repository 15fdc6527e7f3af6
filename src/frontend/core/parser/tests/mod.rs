//! Parser tests
//!
//! - state: ParserState unit tests
//! - feature_sets: program structure, headers and imports
//! - statements: ARO, Publish, Require, match, for each and pipelines
//! - expressions: precedence and expression forms
//! - recovery: error collection and resynchronization
//! - fuzz: proptest and quickcheck properties

mod feature_sets;
mod recovery;
mod state;

use super::{parse, ParseError, Program};
use crate::frontend::core::lexer::tokenize;

/// Parse source that must be valid
pub(super) fn parse_ok(source: &str) -> Program {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("lex failed: {}", e));
    parse(&tokens).unwrap_or_else(|errors| panic!("parse failed for {:?}: {:?}", source, errors))
}

/// Parse source that must fail, returning every error
pub(super) fn parse_err(source: &str) -> Vec<ParseError> {
    let tokens = tokenize(source).unwrap_or_else(|e| panic!("lex failed: {}", e));
    match parse(&tokens) {
        Ok(program) => panic!("expected parse errors for {:?}, got {:?}", source, program),
        Err(errors) => errors,
    }
}

/// Wrap statements in a single feature set
pub(super) fn body(statements: &str) -> String {
    format!("(Test: Test API) {{\n{}\n}}", statements)
}
