//! Parser module
//!
//! Recursive descent for statements and feature sets, Pratt parsing for
//! expressions. Statement-level errors are recovered locally so one pass
//! reports every independent syntax error.

pub mod ast;
pub mod parser_state;
pub mod pratt;
pub mod statements;
#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use ast::*;
pub use parser_state::{ParseError, ParserState};
pub use pratt::*;
pub use statements::StatementParser;

pub use crate::frontend::core::lexer::tokens::*;
pub use crate::util::span::Span;

/// Parse tokens into a Program
///
/// # Arguments
/// * `tokens` - Token stream from the lexer, ending in `Eof`
///
/// # Returns
/// The program, or every parse error found
///
/// # Example
/// ```aro
/// (Greet User: User API) {
///     Extract the <name> from the <request: body>.
///     Return an <OK: status> with <name>.
/// }
/// ```
pub fn parse(tokens: &[Token]) -> Result<Program, Vec<ParseError>> {
    let mut state = ParserState::new(tokens);
    let program = statements::parse_program(&mut state);

    if state.has_errors() {
        tracing::debug!("parsing failed with {} errors", state.errors().len());
        Err(state.into_errors())
    } else {
        tracing::debug!("parsed {} feature sets", program.feature_sets.len());
        Ok(program)
    }
}

/// Parse a single expression; the whole token stream must be consumed
pub fn parse_expression(tokens: &[Token]) -> Result<Expression, Vec<ParseError>> {
    let mut state = ParserState::new(tokens);
    let expr = state.parse_expression(BP_LOWEST);

    if expr.is_some() && !state.at_end() {
        state.unexpected::<()>("end of expression");
    }

    match expr {
        Some(expr) if !state.has_errors() => Ok(expr),
        _ => Err(state.into_errors()),
    }
}
