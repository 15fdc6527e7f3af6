//! Statement parsing modules
//!
//! - feature_set: top level (imports and feature set headers)
//! - aro: ARO statements and pipelines
//! - scoping: Publish and Require
//! - control_flow: match and for each

pub mod aro;
pub mod control_flow;
pub mod feature_set;
pub mod scoping;

pub use aro::*;
pub use control_flow::*;
pub use feature_set::*;
pub use scoping::*;

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::ParserState;

/// Statement parsing trait
pub trait StatementParser {
    /// Parse one statement. `None` means an error was recorded and the
    /// caller should resynchronize.
    fn parse_statement(&mut self) -> Option<Statement>;

    /// Parse `{ Statement* }`
    fn parse_block(&mut self) -> Option<Vec<Statement>>;
}

impl StatementParser for ParserState<'_> {
    fn parse_statement(&mut self) -> Option<Statement> {
        let start_span = self.span();

        match self.kind() {
            TokenKind::Keyword(Keyword::Publish)
                if matches!(self.peek_kind(1), TokenKind::Keyword(Keyword::As)) =>
            {
                scoping::parse_publish_stmt(self, start_span)
            }
            TokenKind::Keyword(Keyword::Require) => scoping::parse_require_stmt(self, start_span),
            TokenKind::Keyword(Keyword::Match) => control_flow::parse_match_stmt(self, start_span),
            TokenKind::Keyword(Keyword::Parallel) => {
                control_flow::parse_for_each_stmt(self, start_span)
            }
            TokenKind::Preposition(Preposition::For)
                if matches!(self.peek_kind(1), TokenKind::Keyword(Keyword::Each)) =>
            {
                control_flow::parse_for_each_stmt(self, start_span)
            }
            TokenKind::Identifier(_) | TokenKind::Lt | TokenKind::Keyword(Keyword::Publish) => {
                aro::parse_aro_or_pipeline_stmt(self, start_span)
            }
            _ => self.unexpected("statement"),
        }
    }

    fn parse_block(&mut self) -> Option<Vec<Statement>> {
        self.expect(&TokenKind::LBrace, "'{'")?;

        let mut statements = Vec::new();
        while !self.at(&TokenKind::RBrace) && !self.at_end() {
            match self.parse_statement() {
                Some(stmt) => {
                    tracing::trace!("parsed statement: {}", stmt.label());
                    statements.push(stmt);
                }
                None => self.synchronize(),
            }
        }

        self.expect(&TokenKind::RBrace, "'}'");
        Some(statements)
    }
}
