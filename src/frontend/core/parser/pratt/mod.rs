//! Pratt parser implementation
//! Handles expression parsing with binding power

pub mod led;
pub mod nud;
pub mod precedence;

pub use led::*;
pub use nud::*;
pub use precedence::*;

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::ParserState;

impl ParserState<'_> {
    /// Parse an expression whose operators bind at least as tightly as `min_bp`
    pub fn parse_expression(
        &mut self,
        min_bp: u8,
    ) -> Option<Expression> {
        let mut left = self.parse_prefix()?;

        while let Some((left_bp, _, _)) = self.infix_info() {
            if left_bp < min_bp {
                break;
            }
            left = self.parse_infix(left, left_bp)?;
        }

        Some(left)
    }
}
