//! Infix and postfix expression parsing (led - left denotation)

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::pratt::precedence::*;
use crate::frontend::core::parser::ParserState;

/// Extension trait for infix parsing
pub trait InfixParser {
    /// Parse infix expression with given left binding power
    fn parse_infix(
        &mut self,
        lhs: Expression,
        bp: u8,
    ) -> Option<Expression>;
}

impl<'a> InfixParser for ParserState<'a> {
    fn parse_infix(
        &mut self,
        lhs: Expression,
        _bp: u8,
    ) -> Option<Expression> {
        match self.infix_info() {
            Some((_left_bp, right_bp, parser_fn)) => parser_fn(self, lhs, right_bp),
            None => Some(lhs),
        }
    }
}

impl<'a> ParserState<'a> {
    /// Get left/right binding power and parser for the current token, if it
    /// continues an expression
    #[inline]
    #[allow(clippy::type_complexity)]
    pub(crate) fn infix_info(
        &self,
    ) -> Option<(u8, u8, fn(&mut Self, Expression, u8) -> Option<Expression>)> {
        match self.kind() {
            TokenKind::Keyword(Keyword::Or) => Some((BP_OR, BP_OR + 1, Self::parse_binary)),
            TokenKind::Keyword(Keyword::And) => Some((BP_AND, BP_AND + 1, Self::parse_binary)),
            TokenKind::EqEq
            | TokenKind::Neq
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge
            | TokenKind::Keyword(Keyword::Contains)
            | TokenKind::Keyword(Keyword::Matches) => {
                Some((BP_COMPARISON, BP_COMPARISON + 1, Self::parse_binary))
            }
            TokenKind::Plus | TokenKind::Minus | TokenKind::PlusPlus => {
                Some((BP_ADDITIVE, BP_ADDITIVE + 1, Self::parse_binary))
            }
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
                Some((BP_MULTIPLICATIVE, BP_MULTIPLICATIVE + 1, Self::parse_binary))
            }
            // a member dot touches both neighbours; a spaced or trailing dot ends the statement
            TokenKind::Dot
                if self.touches_previous()
                    && self.touches_next()
                    && self.peek().map(|t| t.kind.is_word()).unwrap_or(false) =>
            {
                Some((BP_POSTFIX, BP_POSTFIX, Self::parse_member))
            }
            TokenKind::LBracket => Some((BP_POSTFIX, BP_POSTFIX, Self::parse_subscript)),
            TokenKind::Keyword(Keyword::Exists) => {
                Some((BP_POSTFIX, BP_POSTFIX, Self::parse_exists))
            }
            TokenKind::Keyword(Keyword::Is) => {
                Some((BP_POSTFIX, BP_POSTFIX, Self::parse_type_check))
            }
            _ => None,
        }
    }

    fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
        Some(match kind {
            TokenKind::Keyword(Keyword::Or) => BinaryOp::Or,
            TokenKind::Keyword(Keyword::And) => BinaryOp::And,
            TokenKind::EqEq => BinaryOp::Eq,
            TokenKind::Neq => BinaryOp::Neq,
            TokenKind::Lt => BinaryOp::Lt,
            TokenKind::Le => BinaryOp::Le,
            TokenKind::Gt => BinaryOp::Gt,
            TokenKind::Ge => BinaryOp::Ge,
            TokenKind::Keyword(Keyword::Contains) => BinaryOp::Contains,
            TokenKind::Keyword(Keyword::Matches) => BinaryOp::Matches,
            TokenKind::Plus => BinaryOp::Add,
            TokenKind::Minus => BinaryOp::Sub,
            TokenKind::PlusPlus => BinaryOp::Concat,
            TokenKind::Star => BinaryOp::Mul,
            TokenKind::Slash => BinaryOp::Div,
            TokenKind::Percent => BinaryOp::Mod,
            _ => return None,
        })
    }

    /// Left-associative binary operator; `right_bp` is one above the operator's level
    fn parse_binary(
        &mut self,
        lhs: Expression,
        right_bp: u8,
    ) -> Option<Expression> {
        let op = Self::binary_op(self.kind())?;
        self.bump();

        let rhs = self.parse_expression(right_bp)?;
        let span = lhs.span().merge(rhs.span());

        Some(Expression::Binary {
            op,
            left: Box::new(lhs),
            right: Box::new(rhs),
            span,
        })
    }

    /// `<user>.name`
    fn parse_member(
        &mut self,
        lhs: Expression,
        _bp: u8,
    ) -> Option<Expression> {
        self.bump();
        let member = self.bump()?.lexeme;
        let span = lhs.span().merge(self.last_span());
        Some(Expression::Member {
            object: Box::new(lhs),
            member,
            span,
        })
    }

    /// `<items>[0]`
    fn parse_subscript(
        &mut self,
        lhs: Expression,
        _bp: u8,
    ) -> Option<Expression> {
        self.bump();
        let index = self.parse_expression(BP_LOWEST)?;
        self.expect(&TokenKind::RBracket, "']'")?;
        let span = lhs.span().merge(self.last_span());
        Some(Expression::Subscript {
            object: Box::new(lhs),
            index: Box::new(index),
            span,
        })
    }

    /// `<x> exists`
    fn parse_exists(
        &mut self,
        lhs: Expression,
        _bp: u8,
    ) -> Option<Expression> {
        self.bump();
        let span = lhs.span().merge(self.last_span());
        Some(Expression::Exists(Box::new(lhs), span))
    }

    /// `<x> is Type`
    fn parse_type_check(
        &mut self,
        lhs: Expression,
        _bp: u8,
    ) -> Option<Expression> {
        self.bump();
        if !self.kind().is_word() {
            return self.unexpected("type name after 'is'");
        }
        let type_name = self.bump()?.lexeme;
        let span = lhs.span().merge(self.last_span());
        Some(Expression::TypeCheck {
            expr: Box::new(lhs),
            type_name,
            span,
        })
    }
}
