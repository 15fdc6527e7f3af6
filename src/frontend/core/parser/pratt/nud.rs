//! Prefix expression parsing (nud - null denotation)

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::pratt::precedence::*;
use crate::frontend::core::parser::{ParseError, ParserState};
use smallvec::SmallVec;

/// Extension trait for prefix parsing
pub trait PrefixParser {
    /// Parse prefix expression at current position
    fn parse_prefix(&mut self) -> Option<Expression>;
}

impl<'a> PrefixParser for ParserState<'a> {
    fn parse_prefix(&mut self) -> Option<Expression> {
        match self.prefix_info() {
            Some((_bp, parser_fn)) => parser_fn(self),
            None => self.unexpected("expression"),
        }
    }
}

impl<'a> ParserState<'a> {
    /// Get prefix binding power and parser for current token
    #[inline]
    #[allow(clippy::type_complexity)]
    pub(crate) fn prefix_info(&self) -> Option<(u8, fn(&mut Self) -> Option<Expression>)> {
        match self.kind() {
            TokenKind::Minus | TokenKind::Keyword(Keyword::Not) => {
                Some((BP_UNARY, Self::parse_unary))
            }
            TokenKind::IntLiteral(_)
            | TokenKind::FloatLiteral(_)
            | TokenKind::StringLiteral(_)
            | TokenKind::BoolLiteral(_)
            | TokenKind::NilLiteral
            | TokenKind::RegexLiteral { .. } => Some((BP_POSTFIX, Self::parse_literal_expr)),
            TokenKind::StringSegment(_) => Some((BP_POSTFIX, Self::parse_interpolated)),
            TokenKind::Lt => Some((BP_POSTFIX, Self::parse_noun_expr)),
            TokenKind::Identifier(_) => Some((BP_POSTFIX, Self::parse_bare_variable)),
            TokenKind::LParen => Some((BP_POSTFIX, Self::parse_grouped)),
            TokenKind::LBracket => Some((BP_POSTFIX, Self::parse_array)),
            TokenKind::LBrace => Some((BP_POSTFIX, Self::parse_map)),
            _ => None,
        }
    }

    /// `- expr` or `not expr`
    fn parse_unary(&mut self) -> Option<Expression> {
        let start = self.span();
        let op = match self.kind() {
            TokenKind::Minus => UnaryOp::Neg,
            _ => UnaryOp::Not,
        };
        self.bump();

        let operand = self.parse_expression(BP_UNARY)?;

        Some(Expression::Unary {
            op,
            operand: Box::new(operand),
            span: self.span_from(start),
        })
    }

    fn parse_literal_expr(&mut self) -> Option<Expression> {
        let span = self.span();
        let literal = self.parse_literal()?;
        Some(Expression::Literal(literal, span))
    }

    /// A single literal token: string, number, boolean, nil or regex
    pub fn parse_literal(&mut self) -> Option<Literal> {
        let literal = match self.kind() {
            TokenKind::StringLiteral(s) => Literal::String(s.clone()),
            TokenKind::IntLiteral(n) => Literal::Int(*n),
            TokenKind::FloatLiteral(n) => Literal::Float(*n),
            TokenKind::BoolLiteral(b) => Literal::Bool(*b),
            TokenKind::NilLiteral => Literal::Nil,
            TokenKind::RegexLiteral { pattern, flags } => Literal::Regex {
                pattern: pattern.clone(),
                flags: flags.clone(),
            },
            _ => return self.unexpected("literal"),
        };
        self.bump();
        Some(literal)
    }

    /// `"text ${expr} text"`; the lexer brackets each expression with sentinels
    fn parse_interpolated(&mut self) -> Option<Expression> {
        let start = self.span();
        let mut parts = Vec::new();

        loop {
            match self.kind() {
                TokenKind::StringSegment(text) => {
                    if !text.is_empty() {
                        parts.push(InterpolationPart::Text(text.clone()));
                    }
                    self.bump();
                }
                _ => return self.unexpected("string segment"),
            }

            if !self.skip(&TokenKind::InterpolationStart) {
                break;
            }
            let expr = self.parse_expression(BP_LOWEST)?;
            parts.push(InterpolationPart::Expr(expr));
            self.expect(&TokenKind::InterpolationEnd, "'}' closing the interpolation")?;
        }

        Some(Expression::Interpolated(parts, self.span_from(start)))
    }

    fn parse_noun_expr(&mut self) -> Option<Expression> {
        self.parse_qualified_noun().map(Expression::Variable)
    }

    /// A bare identifier in expression position names a variable
    fn parse_bare_variable(&mut self) -> Option<Expression> {
        let token = self.bump()?;
        if let TokenKind::Identifier(name) = token.kind {
            Some(Expression::Variable(QualifiedNoun::new(name, token.span)))
        } else {
            None
        }
    }

    /// `( expr )`
    fn parse_grouped(&mut self) -> Option<Expression> {
        let start = self.span();
        self.bump();
        let inner = self.parse_expression(BP_LOWEST)?;
        self.expect(&TokenKind::RParen, "')'")?;
        Some(Expression::Grouped(Box::new(inner), self.span_from(start)))
    }

    /// `[a, b, c]`, trailing comma allowed
    fn parse_array(&mut self) -> Option<Expression> {
        let start = self.span();
        self.bump();

        let mut elements = Vec::new();
        while !self.at(&TokenKind::RBracket) {
            elements.push(self.parse_expression(BP_LOWEST)?);
            if !self.skip(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket, "']' or ','")?;

        Some(Expression::Array(elements, self.span_from(start)))
    }

    /// `{ key: value, "other key": value }`, trailing comma allowed
    fn parse_map(&mut self) -> Option<Expression> {
        let start = self.span();
        self.bump();

        let mut entries = Vec::new();
        while !self.at(&TokenKind::RBrace) {
            let key = match self.kind() {
                TokenKind::StringLiteral(s) => s.clone(),
                kind if kind.is_word() => self.current().map(|t| t.lexeme.clone())?,
                _ => return self.unexpected("map key"),
            };
            self.bump();
            self.expect(&TokenKind::Colon, "':' after map key")?;
            let value = self.parse_expression(BP_LOWEST)?;
            entries.push((key, value));
            if !self.skip(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace, "'}' or ','")?;

        Some(Expression::Map(entries, self.span_from(start)))
    }

    /// `<base>` or `<base: spec1.spec2>`
    pub fn parse_qualified_noun(&mut self) -> Option<QualifiedNoun> {
        let start = self.span();
        self.expect(&TokenKind::Lt, "'<'")?;

        let base = match self.noun_segment() {
            Some(base) => base,
            None => {
                self.error(ParseError::InvalidQualifiedNoun {
                    reason: "expected a name after '<'".to_string(),
                    span: self.span(),
                });
                return None;
            }
        };

        let mut specifiers: SmallVec<[String; 2]> = SmallVec::new();
        if self.skip(&TokenKind::Colon) {
            loop {
                match self.noun_segment() {
                    Some(spec) => specifiers.push(spec),
                    None => {
                        self.error(ParseError::InvalidQualifiedNoun {
                            reason: format!("expected a specifier for '{}'", base),
                            span: self.span(),
                        });
                        return None;
                    }
                }
                if !self.skip(&TokenKind::Dot) {
                    break;
                }
            }
        }

        if !self.skip(&TokenKind::Gt) {
            self.error(ParseError::InvalidQualifiedNoun {
                reason: format!("missing '>' after '{}'", base),
                span: self.span(),
            });
            return None;
        }

        Some(QualifiedNoun {
            base,
            specifiers,
            span: self.span_from(start),
        })
    }

    /// One word (or number) inside a noun; consumed on success
    fn noun_segment(&mut self) -> Option<String> {
        let token = self.current()?;
        let segment = match &token.kind {
            TokenKind::Identifier(name) => name.clone(),
            kind if kind.is_word() => token.lexeme.clone(),
            TokenKind::IntLiteral(_) | TokenKind::BoolLiteral(_) | TokenKind::NilLiteral => {
                token.lexeme.clone()
            }
            _ => return None,
        };
        self.bump();
        Some(segment)
    }
}
