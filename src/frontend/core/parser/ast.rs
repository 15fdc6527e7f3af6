//! Abstract Syntax Tree types
//!
//! Nodes are plain owned data and never change after the parser builds them.

use crate::frontend::core::lexer::tokens::Preposition;
use crate::util::span::Span;
use crate::util::Spanned;
use smallvec::SmallVec;
use std::fmt;

/// Root of a compilation unit
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub imports: Vec<ImportDeclaration>,
    pub feature_sets: Vec<FeatureSet>,
    pub span: Span,
}

impl Program {
    pub fn is_empty(&self) -> bool {
        self.imports.is_empty() && self.feature_sets.is_empty()
    }

    /// Total statement count, nested bodies included
    pub fn statement_count(&self) -> usize {
        fn count(stmts: &[Statement]) -> usize {
            stmts
                .iter()
                .map(|stmt| {
                    1 + match stmt {
                        Statement::Match(m) => {
                            m.cases.iter().map(|c| count(&c.body)).sum::<usize>()
                                + m.otherwise.as_deref().map(count).unwrap_or(0)
                        }
                        Statement::ForEach(f) => count(&f.body),
                        _ => 0,
                    }
                })
                .sum()
        }
        self.feature_sets.iter().map(|fs| count(&fs.statements)).sum()
    }
}

/// `import <path>`
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    pub path: String,
    pub span: Span,
}

/// `(Name: Business Activity) { statements }`
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureSet {
    pub name: String,
    pub business_activity: String,
    pub statements: Vec<Statement>,
    pub span: Span,
}

impl FeatureSet {
    /// Event this feature set handles, by the `"<Event> Handler"` naming convention
    pub fn handled_event(&self) -> Option<&str> {
        let event = self.business_activity.strip_suffix(" Handler")?.trim_end();
        if event.is_empty() {
            None
        } else {
            Some(event)
        }
    }
}

/// Statement
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Aro(AroStatement),
    Publish(PublishStatement),
    Require(RequireStatement),
    Match(MatchStatement),
    ForEach(ForEachStatement),
    Pipeline(PipelineStatement),
}

impl Statement {
    pub fn span(&self) -> Span {
        match self {
            Statement::Aro(s) => s.span,
            Statement::Publish(s) => s.span,
            Statement::Require(s) => s.span,
            Statement::Match(s) => s.span,
            Statement::ForEach(s) => s.span,
            Statement::Pipeline(s) => s.span,
        }
    }

    /// An unguarded `Return` or `Throw`
    pub fn is_terminal(&self) -> bool {
        match self {
            Statement::Aro(aro) => aro.is_terminal(),
            Statement::Pipeline(p) => p.stages.last().map(AroStatement::is_terminal).unwrap_or(false),
            _ => false,
        }
    }

    /// Short label used in reports and logs
    pub fn label(&self) -> String {
        match self {
            Statement::Aro(aro) => aro.label(),
            Statement::Publish(p) => format!("Publish as <{}> <{}>", p.alias, p.variable),
            Statement::Require(r) => format!("Require <{}>", r.variable),
            Statement::Match(_) => "match".to_string(),
            Statement::ForEach(f) => f.label(),
            Statement::Pipeline(p) => p
                .stages
                .iter()
                .map(AroStatement::label)
                .collect::<Vec<_>>()
                .join(" |> "),
        }
    }
}

/// Semantic role of an action verb
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionRole {
    /// Pulls data in from outside the feature set
    Request,
    /// Computes a new local value
    Own,
    /// Sends data out
    Response,
    /// Makes a binding visible to other feature sets
    Export,
}

impl ActionRole {
    /// Classify a verb. Matching ignores case.
    pub fn from_verb(verb: &str) -> Self {
        match verb.to_lowercase().as_str() {
            "extract" | "parse" | "retrieve" | "fetch" | "read" | "receive" | "get" | "load"
            | "request" | "query" | "listen" => ActionRole::Request,
            "return" | "throw" | "send" | "emit" | "respond" | "output" | "write" | "log"
            | "print" | "store" | "save" | "persist" | "notify" | "delete" | "remove"
            | "broadcast" | "reply" => ActionRole::Response,
            "publish" | "export" | "expose" | "share" => ActionRole::Export,
            _ => ActionRole::Own,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionRole::Request => "request",
            ActionRole::Own => "own",
            ActionRole::Response => "response",
            ActionRole::Export => "export",
        }
    }
}

impl fmt::Display for ActionRole {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The verb heading a statement
#[derive(Debug, Clone, PartialEq)]
pub struct Action {
    pub verb: String,
    pub role: ActionRole,
    pub span: Span,
}

impl Action {
    pub fn new(
        verb: impl Into<String>,
        span: Span,
    ) -> Self {
        let verb = verb.into();
        let role = ActionRole::from_verb(&verb);
        Self { verb, role, span }
    }

    /// Case-insensitive verb comparison
    pub fn is(
        &self,
        verb: &str,
    ) -> bool {
        self.verb.eq_ignore_ascii_case(verb)
    }
}

/// `<base: spec1.spec2>`
#[derive(Debug, Clone, PartialEq)]
pub struct QualifiedNoun {
    pub base: String,
    pub specifiers: SmallVec<[String; 2]>,
    pub span: Span,
}

impl QualifiedNoun {
    pub fn new(
        base: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            base: base.into(),
            specifiers: SmallVec::new(),
            span,
        }
    }

    pub fn with_specifiers<I, S>(
        mut self,
        specifiers: I,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.specifiers = specifiers.into_iter().map(Into::into).collect();
        self
    }

    /// First specifier; drives data type inference
    pub fn type_specifier(&self) -> Option<&str> {
        self.specifiers.first().map(String::as_str)
    }
}

impl fmt::Display for QualifiedNoun {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(&self.base)?;
        if !self.specifiers.is_empty() {
            write!(f, ": {}", self.specifiers.join("."))?;
        }
        Ok(())
    }
}

/// `from the <request: body>`
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectClause {
    pub preposition: Preposition,
    pub noun: QualifiedNoun,
    pub span: Span,
}

/// `Action [article] <Result> { Preposition [article] Operand } [when Guard].`
///
/// `result` is `None` for value-first statements such as `Log "x" to <console>.`,
/// where the leading value is kept in `value`.
#[derive(Debug, Clone, PartialEq)]
pub struct AroStatement {
    pub action: Action,
    pub result: Option<QualifiedNoun>,
    pub object: Option<ObjectClause>,
    pub value: Option<Expression>,
    pub guard: Option<Expression>,
    pub span: Span,
}

impl AroStatement {
    pub fn is_terminal(&self) -> bool {
        self.guard.is_none() && (self.action.is("return") || self.action.is("throw"))
    }

    pub fn label(&self) -> String {
        match &self.result {
            Some(result) => format!("{} <{}>", self.action.verb, result),
            None => self.action.verb.clone(),
        }
    }
}

/// `Publish as <alias> <variable>.`
#[derive(Debug, Clone, PartialEq)]
pub struct PublishStatement {
    pub alias: QualifiedNoun,
    pub variable: QualifiedNoun,
    pub span: Span,
}

/// `Require <name> from <source>.`
#[derive(Debug, Clone, PartialEq)]
pub struct RequireStatement {
    pub variable: QualifiedNoun,
    pub source: Option<String>,
    pub span: Span,
}

/// `match <subject> { case ... otherwise ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct MatchStatement {
    pub subject: Expression,
    pub cases: Vec<CaseClause>,
    pub otherwise: Option<Vec<Statement>>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CaseClause {
    pub pattern: Literal,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// `[parallel] for each <item> [at <index>] in <collection> [where ...] [with concurrency: N] { ... }`
#[derive(Debug, Clone, PartialEq)]
pub struct ForEachStatement {
    pub item: Spanned<String>,
    pub index: Option<Spanned<String>>,
    pub collection: Expression,
    pub filter: Option<Expression>,
    pub parallel: bool,
    pub concurrency: Option<u32>,
    pub body: Vec<Statement>,
    pub span: Span,
}

impl ForEachStatement {
    pub fn label(&self) -> String {
        if self.parallel {
            format!("parallel for each <{}>", *self.item)
        } else {
            format!("for each <{}>", *self.item)
        }
    }
}

/// Stages joined by `|>`; each stage feeds the next
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineStatement {
    pub stages: Vec<AroStatement>,
    pub span: Span,
}

/// Literal value
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    String(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Nil,
    Regex { pattern: String, flags: String },
}

impl fmt::Display for Literal {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Literal::String(s) => write!(f, "{:?}", s),
            Literal::Int(n) => write!(f, "{}", n),
            Literal::Float(n) => write!(f, "{}", n),
            Literal::Bool(b) => write!(f, "{}", b),
            Literal::Nil => f.write_str("nil"),
            Literal::Regex { pattern, flags } => write!(f, "/{}/{}", pattern, flags),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    Contains,
    Matches,
    Add,
    Sub,
    Concat,
    Mul,
    Div,
    Mod,
}

impl BinaryOp {
    pub fn as_str(&self) -> &'static str {
        match self {
            BinaryOp::Or => "or",
            BinaryOp::And => "and",
            BinaryOp::Eq => "==",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Contains => "contains",
            BinaryOp::Matches => "matches",
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Concat => "++",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Mod => "%",
        }
    }
}

/// Unary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

/// Piece of an interpolated string
#[derive(Debug, Clone, PartialEq)]
pub enum InterpolationPart {
    Text(String),
    Expr(Expression),
}

/// Expression
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Literal(Literal, Span),
    Array(Vec<Expression>, Span),
    Map(Vec<(String, Expression)>, Span),
    Variable(QualifiedNoun),
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
        span: Span,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
        span: Span,
    },
    Member {
        object: Box<Expression>,
        member: String,
        span: Span,
    },
    Subscript {
        object: Box<Expression>,
        index: Box<Expression>,
        span: Span,
    },
    Grouped(Box<Expression>, Span),
    /// `<x> exists`
    Exists(Box<Expression>, Span),
    /// `<x> is Type`
    TypeCheck {
        expr: Box<Expression>,
        type_name: String,
        span: Span,
    },
    Interpolated(Vec<InterpolationPart>, Span),
}

impl Expression {
    pub fn span(&self) -> Span {
        match self {
            Expression::Literal(_, span)
            | Expression::Array(_, span)
            | Expression::Map(_, span)
            | Expression::Grouped(_, span)
            | Expression::Exists(_, span)
            | Expression::Interpolated(_, span) => *span,
            Expression::Variable(noun) => noun.span,
            Expression::Binary { span, .. }
            | Expression::Unary { span, .. }
            | Expression::Member { span, .. }
            | Expression::Subscript { span, .. }
            | Expression::TypeCheck { span, .. } => *span,
        }
    }

    /// The noun when this expression is a bare variable reference
    pub fn as_noun(&self) -> Option<&QualifiedNoun> {
        match self {
            Expression::Variable(noun) => Some(noun),
            _ => None,
        }
    }
}
