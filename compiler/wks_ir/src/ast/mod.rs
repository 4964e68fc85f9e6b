//! Typed AST.
//!
//! Every node carries the [`Span`] of the token that defines it. Statements
//! execute for effect and may produce a control signal; expressions always
//! produce a value.

mod operators;

use std::sync::Arc;

use crate::Span;

pub use operators::{AssignOp, BinaryOp, LogicalOp, UnaryOp};

/// A statement node.
#[derive(Clone, Debug, PartialEq)]
pub struct Statement {
    pub kind: StatementKind,
    pub span: Span,
}

impl Statement {
    pub fn new(kind: StatementKind, span: Span) -> Self {
        Statement { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum StatementKind {
    /// `expr;`
    Expression(Expression),
    /// `name op= value;`
    SetVariable {
        name: String,
        op: AssignOp,
        value: Expression,
    },
    /// `object.property op= value;`
    SetProperty {
        object: Expression,
        property: String,
        op: AssignOp,
        value: Expression,
    },
    /// `object[index] op= value;`
    SetItem {
        object: Expression,
        index: Expression,
        op: AssignOp,
        value: Expression,
    },
    /// `a, b = value;`
    Unpack {
        names: Vec<String>,
        value: Expression,
    },
    /// `del name;`
    DeleteVariable { name: String },
    /// `del object[index];`
    DeleteItem {
        object: Expression,
        index: Expression,
    },
    /// `if c: ... elif c: ... else: ... end`
    If {
        branches: Vec<(Expression, Vec<Statement>)>,
        else_body: Option<Vec<Statement>>,
    },
    /// `for target in iterable: ... end`
    For {
        target: LoopTarget,
        iterable: Expression,
        body: Vec<Statement>,
    },
    /// `while condition: ... end`
    While {
        condition: Expression,
        body: Vec<Statement>,
    },
    /// `try: ... except ...: ... end`
    Try {
        body: Vec<Statement>,
        handlers: Vec<ExceptHandler>,
    },
    /// `raise value;`
    Raise(Expression),
    Break,
    Continue,
    /// `return;` or `return value;`
    Return(Option<Expression>),
    /// `def name(...): ... end`
    FunctionDef(Arc<FunctionDecl>),
}

/// Loop variable(s) of a `for` statement.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoopTarget {
    Single(String),
    Unpack(Vec<String>),
}

/// One `except` clause.
#[derive(Clone, Debug, PartialEq)]
pub struct ExceptHandler {
    /// Exception-class expressions; empty for a bare `except:`.
    pub types: Vec<Expression>,
    /// Name bound to the exception message.
    pub name: Option<String>,
    pub body: Vec<Statement>,
    pub span: Span,
}

/// Shared declaration behind both `def` statements and anonymous functions.
///
/// Held behind an `Arc` so function values can reference their body
/// without copying statements on every definition.
#[derive(Clone, Debug, PartialEq)]
pub struct FunctionDecl {
    /// `None` for anonymous functions.
    pub name: Option<String>,
    pub params: Vec<Param>,
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ParamKind {
    Positional,
    /// `name = default`
    Default(Expression),
    /// `*name`
    Variadic,
}

/// An expression node.
#[derive(Clone, Debug, PartialEq)]
pub struct Expression {
    pub kind: ExpressionKind,
    pub span: Span,
}

impl Expression {
    pub fn new(kind: ExpressionKind, span: Span) -> Self {
        Expression { kind, span }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExpressionKind {
    Literal(Literal),
    Variable(String),
    GetProperty {
        object: Box<Expression>,
        property: String,
    },
    GetItem {
        object: Box<Expression>,
        index: Box<Expression>,
    },
    /// `start:end:step` inside brackets; absent parts are `None`.
    Slice {
        start: Option<Box<Expression>>,
        end: Option<Box<Expression>>,
        step: Option<Box<Expression>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expression>,
    },
    Binary {
        op: BinaryOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Logical {
        op: LogicalOp,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    /// `condition ? then : otherwise`
    IfElse {
        condition: Box<Expression>,
        then: Box<Expression>,
        otherwise: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        args: Vec<Expression>,
        kwargs: Vec<(String, Expression)>,
    },
    List(Vec<Expression>),
    Tuple(Vec<Expression>),
    Set(Vec<Expression>),
    Dict(Vec<(Expression, Expression)>),
    /// `def (...): ... end` in expression position.
    Lambda(Arc<FunctionDecl>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Literal {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}
