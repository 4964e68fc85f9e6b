//! WikiScript IR - positions, operators, and the typed AST.
//!
//! The parser produces a concrete syntax tree; the transformer in
//! `wks_parse` lowers it into the types defined here. The evaluator in
//! `wks_eval` walks them directly.

pub mod ast;
mod span;

pub use ast::{
    AssignOp, BinaryOp, ExceptHandler, Expression, ExpressionKind, FunctionDecl, Literal,
    LogicalOp, LoopTarget, Param, ParamKind, Statement, StatementKind, UnaryOp,
};
pub use span::Span;
