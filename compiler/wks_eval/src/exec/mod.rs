//! Statement and expression evaluation, organised by category:
//!
//! - `stmt`: statements, blocks, loops, try/except
//! - `expr`: expressions, literals, indexing
//! - `call`: calling functions, built-ins, methods and exception classes
//! - `assign`: assignment, compound assignment, unpacking
//!
//! Everything here is an `impl` block on [`Evaluator`](crate::Evaluator).

mod assign;
mod call;
mod expr;
mod stmt;

pub(crate) use assign::{unpack, unpack_pair};
pub use expr::{delete_item, get_item, set_item};

use crate::errors::EvalError;
use crate::Value;

/// Result of executing one statement.
///
/// Loops consume `Break` and `Continue`; function bodies consume
/// `Return`. Anything reaching a boundary that does not consume it is an
/// error.
#[derive(Clone, Debug, PartialEq)]
pub enum Signal {
    None,
    Break,
    Continue,
    Return(Value),
}

impl Signal {
    /// Statement keyword that produced the signal.
    pub fn keyword(&self) -> &'static str {
        match self {
            Signal::None => "",
            Signal::Break => "break",
            Signal::Continue => "continue",
            Signal::Return(_) => "return",
        }
    }
}

pub type ExecResult = Result<Signal, EvalError>;
