//! Parser tests.
//!
//! - `grammar`: concrete tree shapes, precedence, and syntax errors
//! - `transform`: lowering to the typed AST, spans, and parameter rules

mod grammar;
mod transform;
