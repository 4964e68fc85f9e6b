//! Parser for WikiScript.
//!
//! Two stages: [`parse`] runs the grammar over the token stream and yields a
//! concrete syntax tree; [`Transformer`] lowers that tree to the typed AST.
//! [`parse_module`] does both. Every failure on the way, lexical or
//! grammatical, is reported as one [`ParseError`] with a line and column.

mod cst;
mod cursor;
mod error;
mod grammar;
mod transform;

pub use cst::{SyntaxElement, SyntaxKind, SyntaxNode};
pub use error::{ParseError, ParseErrorKind};
pub use transform::Transformer;

use grammar::Parser;
use wks_ir::Statement;

/// Parse source into a concrete syntax tree (start rule: `module`).
#[tracing::instrument(level = "debug", skip(source), fields(len = source.len()))]
pub fn parse(source: &str) -> Result<SyntaxNode, ParseError> {
    let tokens = wks_lexer::lex(source)?;
    Parser::new(tokens).parse_module()
}

/// Parse source all the way to the typed AST.
pub fn parse_module(source: &str) -> Result<Vec<Statement>, ParseError> {
    let tree = parse(source)?;
    Transformer.module(&tree)
}

#[cfg(test)]
mod tests;
