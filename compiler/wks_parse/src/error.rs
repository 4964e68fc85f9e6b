//! Parse error types.
//!
//! Every failure at the parser boundary (lexing, grammar mismatch,
//! malformed concrete tree) surfaces as one [`ParseError`] carrying the
//! line/column of the offending token.

use thiserror::Error;
use wks_ir::Span;
use wks_lexer::LexError;

#[derive(Clone, Debug, PartialEq, Error)]
#[error("SyntaxError: {kind} ({span})")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseErrorKind {
    #[error("{0}")]
    Lex(wks_lexer::LexErrorKind),
    #[error("unexpected {found}, expected {expected}")]
    UnexpectedToken { found: String, expected: String },
    #[error("cannot assign to this expression")]
    InvalidAssignmentTarget,
    #[error("cannot delete this expression")]
    InvalidDeleteTarget,
    #[error("positional argument follows keyword argument")]
    PositionalAfterNamed,
    #[error("try statement needs at least one except clause")]
    MissingExcept,
    #[error("invalid parameter list: {0}")]
    InvalidParameters(&'static str),
    #[error("malformed {0} node")]
    MalformedTree(&'static str),
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, span: Span) -> Self {
        ParseError { kind, span }
    }

    /// Line of the error (1-based, `-1` when unknown).
    pub fn line(&self) -> i32 {
        self.span.line
    }

    /// Column of the error (1-based, `-1` when unknown).
    pub fn column(&self) -> i32 {
        self.span.column
    }
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError::new(ParseErrorKind::Lex(err.kind), err.span)
    }
}

#[cold]
pub(crate) fn unexpected(found: &wks_lexer::Token, expected: impl Into<String>) -> ParseError {
    ParseError::new(
        ParseErrorKind::UnexpectedToken {
            found: found.to_string(),
            expected: expected.into(),
        },
        found.span,
    )
}

#[cold]
pub(crate) fn malformed(what: &'static str, span: Span) -> ParseError {
    ParseError::new(ParseErrorKind::MalformedTree(what), span)
}
