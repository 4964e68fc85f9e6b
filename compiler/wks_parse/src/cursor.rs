//! Token cursor for navigating the token stream.
//!
//! Provides low-level token access, lookahead, and consumption methods.

use tracing::trace;
use wks_ir::Span;
use wks_lexer::{Token, TokenKind};

use crate::error::{unexpected, ParseError};

/// Cursor over a cooked token list.
///
/// Invariant: the list is non-empty and ends with `Eof`, and the position
/// never moves past that last token.
pub struct Cursor {
    tokens: Vec<Token>,
    pos: usize,
}

impl Cursor {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)) {
            let span = tokens.last().map_or(Span::new(1, 1), |t| t.span);
            tokens.push(Token {
                kind: TokenKind::Eof,
                text: String::new(),
                span,
            });
        }
        Cursor { tokens, pos: 0 }
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.tokens[self.pos]
    }

    #[inline]
    pub fn current_kind(&self) -> &TokenKind {
        &self.current().kind
    }

    #[inline]
    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Peek at the token `n` tokens ahead of the current one.
    pub fn peek_at(&self, n: usize) -> &Token {
        let idx = (self.pos + n).min(self.tokens.len() - 1);
        &self.tokens[idx]
    }

    #[inline]
    pub fn peek_kind_at(&self, n: usize) -> &TokenKind {
        &self.peek_at(n).kind
    }

    #[inline]
    pub fn is_at_end(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Eof)
    }

    /// Check if the current token is the same variant as `kind`.
    #[inline]
    pub fn check(&self, kind: &TokenKind) -> bool {
        self.current_kind().same_variant(kind)
    }

    /// Check if the current token is an operator token with exactly `text`.
    #[inline]
    pub fn check_text(&self, kind: &TokenKind, text: &str) -> bool {
        self.check(kind) && self.current().text == text
    }

    #[inline]
    pub fn check_ident(&self) -> bool {
        matches!(self.current_kind(), TokenKind::Ident(_))
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Token {
        let token = self.tokens[self.pos].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        trace!(token = %token, "advance");
        token
    }

    /// Consume the current token if it matches `kind`.
    pub fn eat(&mut self, kind: &TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    /// Consume a token of `kind` or fail with an "expected" error.
    pub fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(unexpected(self.current(), kind.describe()))
        }
    }

    /// Consume an identifier token or fail.
    pub fn expect_ident(&mut self) -> Result<Token, ParseError> {
        if self.check_ident() {
            Ok(self.advance())
        } else {
            Err(unexpected(self.current(), "identifier"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cursor(source: &str) -> Cursor {
        Cursor::new(wks_lexer::lex(source).unwrap_or_default())
    }

    #[test]
    fn advance_stops_at_eof() {
        let mut c = cursor("a");
        c.advance();
        assert!(c.is_at_end());
        c.advance();
        assert!(c.is_at_end());
    }

    #[test]
    fn check_ignores_payload() {
        let c = cursor("name");
        assert!(c.check(&TokenKind::Ident(String::new())));
        assert!(c.check_ident());
    }

    #[test]
    fn expect_reports_found_token() {
        let mut c = cursor("x");
        let err = c.expect(&TokenKind::Semicolon).err();
        assert_eq!(err.map(|e| e.span), Some(Span::new(1, 1)));
    }

    #[test]
    fn missing_eof_is_appended() {
        let c = Cursor::new(Vec::new());
        assert!(c.is_at_end());
    }
}
