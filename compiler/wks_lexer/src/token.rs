//! Cooked tokens handed to the parser.

use std::fmt;

use wks_ir::Span;

/// A cooked token: kind (with decoded literal payload), source text, and
/// the line/column of its first character.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind {
    // Keywords
    Def,
    End,
    If,
    Elif,
    Else,
    For,
    In,
    While,
    Try,
    Except,
    As,
    Raise,
    Break,
    Continue,
    Return,
    Del,
    And,
    Or,
    Not,
    Is,
    True,
    False,
    Null,

    // Literals and names
    Int(i64),
    Float(f64),
    Str(String),
    Ident(String),

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semicolon,
    Colon,
    Dot,
    Question,

    /// `=` or one of the compound assignment operators; the symbol is the
    /// token text.
    AssignOp,
    /// `==`, `!=`, `<`, `<=`, `>`, `>=`; the symbol is the token text.
    CompareOp,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    SlashSlash,
    Percent,
    Amp,
    Pipe,
    Caret,
    Tilde,
    Shl,
    Shr,

    Eof,
}

impl TokenKind {
    /// Whether two kinds are the same variant, ignoring payloads.
    #[inline]
    pub fn same_variant(&self, other: &TokenKind) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    /// Human-readable description for diagnostics.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Int(_) => "integer literal",
            TokenKind::Float(_) => "float literal",
            TokenKind::Str(_) => "string literal",
            TokenKind::Ident(_) => "identifier",
            TokenKind::AssignOp => "assignment operator",
            TokenKind::CompareOp => "comparison operator",
            TokenKind::Eof => "end of input",
            TokenKind::Semicolon => "`;`",
            TokenKind::Colon => "`:`",
            TokenKind::Comma => "`,`",
            TokenKind::End => "`end`",
            TokenKind::RParen => "`)`",
            TokenKind::RBracket => "`]`",
            TokenKind::RBrace => "`}`",
            TokenKind::In => "`in`",
            _ => "token",
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if matches!(self.kind, TokenKind::Eof) {
            write!(f, "end of input")
        } else {
            write!(f, "`{}`", self.text)
        }
    }
}
