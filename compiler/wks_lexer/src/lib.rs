//! Lexer for WikiScript using logos.
//!
//! Lexing is two-layered: `logos` recognises raw tokens, then the cooking
//! step decodes literal payloads (radix integers, floats, escaped strings)
//! and attaches line/column positions. The token list always ends with
//! [`TokenKind::Eof`].

mod escape;
mod lex_error;
mod line_index;
mod number;
mod raw_token;
mod token;

use logos::Logos;

pub use escape::unescape;
pub use lex_error::{LexError, LexErrorKind};
pub use line_index::LineIndex;
pub use number::{parse_float, parse_int};
pub use token::{Token, TokenKind};

use raw_token::RawToken;

/// Tokenize script source.
pub fn lex(source: &str) -> Result<Vec<Token>, LexError> {
    let index = LineIndex::new(source);
    let mut tokens = Vec::new();
    let mut lexer = RawToken::lexer(source);

    while let Some(raw) = lexer.next() {
        let range = lexer.span();
        let text = lexer.slice();
        let span = index.span_at(source, range.start);
        let Ok(raw) = raw else {
            return Err(unrecognized(text, span));
        };
        let kind = cook(raw, text, span)?;
        tokens.push(Token {
            kind,
            text: text.to_string(),
            span,
        });
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        text: String::new(),
        span: index.span_at(source, source.len()),
    });
    Ok(tokens)
}

#[cold]
fn unrecognized(text: &str, span: wks_ir::Span) -> LexError {
    match text.chars().next() {
        Some('"' | '\'') => LexError::new(LexErrorKind::UnterminatedString, span),
        Some(c) => LexError::new(LexErrorKind::UnexpectedCharacter(c), span),
        None => LexError::new(LexErrorKind::UnexpectedCharacter('\0'), span),
    }
}

/// Convert a raw token into a cooked kind, decoding literal payloads.
fn cook(raw: RawToken, text: &str, span: wks_ir::Span) -> Result<TokenKind, LexError> {
    let kind = match raw {
        RawToken::Def => TokenKind::Def,
        RawToken::End => TokenKind::End,
        RawToken::If => TokenKind::If,
        RawToken::Elif => TokenKind::Elif,
        RawToken::Else => TokenKind::Else,
        RawToken::For => TokenKind::For,
        RawToken::In => TokenKind::In,
        RawToken::While => TokenKind::While,
        RawToken::Try => TokenKind::Try,
        RawToken::Except => TokenKind::Except,
        RawToken::As => TokenKind::As,
        RawToken::Raise => TokenKind::Raise,
        RawToken::Break => TokenKind::Break,
        RawToken::Continue => TokenKind::Continue,
        RawToken::Return => TokenKind::Return,
        RawToken::Del => TokenKind::Del,
        RawToken::And => TokenKind::And,
        RawToken::Or => TokenKind::Or,
        RawToken::Not => TokenKind::Not,
        RawToken::Is => TokenKind::Is,
        RawToken::True => TokenKind::True,
        RawToken::False => TokenKind::False,
        RawToken::Null => TokenKind::Null,
        RawToken::Int => TokenKind::Int(parse_int(text).ok_or_else(|| {
            LexError::new(LexErrorKind::IntegerOverflow(text.to_string()), span)
        })?),
        RawToken::Float => TokenKind::Float(parse_float(text).ok_or_else(|| {
            LexError::new(LexErrorKind::InvalidFloat(text.to_string()), span)
        })?),
        RawToken::Str => TokenKind::Str(unescape(&text[1..text.len() - 1])),
        RawToken::Ident => TokenKind::Ident(text.to_string()),
        RawToken::LParen => TokenKind::LParen,
        RawToken::RParen => TokenKind::RParen,
        RawToken::LBracket => TokenKind::LBracket,
        RawToken::RBracket => TokenKind::RBracket,
        RawToken::LBrace => TokenKind::LBrace,
        RawToken::RBrace => TokenKind::RBrace,
        RawToken::Comma => TokenKind::Comma,
        RawToken::Semicolon => TokenKind::Semicolon,
        RawToken::Colon => TokenKind::Colon,
        RawToken::Dot => TokenKind::Dot,
        RawToken::Question => TokenKind::Question,
        RawToken::AssignOp => TokenKind::AssignOp,
        RawToken::CompareOp => TokenKind::CompareOp,
        RawToken::Plus => TokenKind::Plus,
        RawToken::Minus => TokenKind::Minus,
        RawToken::Star => TokenKind::Star,
        RawToken::StarStar => TokenKind::StarStar,
        RawToken::Slash => TokenKind::Slash,
        RawToken::SlashSlash => TokenKind::SlashSlash,
        RawToken::Percent => TokenKind::Percent,
        RawToken::Amp => TokenKind::Amp,
        RawToken::Pipe => TokenKind::Pipe,
        RawToken::Caret => TokenKind::Caret,
        RawToken::Tilde => TokenKind::Tilde,
        RawToken::Shl => TokenKind::Shl,
        RawToken::Shr => TokenKind::Shr,
    };
    Ok(kind)
}
