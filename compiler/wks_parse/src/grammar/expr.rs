//! Expression rules, lowest precedence first.
//!
//! ```text
//! expr       := or ('?' expr ':' expr)?
//! or         := and ('or' and)*
//! and        := not ('and' not)*
//! not        := 'not' not | comparison
//! comparison := bitor (CMP bitor)?
//! bitor      := bitxor ('|' bitxor)*
//! bitxor     := bitand ('^' bitand)*
//! bitand     := shift ('&' shift)*
//! shift      := arith (('<<' | '>>') arith)*
//! arith      := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '//' | '%') unary)*
//! unary      := ('-' | '~') unary | power
//! power      := postfix ('**' unary)?
//! postfix    := atom (call | '.' NAME | '[' subscript ']')*
//! ```
//!
//! Comparisons do not chain: `a < b < c` is a syntax error.

use wks_lexer::TokenKind;
use wks_stack::ensure_sufficient_stack;

use super::Parser;
use crate::cst::{SyntaxKind, SyntaxNode};
use crate::error::{unexpected, ParseError, ParseErrorKind};

type Rule = fn(&mut Parser) -> Result<SyntaxNode, ParseError>;

impl Parser {
    pub(super) fn parse_expr(&mut self) -> Result<SyntaxNode, ParseError> {
        ensure_sufficient_stack(|| {
            let condition = self.parse_or()?;
            if !self.cursor.check(&TokenKind::Question) {
                return Ok(condition);
            }
            let mut node = SyntaxNode::new(SyntaxKind::IfElse, condition.span);
            node.push_node(condition);
            node.push_token(self.cursor.advance());
            node.push_node(self.parse_expr()?);
            node.push_token(self.cursor.expect(&TokenKind::Colon)?);
            node.push_node(self.parse_expr()?);
            Ok(node)
        })
    }

    /// Left-associative binary level: `next (op next)*`.
    fn binary_level(
        &mut self,
        kind: SyntaxKind,
        next: Rule,
        is_op: fn(&TokenKind) -> bool,
    ) -> Result<SyntaxNode, ParseError> {
        let mut left = next(self)?;
        while is_op(self.cursor.current_kind()) {
            let mut node = SyntaxNode::new(kind, left.span);
            let op = self.cursor.advance();
            node.push_node(left);
            node.push_token(op);
            node.push_node(next(self)?);
            left = node;
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::OrExpr, Self::parse_and, |k| {
            matches!(k, TokenKind::Or)
        })
    }

    fn parse_and(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::AndExpr, Self::parse_not, |k| {
            matches!(k, TokenKind::And)
        })
    }

    fn parse_not(&mut self) -> Result<SyntaxNode, ParseError> {
        if !self.cursor.check(&TokenKind::Not) {
            return self.parse_comparison();
        }
        ensure_sufficient_stack(|| {
            let mut node = self.start(SyntaxKind::NotExpr);
            node.push_token(self.cursor.advance());
            node.push_node(self.parse_not()?);
            Ok(node)
        })
    }

    fn parse_comparison(&mut self) -> Result<SyntaxNode, ParseError> {
        let left = self.parse_bitor()?;
        let op_len = match self.cursor.current_kind() {
            TokenKind::CompareOp | TokenKind::In => 1,
            TokenKind::Is if matches!(self.cursor.peek_kind_at(1), TokenKind::Not) => 2,
            TokenKind::Is => 1,
            TokenKind::Not if matches!(self.cursor.peek_kind_at(1), TokenKind::In) => 2,
            _ => return Ok(left),
        };
        let mut node = SyntaxNode::new(SyntaxKind::Comparison, left.span);
        node.push_node(left);
        for _ in 0..op_len {
            node.push_token(self.cursor.advance());
        }
        node.push_node(self.parse_bitor()?);
        Ok(node)
    }

    fn parse_bitor(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::BinaryExpr, Self::parse_bitxor, |k| {
            matches!(k, TokenKind::Pipe)
        })
    }

    fn parse_bitxor(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::BinaryExpr, Self::parse_bitand, |k| {
            matches!(k, TokenKind::Caret)
        })
    }

    fn parse_bitand(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::BinaryExpr, Self::parse_shift, |k| {
            matches!(k, TokenKind::Amp)
        })
    }

    fn parse_shift(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::BinaryExpr, Self::parse_arith, |k| {
            matches!(k, TokenKind::Shl | TokenKind::Shr)
        })
    }

    fn parse_arith(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::BinaryExpr, Self::parse_term, |k| {
            matches!(k, TokenKind::Plus | TokenKind::Minus)
        })
    }

    fn parse_term(&mut self) -> Result<SyntaxNode, ParseError> {
        self.binary_level(SyntaxKind::BinaryExpr, Self::parse_unary, |k| {
            matches!(
                k,
                TokenKind::Star | TokenKind::Slash | TokenKind::SlashSlash | TokenKind::Percent
            )
        })
    }

    fn parse_unary(&mut self) -> Result<SyntaxNode, ParseError> {
        if !matches!(
            self.cursor.current_kind(),
            TokenKind::Minus | TokenKind::Tilde
        ) {
            return self.parse_power();
        }
        ensure_sufficient_stack(|| {
            let mut node = self.start(SyntaxKind::UnaryExpr);
            node.push_token(self.cursor.advance());
            node.push_node(self.parse_unary()?);
            Ok(node)
        })
    }

    /// `**` binds tighter than unary minus on its left and is
    /// right-associative: `-2 ** 2` is `-(2 ** 2)`, `2 ** -1` is allowed.
    fn parse_power(&mut self) -> Result<SyntaxNode, ParseError> {
        let base = self.parse_postfix()?;
        if !self.cursor.check(&TokenKind::StarStar) {
            return Ok(base);
        }
        let mut node = SyntaxNode::new(SyntaxKind::BinaryExpr, base.span);
        node.push_node(base);
        node.push_token(self.cursor.advance());
        node.push_node(self.parse_unary()?);
        Ok(node)
    }

    pub(super) fn parse_postfix(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.cursor.current_kind() {
                TokenKind::LParen => {
                    let mut call = SyntaxNode::new(SyntaxKind::Call, expr.span);
                    call.push_node(expr);
                    call.push_node(self.parse_args()?);
                    expr = call;
                }
                TokenKind::Dot => {
                    let mut get = SyntaxNode::new(SyntaxKind::GetProperty, expr.span);
                    get.push_node(expr);
                    get.push_token(self.cursor.advance());
                    get.push_token(self.cursor.expect_ident()?);
                    expr = get;
                }
                TokenKind::LBracket => {
                    let mut get = SyntaxNode::new(SyntaxKind::GetItem, expr.span);
                    get.push_node(expr);
                    get.push_token(self.cursor.advance());
                    get.push_node(self.parse_subscript()?);
                    get.push_token(self.cursor.expect(&TokenKind::RBracket)?);
                    expr = get;
                }
                _ => return Ok(expr),
            }
        }
    }

    /// `'(' (arg (',' arg)* ','?)? ')'` where `arg := expr | NAME '=' expr`.
    fn parse_args(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut args = self.start(SyntaxKind::ArgList);
        args.push_token(self.cursor.advance());
        let mut seen_named = false;
        while !self.cursor.check(&TokenKind::RParen) {
            let named = self.cursor.check_ident() && {
                let next = self.cursor.peek_at(1);
                matches!(next.kind, TokenKind::AssignOp) && next.text == "="
            };
            if named {
                seen_named = true;
                let mut arg = self.start(SyntaxKind::NamedArg);
                arg.push_token(self.cursor.advance());
                arg.push_token(self.cursor.advance());
                arg.push_node(self.parse_expr()?);
                args.push_node(arg);
            } else {
                let span = self.cursor.current_span();
                let arg = self.parse_expr()?;
                if seen_named {
                    return Err(ParseError::new(ParseErrorKind::PositionalAfterNamed, span));
                }
                args.push_node(arg);
            }
            match self.cursor.eat(&TokenKind::Comma) {
                Some(comma) => args.push_token(comma),
                None => break,
            }
        }
        args.push_token(self.cursor.expect(&TokenKind::RParen)?);
        Ok(args)
    }

    /// Index expression or `start?:end?(:step?)?` slice.
    fn parse_subscript(&mut self) -> Result<SyntaxNode, ParseError> {
        let span = self.cursor.current_span();
        let start = if self.cursor.check(&TokenKind::Colon) {
            None
        } else {
            let index = self.parse_expr()?;
            if !self.cursor.check(&TokenKind::Colon) {
                return Ok(index);
            }
            Some(index)
        };

        let mut slice = SyntaxNode::new(SyntaxKind::Slice, span);
        slice.push_node(self.slice_part(start));
        slice.push_token(self.cursor.advance());
        let end = self.optional_slice_bound()?;
        slice.push_node(self.slice_part(end));
        let step = match self.cursor.eat(&TokenKind::Colon) {
            Some(colon) => {
                slice.push_token(colon);
                self.optional_slice_bound()?
            }
            None => None,
        };
        slice.push_node(self.slice_part(step));
        Ok(slice)
    }

    fn optional_slice_bound(&mut self) -> Result<Option<SyntaxNode>, ParseError> {
        if matches!(
            self.cursor.current_kind(),
            TokenKind::Colon | TokenKind::RBracket
        ) {
            Ok(None)
        } else {
            self.parse_expr().map(Some)
        }
    }

    fn slice_part(&self, bound: Option<SyntaxNode>) -> SyntaxNode {
        let span = bound
            .as_ref()
            .map_or_else(|| self.cursor.current_span(), |b| b.span);
        let mut part = SyntaxNode::new(SyntaxKind::SlicePart, span);
        if let Some(bound) = bound {
            part.push_node(bound);
        }
        part
    }

    fn parse_atom(&mut self) -> Result<SyntaxNode, ParseError> {
        let kind = match self.cursor.current_kind() {
            TokenKind::Int(_) => SyntaxKind::IntLit,
            TokenKind::Float(_) => SyntaxKind::FloatLit,
            TokenKind::Str(_) => SyntaxKind::StringLit,
            TokenKind::True => SyntaxKind::TrueLit,
            TokenKind::False => SyntaxKind::FalseLit,
            TokenKind::Null => SyntaxKind::NullLit,
            TokenKind::Ident(_) => SyntaxKind::Variable,
            TokenKind::LParen => return self.parse_paren(),
            TokenKind::LBracket => return self.parse_list(),
            TokenKind::LBrace => return self.parse_brace(),
            TokenKind::Def => return self.parse_lambda(),
            _ => return Err(unexpected(self.cursor.current(), "expression")),
        };
        let mut node = self.start(kind);
        node.push_token(self.cursor.advance());
        Ok(node)
    }

    /// Grouping, the empty tuple, or a tuple display.
    fn parse_paren(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut tuple = self.start(SyntaxKind::TupleLit);
        let open = self.cursor.advance();
        if let Some(close) = self.cursor.eat(&TokenKind::RParen) {
            tuple.push_token(open);
            tuple.push_token(close);
            return Ok(tuple);
        }
        let first = self.parse_expr()?;
        if self.cursor.eat(&TokenKind::RParen).is_some() {
            return Ok(first);
        }
        tuple.push_token(open);
        tuple.push_node(first);
        while let Some(comma) = self.cursor.eat(&TokenKind::Comma) {
            tuple.push_token(comma);
            if self.cursor.check(&TokenKind::RParen) {
                break;
            }
            tuple.push_node(self.parse_expr()?);
        }
        tuple.push_token(self.cursor.expect(&TokenKind::RParen)?);
        Ok(tuple)
    }

    fn parse_list(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut list = self.start(SyntaxKind::ListLit);
        list.push_token(self.cursor.advance());
        self.parse_elements(&mut list, &TokenKind::RBracket)?;
        list.push_token(self.cursor.expect(&TokenKind::RBracket)?);
        Ok(list)
    }

    /// `expr (',' expr)* ','?` up to `close` (not consumed).
    fn parse_elements(
        &mut self,
        node: &mut SyntaxNode,
        close: &TokenKind,
    ) -> Result<(), ParseError> {
        while !self.cursor.check(close) {
            node.push_node(self.parse_expr()?);
            match self.cursor.eat(&TokenKind::Comma) {
                Some(comma) => node.push_token(comma),
                None => break,
            }
        }
        Ok(())
    }

    /// `{}` and `{k: v, ...}` are dicts; `{a, b}` is a set.
    fn parse_brace(&mut self) -> Result<SyntaxNode, ParseError> {
        let span = self.cursor.current_span();
        let open = self.cursor.advance();
        if let Some(close) = self.cursor.eat(&TokenKind::RBrace) {
            let mut dict = SyntaxNode::new(SyntaxKind::DictLit, span);
            dict.push_token(open);
            dict.push_token(close);
            return Ok(dict);
        }

        let first = self.parse_expr()?;
        if !self.cursor.check(&TokenKind::Colon) {
            let mut set = SyntaxNode::new(SyntaxKind::SetLit, span);
            set.push_token(open);
            set.push_node(first);
            if let Some(comma) = self.cursor.eat(&TokenKind::Comma) {
                set.push_token(comma);
                self.parse_elements(&mut set, &TokenKind::RBrace)?;
            }
            set.push_token(self.cursor.expect(&TokenKind::RBrace)?);
            return Ok(set);
        }

        let mut dict = SyntaxNode::new(SyntaxKind::DictLit, span);
        dict.push_token(open);
        let mut key = Some(first);
        loop {
            let key_node = match key.take() {
                Some(k) => k,
                None => self.parse_expr()?,
            };
            let mut entry = SyntaxNode::new(SyntaxKind::DictEntry, key_node.span);
            entry.push_node(key_node);
            entry.push_token(self.cursor.expect(&TokenKind::Colon)?);
            entry.push_node(self.parse_expr()?);
            dict.push_node(entry);
            match self.cursor.eat(&TokenKind::Comma) {
                Some(comma) => dict.push_token(comma),
                None => break,
            }
            if self.cursor.check(&TokenKind::RBrace) {
                break;
            }
        }
        dict.push_token(self.cursor.expect(&TokenKind::RBrace)?);
        Ok(dict)
    }

    /// `def (params): block end` in expression position.
    fn parse_lambda(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.start(SyntaxKind::Lambda);
        node.push_token(self.cursor.advance());
        self.parse_function_rest(&mut node)?;
        Ok(node)
    }
}
