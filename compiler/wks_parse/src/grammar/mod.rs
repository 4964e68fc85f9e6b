//! Grammar rules.
//!
//! Recursive descent over the cooked token stream, producing the concrete
//! syntax tree. Start rule: `module`.
//!
//! ```text
//! module     := statement* EOF
//! statement  := simple ';' | if | for | while | try | funcdef
//! simple     := 'del' postfix | 'raise' expr | 'break' | 'continue'
//!             | 'return' expr? | NAME (',' NAME)+ '=' expr
//!             | postfix ASSIGN_OP expr | expr
//! if         := 'if' expr ':' block ('elif' expr ':' block)* ('else' ':' block)? 'end'
//! for        := 'for' targets 'in' expr ':' block 'end'
//! targets    := NAME (',' NAME)* | '(' NAME (',' NAME)* ','? ')'
//! while      := 'while' expr ':' block 'end'
//! try        := 'try' ':' block except+ 'end'
//! except     := 'except' (expr (',' expr)*)? ('as' NAME)? ':' block
//! funcdef    := 'def' NAME params ':' block 'end'
//! params     := '(' (param (',' param)* ','?)? ')'
//! param      := NAME | NAME '=' expr | '*' NAME
//! ```

mod expr;

use tracing::trace;
use wks_lexer::{Token, TokenKind};
use wks_stack::ensure_sufficient_stack;

use crate::cst::{SyntaxKind, SyntaxNode};
use crate::cursor::Cursor;
use crate::error::{unexpected, ParseError, ParseErrorKind};

/// Parser state.
pub struct Parser {
    cursor: Cursor,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser {
            cursor: Cursor::new(tokens),
        }
    }

    /// `module := statement* EOF`
    pub fn parse_module(mut self) -> Result<SyntaxNode, ParseError> {
        let mut module = SyntaxNode::new(SyntaxKind::Module, self.cursor.current_span());
        while !self.cursor.is_at_end() {
            module.push_node(self.parse_statement()?);
        }
        Ok(module)
    }

    fn start(&self, kind: SyntaxKind) -> SyntaxNode {
        SyntaxNode::new(kind, self.cursor.current_span())
    }

    fn parse_statement(&mut self) -> Result<SyntaxNode, ParseError> {
        ensure_sufficient_stack(|| {
            trace!(token = %self.cursor.current(), "statement");
            match self.cursor.current_kind() {
                TokenKind::If => self.parse_if(),
                TokenKind::For => self.parse_for(),
                TokenKind::While => self.parse_while(),
                TokenKind::Try => self.parse_try(),
                TokenKind::Def if matches!(self.cursor.peek_kind_at(1), TokenKind::Ident(_)) => {
                    self.parse_funcdef()
                }
                _ => {
                    let mut stmt = self.parse_simple()?;
                    stmt.push_token(self.cursor.expect(&TokenKind::Semicolon)?);
                    Ok(stmt)
                }
            }
        })
    }

    /// Statements up to (not including) `end`, `elif`, `else` or `except`.
    fn parse_block(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut block = self.start(SyntaxKind::Block);
        while !matches!(
            self.cursor.current_kind(),
            TokenKind::End | TokenKind::Elif | TokenKind::Else | TokenKind::Except | TokenKind::Eof
        ) {
            block.push_node(self.parse_statement()?);
        }
        Ok(block)
    }

    fn parse_simple(&mut self) -> Result<SyntaxNode, ParseError> {
        match self.cursor.current_kind() {
            TokenKind::Del => {
                let mut node = self.start(SyntaxKind::DelStmt);
                node.push_token(self.cursor.advance());
                let target = self.parse_postfix()?;
                if !matches!(target.kind, SyntaxKind::Variable | SyntaxKind::GetItem) {
                    return Err(ParseError::new(
                        ParseErrorKind::InvalidDeleteTarget,
                        target.span,
                    ));
                }
                node.push_node(target);
                Ok(node)
            }
            TokenKind::Raise => {
                let mut node = self.start(SyntaxKind::RaiseStmt);
                node.push_token(self.cursor.advance());
                node.push_node(self.parse_expr()?);
                Ok(node)
            }
            TokenKind::Break => {
                let mut node = self.start(SyntaxKind::BreakStmt);
                node.push_token(self.cursor.advance());
                Ok(node)
            }
            TokenKind::Continue => {
                let mut node = self.start(SyntaxKind::ContinueStmt);
                node.push_token(self.cursor.advance());
                Ok(node)
            }
            TokenKind::Return => {
                let mut node = self.start(SyntaxKind::ReturnStmt);
                node.push_token(self.cursor.advance());
                if !self.cursor.check(&TokenKind::Semicolon) {
                    node.push_node(self.parse_expr()?);
                }
                Ok(node)
            }
            TokenKind::Ident(_) if matches!(self.cursor.peek_kind_at(1), TokenKind::Comma) => {
                self.parse_unpack()
            }
            _ => self.parse_expr_or_assign(),
        }
    }

    /// `NAME (',' NAME)+ '=' expr`
    fn parse_unpack(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.start(SyntaxKind::UnpackStmt);
        let mut names = self.start(SyntaxKind::NameList);
        names.push_token(self.cursor.expect_ident()?);
        while let Some(comma) = self.cursor.eat(&TokenKind::Comma) {
            names.push_token(comma);
            names.push_token(self.cursor.expect_ident()?);
        }
        node.push_node(names);
        if !self.cursor.check_text(&TokenKind::AssignOp, "=") {
            return Err(unexpected(self.cursor.current(), "`=`"));
        }
        node.push_token(self.cursor.advance());
        node.push_node(self.parse_expr()?);
        Ok(node)
    }

    fn parse_expr_or_assign(&mut self) -> Result<SyntaxNode, ParseError> {
        let span = self.cursor.current_span();
        let expr = self.parse_expr()?;
        if !self.cursor.check(&TokenKind::AssignOp) {
            let mut node = SyntaxNode::new(SyntaxKind::ExprStmt, span);
            node.push_node(expr);
            return Ok(node);
        }
        if !matches!(
            expr.kind,
            SyntaxKind::Variable | SyntaxKind::GetProperty | SyntaxKind::GetItem
        ) {
            return Err(ParseError::new(
                ParseErrorKind::InvalidAssignmentTarget,
                expr.span,
            ));
        }
        let mut node = SyntaxNode::new(SyntaxKind::AssignStmt, span);
        node.push_node(expr);
        node.push_token(self.cursor.advance());
        node.push_node(self.parse_expr()?);
        Ok(node)
    }

    fn parse_if(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.start(SyntaxKind::IfStmt);
        node.push_token(self.cursor.advance());
        node.push_node(self.parse_expr()?);
        node.push_token(self.cursor.expect(&TokenKind::Colon)?);
        node.push_node(self.parse_block()?);
        while self.cursor.check(&TokenKind::Elif) {
            let mut clause = self.start(SyntaxKind::ElifClause);
            clause.push_token(self.cursor.advance());
            clause.push_node(self.parse_expr()?);
            clause.push_token(self.cursor.expect(&TokenKind::Colon)?);
            clause.push_node(self.parse_block()?);
            node.push_node(clause);
        }
        if self.cursor.check(&TokenKind::Else) {
            let mut clause = self.start(SyntaxKind::ElseClause);
            clause.push_token(self.cursor.advance());
            clause.push_token(self.cursor.expect(&TokenKind::Colon)?);
            clause.push_node(self.parse_block()?);
            node.push_node(clause);
        }
        node.push_token(self.cursor.expect(&TokenKind::End)?);
        Ok(node)
    }

    fn parse_for(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.start(SyntaxKind::ForStmt);
        node.push_token(self.cursor.advance());
        node.push_node(self.parse_loop_targets()?);
        node.push_token(self.cursor.expect(&TokenKind::In)?);
        node.push_node(self.parse_expr()?);
        node.push_token(self.cursor.expect(&TokenKind::Colon)?);
        node.push_node(self.parse_block()?);
        node.push_token(self.cursor.expect(&TokenKind::End)?);
        Ok(node)
    }

    fn parse_loop_targets(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut targets = self.start(SyntaxKind::LoopTargets);
        let open = self.cursor.eat(&TokenKind::LParen);
        let parenthesized = open.is_some();
        if let Some(open) = open {
            targets.push_token(open);
        }
        targets.push_token(self.cursor.expect_ident()?);
        while let Some(comma) = self.cursor.eat(&TokenKind::Comma) {
            targets.push_token(comma);
            if parenthesized && self.cursor.check(&TokenKind::RParen) {
                break;
            }
            targets.push_token(self.cursor.expect_ident()?);
        }
        if parenthesized {
            targets.push_token(self.cursor.expect(&TokenKind::RParen)?);
        }
        Ok(targets)
    }

    fn parse_while(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.start(SyntaxKind::WhileStmt);
        node.push_token(self.cursor.advance());
        node.push_node(self.parse_expr()?);
        node.push_token(self.cursor.expect(&TokenKind::Colon)?);
        node.push_node(self.parse_block()?);
        node.push_token(self.cursor.expect(&TokenKind::End)?);
        Ok(node)
    }

    fn parse_try(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.start(SyntaxKind::TryStmt);
        node.push_token(self.cursor.advance());
        node.push_token(self.cursor.expect(&TokenKind::Colon)?);
        node.push_node(self.parse_block()?);
        if !self.cursor.check(&TokenKind::Except) {
            return Err(ParseError::new(
                ParseErrorKind::MissingExcept,
                self.cursor.current_span(),
            ));
        }
        while self.cursor.check(&TokenKind::Except) {
            node.push_node(self.parse_except()?);
        }
        node.push_token(self.cursor.expect(&TokenKind::End)?);
        Ok(node)
    }

    fn parse_except(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut clause = self.start(SyntaxKind::ExceptClause);
        clause.push_token(self.cursor.advance());
        if !matches!(
            self.cursor.current_kind(),
            TokenKind::As | TokenKind::Colon
        ) {
            let mut types = self.start(SyntaxKind::ExceptTypes);
            types.push_node(self.parse_expr()?);
            while let Some(comma) = self.cursor.eat(&TokenKind::Comma) {
                types.push_token(comma);
                types.push_node(self.parse_expr()?);
            }
            clause.push_node(types);
        }
        if let Some(as_kw) = self.cursor.eat(&TokenKind::As) {
            clause.push_token(as_kw);
            clause.push_token(self.cursor.expect_ident()?);
        }
        clause.push_token(self.cursor.expect(&TokenKind::Colon)?);
        clause.push_node(self.parse_block()?);
        Ok(clause)
    }

    fn parse_funcdef(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut node = self.start(SyntaxKind::FuncDef);
        node.push_token(self.cursor.advance());
        node.push_token(self.cursor.expect_ident()?);
        self.parse_function_rest(&mut node)?;
        Ok(node)
    }

    /// `params ':' block 'end'`, shared by `def` statements and lambdas.
    fn parse_function_rest(&mut self, node: &mut SyntaxNode) -> Result<(), ParseError> {
        node.push_node(self.parse_params()?);
        node.push_token(self.cursor.expect(&TokenKind::Colon)?);
        node.push_node(self.parse_block()?);
        node.push_token(self.cursor.expect(&TokenKind::End)?);
        Ok(())
    }

    fn parse_params(&mut self) -> Result<SyntaxNode, ParseError> {
        let mut params = self.start(SyntaxKind::ParamList);
        params.push_token(self.cursor.expect(&TokenKind::LParen)?);
        while !self.cursor.check(&TokenKind::RParen) {
            params.push_node(self.parse_param()?);
            match self.cursor.eat(&TokenKind::Comma) {
                Some(comma) => params.push_token(comma),
                None => break,
            }
        }
        params.push_token(self.cursor.expect(&TokenKind::RParen)?);
        Ok(params)
    }

    fn parse_param(&mut self) -> Result<SyntaxNode, ParseError> {
        if self.cursor.check(&TokenKind::Star) {
            let mut param = self.start(SyntaxKind::VariadicParam);
            param.push_token(self.cursor.advance());
            param.push_token(self.cursor.expect_ident()?);
            return Ok(param);
        }
        let span = self.cursor.current_span();
        let name = self.cursor.expect_ident()?;
        if self.cursor.check_text(&TokenKind::AssignOp, "=") {
            let mut param = SyntaxNode::new(SyntaxKind::DefaultParam, span);
            param.push_token(name);
            param.push_token(self.cursor.advance());
            param.push_node(self.parse_expr()?);
            return Ok(param);
        }
        let mut param = SyntaxNode::new(SyntaxKind::Param, span);
        param.push_token(name);
        Ok(param)
    }
}
