//! Concrete tree to typed AST.
//!
//! The transformer is stateless: every [`SyntaxKind`] maps to exactly one
//! AST constructor, and operator tokens resolve through the `from_symbol`
//! tables in `wks_ir`. Spans come from the defining token; bare `break`,
//! `continue`, boolean and null literals carry [`Span::SYNTHETIC`].

use std::sync::Arc;

use wks_ir::{
    AssignOp, BinaryOp, ExceptHandler, Expression, ExpressionKind, FunctionDecl, Literal,
    LogicalOp, LoopTarget, Param, ParamKind, Span, Statement, StatementKind, UnaryOp,
};
use wks_lexer::{Token, TokenKind};
use wks_stack::ensure_sufficient_stack;

use crate::cst::{SyntaxKind, SyntaxNode};
use crate::error::{malformed, ParseError, ParseErrorKind};

type Result<T> = std::result::Result<T, ParseError>;

#[derive(Copy, Clone, Debug, Default)]
pub struct Transformer;

impl Transformer {
    /// Lower a `Module` (or `Block`) node to its statement list.
    pub fn module(self, node: &SyntaxNode) -> Result<Vec<Statement>> {
        self.block(node)
    }

    fn block(self, node: &SyntaxNode) -> Result<Vec<Statement>> {
        node.nodes().map(|n| self.statement(n)).collect()
    }

    fn nth<'a>(self, node: &'a SyntaxNode, n: usize, what: &'static str) -> Result<&'a SyntaxNode> {
        node.nodes().nth(n).ok_or_else(|| malformed(what, node.span))
    }

    fn name(self, node: &SyntaxNode, what: &'static str) -> Result<String> {
        node.ident()
            .map(str::to_string)
            .ok_or_else(|| malformed(what, node.span))
    }

    pub fn statement(self, node: &SyntaxNode) -> Result<Statement> {
        ensure_sufficient_stack(|| {
            let span = node.span;
            let kind = match node.kind {
                SyntaxKind::ExprStmt => {
                    StatementKind::Expression(self.expression(self.nth(node, 0, "expression statement")?)?)
                }
                SyntaxKind::AssignStmt => return self.assignment(node),
                SyntaxKind::UnpackStmt => {
                    let names = self
                        .nth(node, 0, "unpack targets")?
                        .tokens()
                        .filter_map(|t| match &t.kind {
                            TokenKind::Ident(name) => Some(name.clone()),
                            _ => None,
                        })
                        .collect();
                    let value = self.expression(self.nth(node, 1, "unpack value")?)?;
                    StatementKind::Unpack { names, value }
                }
                SyntaxKind::DelStmt => {
                    let target = self.nth(node, 0, "del target")?;
                    match target.kind {
                        SyntaxKind::Variable => StatementKind::DeleteVariable {
                            name: self.name(target, "del target")?,
                        },
                        SyntaxKind::GetItem => StatementKind::DeleteItem {
                            object: self.expression(self.nth(target, 0, "del object")?)?,
                            index: self.expression(self.nth(target, 1, "del index")?)?,
                        },
                        _ => {
                            return Err(ParseError::new(
                                ParseErrorKind::InvalidDeleteTarget,
                                target.span,
                            ))
                        }
                    }
                }
                SyntaxKind::IfStmt => self.if_statement(node)?,
                SyntaxKind::ForStmt => {
                    let targets = self.nth(node, 0, "for targets")?;
                    let names: Vec<String> = targets
                        .tokens()
                        .filter_map(|t| match &t.kind {
                            TokenKind::Ident(name) => Some(name.clone()),
                            _ => None,
                        })
                        .collect();
                    let has_comma = targets.token_of(&TokenKind::Comma).is_some();
                    let target = match (names.as_slice(), has_comma) {
                        ([single], false) => LoopTarget::Single(single.clone()),
                        ([], _) => return Err(malformed("for targets", targets.span)),
                        _ => LoopTarget::Unpack(names),
                    };
                    StatementKind::For {
                        target,
                        iterable: self.expression(self.nth(node, 1, "for iterable")?)?,
                        body: self.block(self.nth(node, 2, "for body")?)?,
                    }
                }
                SyntaxKind::WhileStmt => StatementKind::While {
                    condition: self.expression(self.nth(node, 0, "while condition")?)?,
                    body: self.block(self.nth(node, 1, "while body")?)?,
                },
                SyntaxKind::TryStmt => {
                    let body = self.block(self.nth(node, 0, "try body")?)?;
                    let handlers = node
                        .nodes()
                        .skip(1)
                        .map(|clause| self.except_handler(clause))
                        .collect::<Result<_>>()?;
                    StatementKind::Try { body, handlers }
                }
                SyntaxKind::RaiseStmt => {
                    StatementKind::Raise(self.expression(self.nth(node, 0, "raise value")?)?)
                }
                SyntaxKind::BreakStmt => return Ok(Statement::new(StatementKind::Break, Span::SYNTHETIC)),
                SyntaxKind::ContinueStmt => {
                    return Ok(Statement::new(StatementKind::Continue, Span::SYNTHETIC))
                }
                SyntaxKind::ReturnStmt => StatementKind::Return(
                    node.nodes().next().map(|n| self.expression(n)).transpose()?,
                ),
                SyntaxKind::FuncDef => {
                    let name = self.name(node, "function name")?;
                    StatementKind::FunctionDef(self.function(node, Some(name))?)
                }
                _ => return Err(malformed("statement", span)),
            };
            Ok(Statement::new(kind, span))
        })
    }

    fn assignment(self, node: &SyntaxNode) -> Result<Statement> {
        let target = self.nth(node, 0, "assignment target")?;
        let op_token = node
            .token_of(&TokenKind::AssignOp)
            .ok_or_else(|| malformed("assignment operator", node.span))?;
        let op = AssignOp::from_symbol(&op_token.text)
            .ok_or_else(|| malformed("assignment operator", op_token.span))?;
        let value = self.expression(self.nth(node, 1, "assignment value")?)?;
        let kind = match target.kind {
            SyntaxKind::Variable => StatementKind::SetVariable {
                name: self.name(target, "assignment target")?,
                op,
                value,
            },
            SyntaxKind::GetProperty => StatementKind::SetProperty {
                object: self.expression(self.nth(target, 0, "property object")?)?,
                property: self.name(target, "property name")?,
                op,
                value,
            },
            SyntaxKind::GetItem => StatementKind::SetItem {
                object: self.expression(self.nth(target, 0, "item object")?)?,
                index: self.expression(self.nth(target, 1, "item index")?)?,
                op,
                value,
            },
            _ => {
                return Err(ParseError::new(
                    ParseErrorKind::InvalidAssignmentTarget,
                    target.span,
                ))
            }
        };
        Ok(Statement::new(kind, node.span))
    }

    fn if_statement(self, node: &SyntaxNode) -> Result<StatementKind> {
        let mut branches = vec![(
            self.expression(self.nth(node, 0, "if condition")?)?,
            self.block(self.nth(node, 1, "if body")?)?,
        )];
        let mut else_body = None;
        for clause in node.nodes().skip(2) {
            match clause.kind {
                SyntaxKind::ElifClause => branches.push((
                    self.expression(self.nth(clause, 0, "elif condition")?)?,
                    self.block(self.nth(clause, 1, "elif body")?)?,
                )),
                SyntaxKind::ElseClause => {
                    else_body = Some(self.block(self.nth(clause, 0, "else body")?)?);
                }
                _ => return Err(malformed("if clause", clause.span)),
            }
        }
        Ok(StatementKind::If {
            branches,
            else_body,
        })
    }

    /// `except (A, B) as e:` and `except A, B as e:` both yield two types.
    fn except_handler(self, clause: &SyntaxNode) -> Result<ExceptHandler> {
        let mut types = Vec::new();
        let mut body = None;
        for child in clause.nodes() {
            match child.kind {
                SyntaxKind::ExceptTypes => {
                    for ty in child.nodes() {
                        if ty.kind == SyntaxKind::TupleLit {
                            for element in ty.nodes() {
                                types.push(self.expression(element)?);
                            }
                        } else {
                            types.push(self.expression(ty)?);
                        }
                    }
                }
                SyntaxKind::Block => body = Some(self.block(child)?),
                _ => return Err(malformed("except clause", child.span)),
            }
        }
        Ok(ExceptHandler {
            types,
            name: clause.ident().map(str::to_string),
            body: body.ok_or_else(|| malformed("except body", clause.span))?,
            span: clause.span,
        })
    }

    /// Parameters, then body. A variadic parameter must come last and
    /// excludes default-valued parameters.
    fn function(self, node: &SyntaxNode, name: Option<String>) -> Result<Arc<FunctionDecl>> {
        let param_list = self.nth(node, 0, "parameter list")?;
        let mut params = Vec::new();
        for param in param_list.nodes() {
            let param_name = self.name(param, "parameter")?;
            let kind = match param.kind {
                SyntaxKind::Param => ParamKind::Positional,
                SyntaxKind::DefaultParam => {
                    ParamKind::Default(self.expression(self.nth(param, 0, "default value")?)?)
                }
                SyntaxKind::VariadicParam => ParamKind::Variadic,
                _ => return Err(malformed("parameter", param.span)),
            };
            params.push(Param {
                name: param_name,
                kind,
                span: param.span,
            });
        }
        validate_params(&params, param_list.span)?;
        Ok(Arc::new(FunctionDecl {
            name,
            params,
            body: self.block(self.nth(node, 1, "function body")?)?,
            span: node.span,
        }))
    }

    pub fn expression(self, node: &SyntaxNode) -> Result<Expression> {
        ensure_sufficient_stack(|| {
            let span = node.span;
            let kind = match node.kind {
                SyntaxKind::IntLit => match self.literal_token(node)?.kind {
                    TokenKind::Int(value) => ExpressionKind::Literal(Literal::Int(value)),
                    _ => return Err(malformed("integer literal", span)),
                },
                SyntaxKind::FloatLit => match self.literal_token(node)?.kind {
                    TokenKind::Float(value) => ExpressionKind::Literal(Literal::Float(value)),
                    _ => return Err(malformed("float literal", span)),
                },
                SyntaxKind::StringLit => match &self.literal_token(node)?.kind {
                    TokenKind::Str(value) => ExpressionKind::Literal(Literal::Str(value.clone())),
                    _ => return Err(malformed("string literal", span)),
                },
                SyntaxKind::TrueLit => return Ok(synthetic(Literal::Bool(true))),
                SyntaxKind::FalseLit => return Ok(synthetic(Literal::Bool(false))),
                SyntaxKind::NullLit => return Ok(synthetic(Literal::Null)),
                SyntaxKind::Variable => ExpressionKind::Variable(self.name(node, "variable")?),
                SyntaxKind::GetProperty => ExpressionKind::GetProperty {
                    object: Box::new(self.expression(self.nth(node, 0, "property object")?)?),
                    property: self.name(node, "property name")?,
                },
                SyntaxKind::GetItem => ExpressionKind::GetItem {
                    object: Box::new(self.expression(self.nth(node, 0, "item object")?)?),
                    index: Box::new(self.expression(self.nth(node, 1, "item index")?)?),
                },
                SyntaxKind::Slice => {
                    let part = |n: usize| -> Result<Option<Box<Expression>>> {
                        self.nth(node, n, "slice")?
                            .nodes()
                            .next()
                            .map(|bound| self.expression(bound).map(Box::new))
                            .transpose()
                    };
                    ExpressionKind::Slice {
                        start: part(0)?,
                        end: part(1)?,
                        step: part(2)?,
                    }
                }
                SyntaxKind::UnaryExpr | SyntaxKind::NotExpr => {
                    let symbol = self.operator_text(node)?;
                    ExpressionKind::Unary {
                        op: UnaryOp::from_symbol(&symbol)
                            .ok_or_else(|| malformed("unary operator", span))?,
                        operand: Box::new(self.expression(self.nth(node, 0, "operand")?)?),
                    }
                }
                SyntaxKind::BinaryExpr | SyntaxKind::Comparison => {
                    let symbol = self.operator_text(node)?;
                    ExpressionKind::Binary {
                        op: BinaryOp::from_symbol(&symbol)
                            .ok_or_else(|| malformed("binary operator", span))?,
                        left: Box::new(self.expression(self.nth(node, 0, "left operand")?)?),
                        right: Box::new(self.expression(self.nth(node, 1, "right operand")?)?),
                    }
                }
                SyntaxKind::OrExpr | SyntaxKind::AndExpr => {
                    let symbol = self.operator_text(node)?;
                    ExpressionKind::Logical {
                        op: LogicalOp::from_symbol(&symbol)
                            .ok_or_else(|| malformed("logical operator", span))?,
                        left: Box::new(self.expression(self.nth(node, 0, "left operand")?)?),
                        right: Box::new(self.expression(self.nth(node, 1, "right operand")?)?),
                    }
                }
                SyntaxKind::IfElse => ExpressionKind::IfElse {
                    condition: Box::new(self.expression(self.nth(node, 0, "condition")?)?),
                    then: Box::new(self.expression(self.nth(node, 1, "then branch")?)?),
                    otherwise: Box::new(self.expression(self.nth(node, 2, "else branch")?)?),
                },
                SyntaxKind::Call => {
                    let callee = Box::new(self.expression(self.nth(node, 0, "callee")?)?);
                    let mut args = Vec::new();
                    let mut kwargs = Vec::new();
                    for arg in self.nth(node, 1, "argument list")?.nodes() {
                        if arg.kind == SyntaxKind::NamedArg {
                            kwargs.push((
                                self.name(arg, "argument name")?,
                                self.expression(self.nth(arg, 0, "argument value")?)?,
                            ));
                        } else {
                            args.push(self.expression(arg)?);
                        }
                    }
                    ExpressionKind::Call {
                        callee,
                        args,
                        kwargs,
                    }
                }
                SyntaxKind::ListLit => ExpressionKind::List(self.elements(node)?),
                SyntaxKind::TupleLit => ExpressionKind::Tuple(self.elements(node)?),
                SyntaxKind::SetLit => ExpressionKind::Set(self.elements(node)?),
                SyntaxKind::DictLit => ExpressionKind::Dict(
                    node.nodes()
                        .map(|entry| {
                            Ok((
                                self.expression(self.nth(entry, 0, "dict key")?)?,
                                self.expression(self.nth(entry, 1, "dict value")?)?,
                            ))
                        })
                        .collect::<Result<_>>()?,
                ),
                SyntaxKind::Lambda => ExpressionKind::Lambda(self.function(node, None)?),
                _ => return Err(malformed("expression", span)),
            };
            Ok(Expression::new(kind, span))
        })
    }

    fn elements(self, node: &SyntaxNode) -> Result<Vec<Expression>> {
        node.nodes().map(|n| self.expression(n)).collect()
    }

    fn literal_token(self, node: &SyntaxNode) -> Result<Token> {
        node.tokens()
            .next()
            .cloned()
            .ok_or_else(|| malformed("literal", node.span))
    }

    /// Operator symbol of an operator node: multi-token forms (`not in`,
    /// `is not`) are joined with a single space.
    fn operator_text(self, node: &SyntaxNode) -> Result<String> {
        let parts: Vec<&str> = node.tokens().map(|t| t.text.as_str()).collect();
        if parts.is_empty() {
            return Err(malformed("operator", node.span));
        }
        Ok(parts.join(" "))
    }
}

fn synthetic(literal: Literal) -> Expression {
    Expression::new(ExpressionKind::Literal(literal), Span::SYNTHETIC)
}

fn validate_params(params: &[Param], span: Span) -> Result<()> {
    let invalid = |why| Err(ParseError::new(ParseErrorKind::InvalidParameters(why), span));
    let has_default = params
        .iter()
        .any(|p| matches!(p.kind, ParamKind::Default(_)));
    let mut seen_default = false;
    for (i, param) in params.iter().enumerate() {
        match param.kind {
            ParamKind::Variadic if i + 1 != params.len() => {
                return invalid("variadic parameter must be last")
            }
            ParamKind::Variadic if has_default => {
                return invalid("variadic and default parameters cannot be mixed")
            }
            ParamKind::Default(_) => seen_default = true,
            ParamKind::Positional if seen_default => {
                return invalid("parameter without default follows default parameter")
            }
            _ => {}
        }
        if params[..i].iter().any(|p| p.name == param.name) {
            return invalid("duplicate parameter name");
        }
    }
    Ok(())
}
