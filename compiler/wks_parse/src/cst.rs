//! Concrete syntax tree.
//!
//! One [`SyntaxKind`] per grammar rule. Nodes keep every token they
//! consumed (keywords and punctuation included) so the tree mirrors the
//! source exactly; the transformer picks out what the AST needs.
//! Single-child precedence levels are inlined, so `a + b` produces one
//! `BinaryExpr` node rather than a chain of pass-through nodes.

use std::fmt::{self, Write as _};

use wks_ir::Span;
use wks_lexer::{Token, TokenKind};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SyntaxKind {
    Module,
    Block,

    // Statements
    ExprStmt,
    AssignStmt,
    UnpackStmt,
    NameList,
    DelStmt,
    IfStmt,
    ElifClause,
    ElseClause,
    ForStmt,
    LoopTargets,
    WhileStmt,
    TryStmt,
    ExceptClause,
    ExceptTypes,
    RaiseStmt,
    BreakStmt,
    ContinueStmt,
    ReturnStmt,
    FuncDef,
    ParamList,
    Param,
    DefaultParam,
    VariadicParam,

    // Expressions
    IfElse,
    OrExpr,
    AndExpr,
    NotExpr,
    Comparison,
    BinaryExpr,
    UnaryExpr,
    Call,
    ArgList,
    NamedArg,
    GetProperty,
    GetItem,
    Slice,
    SlicePart,
    Variable,
    IntLit,
    FloatLit,
    StringLit,
    TrueLit,
    FalseLit,
    NullLit,
    ListLit,
    TupleLit,
    DictLit,
    DictEntry,
    SetLit,
    Lambda,
}

/// A child of a [`SyntaxNode`].
#[derive(Clone, Debug, PartialEq)]
pub enum SyntaxElement {
    Node(SyntaxNode),
    Token(Token),
}

#[derive(Clone, Debug, PartialEq)]
pub struct SyntaxNode {
    pub kind: SyntaxKind,
    /// Position of the token that opened this node.
    pub span: Span,
    pub children: Vec<SyntaxElement>,
}

impl SyntaxNode {
    pub fn new(kind: SyntaxKind, span: Span) -> Self {
        SyntaxNode {
            kind,
            span,
            children: Vec::new(),
        }
    }

    pub fn push_node(&mut self, node: SyntaxNode) {
        self.children.push(SyntaxElement::Node(node));
    }

    pub fn push_token(&mut self, token: Token) {
        self.children.push(SyntaxElement::Token(token));
    }

    /// Child nodes, in order.
    pub fn nodes(&self) -> impl Iterator<Item = &SyntaxNode> {
        self.children.iter().filter_map(|c| match c {
            SyntaxElement::Node(n) => Some(n),
            SyntaxElement::Token(_) => None,
        })
    }

    /// Child tokens, in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.children.iter().filter_map(|c| match c {
            SyntaxElement::Token(t) => Some(t),
            SyntaxElement::Node(_) => None,
        })
    }

    /// The first child token matching `kind` (payload ignored).
    pub fn token_of(&self, kind: &TokenKind) -> Option<&Token> {
        self.tokens().find(|t| t.kind.same_variant(kind))
    }

    /// The first identifier token's name.
    pub fn ident(&self) -> Option<&str> {
        self.tokens().find_map(|t| match &t.kind {
            TokenKind::Ident(name) => Some(name.as_str()),
            _ => None,
        })
    }

    /// Render the tree as an indented outline (used by `wks parse`).
    pub fn pretty(&self) -> String {
        let mut out = String::new();
        self.write_pretty(&mut out, 0);
        out
    }

    fn write_pretty(&self, out: &mut String, depth: usize) {
        let _ = writeln!(out, "{:indent$}{:?}", "", self.kind, indent = depth * 2);
        for child in &self.children {
            match child {
                SyntaxElement::Node(n) => n.write_pretty(out, depth + 1),
                SyntaxElement::Token(t) => {
                    let _ = writeln!(out, "{:indent$}{}", "", t, indent = (depth + 1) * 2);
                }
            }
        }
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pretty())
    }
}
