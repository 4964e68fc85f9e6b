//! Grammar tests over the concrete syntax tree.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use wks_ir::Span;

use crate::{parse, ParseErrorKind, SyntaxKind, SyntaxNode};

fn first_statement(source: &str) -> SyntaxNode {
    let module = parse(source).expect("parse failed");
    let node = module.nodes().next().cloned().expect("no statement");
    node
}

fn expr_of(source: &str) -> SyntaxNode {
    let stmt = first_statement(source);
    assert_eq!(stmt.kind, SyntaxKind::ExprStmt);
    let node = stmt.nodes().next().cloned().expect("no expression");
    node
}

fn kinds(node: &SyntaxNode) -> Vec<SyntaxKind> {
    node.nodes().map(|n| n.kind).collect()
}

#[test]
fn test_empty_module() {
    let module = parse("  # only a comment\n").unwrap();
    assert_eq!(module.kind, SyntaxKind::Module);
    assert_eq!(module.nodes().count(), 0);
}

#[test]
fn test_multiplication_binds_tighter() {
    let expr = expr_of("1 + 2 * 3;");
    assert_eq!(expr.kind, SyntaxKind::BinaryExpr);
    assert_eq!(
        kinds(&expr),
        vec![SyntaxKind::IntLit, SyntaxKind::BinaryExpr]
    );
}

#[test]
fn test_power_is_right_associative() {
    let expr = expr_of("2 ** 3 ** 2;");
    assert_eq!(
        kinds(&expr),
        vec![SyntaxKind::IntLit, SyntaxKind::BinaryExpr]
    );
}

#[test]
fn test_unary_minus_wraps_power() {
    let expr = expr_of("-2 ** 2;");
    assert_eq!(expr.kind, SyntaxKind::UnaryExpr);
    assert_eq!(kinds(&expr), vec![SyntaxKind::BinaryExpr]);
}

#[test]
fn test_not_in_is_one_comparison() {
    let expr = expr_of("a not in b;");
    assert_eq!(expr.kind, SyntaxKind::Comparison);
    let ops: Vec<&str> = expr.tokens().map(|t| t.text.as_str()).collect();
    assert_eq!(ops, vec!["not", "in"]);
}

#[test]
fn test_comparisons_do_not_chain() {
    let err = parse("a < b < c;").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
}

#[test]
fn test_ternary_nests_to_the_right() {
    let expr = expr_of("a ? b : c ? d : e;");
    assert_eq!(expr.kind, SyntaxKind::IfElse);
    assert_eq!(
        kinds(&expr),
        vec![SyntaxKind::Variable, SyntaxKind::Variable, SyntaxKind::IfElse]
    );
}

#[test]
fn test_postfix_chain() {
    let expr = expr_of("a.b[0](1);");
    assert_eq!(expr.kind, SyntaxKind::Call);
    let callee = expr.nodes().next().unwrap();
    assert_eq!(callee.kind, SyntaxKind::GetItem);
}

#[test]
fn test_named_arguments() {
    let expr = expr_of("f(1, key=2);");
    let args = expr.nodes().nth(1).unwrap();
    assert_eq!(
        kinds(args),
        vec![SyntaxKind::IntLit, SyntaxKind::NamedArg]
    );
}

#[test]
fn test_positional_after_named_is_rejected() {
    let err = parse("f(key=1, 2);").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::PositionalAfterNamed);
    assert_eq!(err.span, Span::new(1, 10));
}

#[test]
fn test_collection_literals() {
    assert_eq!(expr_of("[];").kind, SyntaxKind::ListLit);
    assert_eq!(expr_of("();").kind, SyntaxKind::TupleLit);
    assert_eq!(expr_of("(1,);").kind, SyntaxKind::TupleLit);
    assert_eq!(expr_of("(1);").kind, SyntaxKind::IntLit);
    assert_eq!(expr_of("{};").kind, SyntaxKind::DictLit);
    assert_eq!(expr_of("{1: 2, 3: 4,};").kind, SyntaxKind::DictLit);
    assert_eq!(expr_of("{1, 2};").kind, SyntaxKind::SetLit);
}

#[test]
fn test_slice_forms() {
    for source in ["x[1:2:3];", "x[:2:3];", "x[1::3];", "x[::3];", "x[:];", "x[1:];"] {
        let expr = expr_of(source);
        let slice = expr.nodes().nth(1).unwrap();
        assert_eq!(slice.kind, SyntaxKind::Slice, "{source}");
        assert_eq!(slice.nodes().count(), 3, "{source}");
    }
    let index = expr_of("x[1];");
    assert_eq!(index.nodes().nth(1).unwrap().kind, SyntaxKind::IntLit);
}

#[test]
fn test_unpack_statement() {
    let stmt = first_statement("a, b = (1, 2);");
    assert_eq!(stmt.kind, SyntaxKind::UnpackStmt);
    assert_eq!(
        kinds(&stmt),
        vec![SyntaxKind::NameList, SyntaxKind::TupleLit]
    );
}

#[test]
fn test_compound_assignment_targets() {
    assert_eq!(first_statement("x += 1;").kind, SyntaxKind::AssignStmt);
    assert_eq!(first_statement("o.p //= 2;").kind, SyntaxKind::AssignStmt);
    assert_eq!(first_statement("l[0] <<= 1;").kind, SyntaxKind::AssignStmt);
}

#[test]
fn test_invalid_assignment_target() {
    let err = parse("f() = 1;").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidAssignmentTarget);
}

#[test]
fn test_delete_targets() {
    assert_eq!(first_statement("del x;").kind, SyntaxKind::DelStmt);
    assert_eq!(first_statement("del x[0];").kind, SyntaxKind::DelStmt);
    let err = parse("del x.y;").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::InvalidDeleteTarget);
}

#[test]
fn test_if_elif_else() {
    let stmt = first_statement("if a: x; elif b: y; elif c: z; else: w; end");
    assert_eq!(
        kinds(&stmt),
        vec![
            SyntaxKind::Variable,
            SyntaxKind::Block,
            SyntaxKind::ElifClause,
            SyntaxKind::ElifClause,
            SyntaxKind::ElseClause,
        ]
    );
}

#[test]
fn test_for_targets() {
    for source in [
        "for x in y: end",
        "for a, b in y: end",
        "for (a, b) in y: end",
    ] {
        let stmt = first_statement(source);
        assert_eq!(stmt.kind, SyntaxKind::ForStmt, "{source}");
    }
}

#[test]
fn test_try_needs_except() {
    let err = parse("try: x; end").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::MissingExcept);
}

#[test]
fn test_try_with_clauses() {
    let stmt = first_statement(
        "try: x; except ValueError, TypeError as e: y; except: z; end",
    );
    assert_eq!(
        kinds(&stmt),
        vec![
            SyntaxKind::Block,
            SyntaxKind::ExceptClause,
            SyntaxKind::ExceptClause
        ]
    );
}

#[test]
fn test_function_and_lambda() {
    let def = first_statement("def f(a, b=1): return a + b; end");
    assert_eq!(def.kind, SyntaxKind::FuncDef);
    let params = def.nodes().next().unwrap();
    assert_eq!(
        kinds(params),
        vec![SyntaxKind::Param, SyntaxKind::DefaultParam]
    );

    let lambda = expr_of("def (x, *rest): return x; end;");
    assert_eq!(lambda.kind, SyntaxKind::Lambda);
}

#[test]
fn test_missing_semicolon_reports_position() {
    let err = parse("x = 1\ny = 2;").unwrap_err();
    assert_eq!(err.span, Span::new(2, 1));
    assert!(err.to_string().starts_with("SyntaxError"));
}

#[test]
fn test_lex_errors_surface_as_parse_errors() {
    let err = parse("x = 'open;").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::Lex(_)));
    assert_eq!(err.line(), 1);
    assert_eq!(err.column(), 5);
}

#[test]
fn test_deep_nesting_does_not_overflow() {
    let depth = 2000;
    let source = format!("{}1{};", "(".repeat(depth), ")".repeat(depth));
    assert!(parse(&source).is_ok());
}
