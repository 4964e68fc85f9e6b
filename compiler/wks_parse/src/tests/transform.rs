//! Lowering tests: concrete tree to typed AST.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use pretty_assertions::assert_eq;
use wks_ir::{
    AssignOp, BinaryOp, Expression, ExpressionKind, Literal, LogicalOp, LoopTarget, ParamKind,
    Span, StatementKind, UnaryOp,
};

use crate::{parse_module, ParseErrorKind};

fn statement(source: &str) -> StatementKind {
    let mut stmts = parse_module(source).expect("parse failed");
    assert_eq!(stmts.len(), 1, "{source}");
    stmts.remove(0).kind
}

fn expression(source: &str) -> Expression {
    match statement(source) {
        StatementKind::Expression(expr) => expr,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn int(value: i64, line: i32, column: i32) -> Expression {
    Expression::new(
        ExpressionKind::Literal(Literal::Int(value)),
        Span::new(line, column),
    )
}

#[test]
fn test_literals() {
    assert_eq!(expression("0x1F;"), int(31, 1, 1));
    assert_eq!(
        expression("'a\\tb';").kind,
        ExpressionKind::Literal(Literal::Str("a\tb".into()))
    );
    assert_eq!(
        expression("2.5;").kind,
        ExpressionKind::Literal(Literal::Float(2.5))
    );
}

#[test]
fn test_synthetic_spans() {
    let expr = expression("true;");
    assert_eq!(expr.span, Span::SYNTHETIC);
    assert_eq!(expr.kind, ExpressionKind::Literal(Literal::Bool(true)));
    assert_eq!(expression("null;").span, Span::SYNTHETIC);

    let stmts = parse_module("while true: break; continue; end").unwrap();
    let StatementKind::While { body, .. } = &stmts[0].kind else {
        panic!("expected while");
    };
    assert!(body.iter().all(|s| s.span == Span::SYNTHETIC));
}

#[test]
fn test_binary_operators_resolve() {
    let expr = expression("1 + 2 * 3;");
    assert_eq!(
        expr.kind,
        ExpressionKind::Binary {
            op: BinaryOp::Add,
            left: Box::new(int(1, 1, 1)),
            right: Box::new(Expression::new(
                ExpressionKind::Binary {
                    op: BinaryOp::Mul,
                    left: Box::new(int(2, 1, 5)),
                    right: Box::new(int(3, 1, 9)),
                },
                Span::new(1, 5),
            )),
        }
    );
}

#[test]
fn test_multi_token_comparisons() {
    for (source, op) in [
        ("a is not b;", BinaryOp::IsNot),
        ("a not in b;", BinaryOp::NotIn),
        ("a is b;", BinaryOp::Is),
        ("a in b;", BinaryOp::In),
        ("a >= b;", BinaryOp::GtEq),
    ] {
        let ExpressionKind::Binary { op: found, .. } = expression(source).kind else {
            panic!("{source}: expected binary");
        };
        assert_eq!(found, op, "{source}");
    }
}

#[test]
fn test_logical_and_unary() {
    assert!(matches!(
        expression("a or b and c;").kind,
        ExpressionKind::Logical {
            op: LogicalOp::Or,
            ..
        }
    ));
    assert!(matches!(
        expression("not a;").kind,
        ExpressionKind::Unary {
            op: UnaryOp::Not,
            ..
        }
    ));
    assert!(matches!(
        expression("~a;").kind,
        ExpressionKind::Unary {
            op: UnaryOp::BitNot,
            ..
        }
    ));
}

#[test]
fn test_assignment_forms() {
    assert!(matches!(
        statement("x **= 2;"),
        StatementKind::SetVariable {
            op: AssignOp::Compound(BinaryOp::Pow),
            ..
        }
    ));
    let StatementKind::SetProperty { property, op, .. } = statement("o.name = 1;") else {
        panic!("expected property assignment");
    };
    assert_eq!(property, "name");
    assert_eq!(op, AssignOp::Assign);
    assert!(matches!(
        statement("l[i] -= 1;"),
        StatementKind::SetItem {
            op: AssignOp::Compound(BinaryOp::Sub),
            ..
        }
    ));
}

#[test]
fn test_unpack_names() {
    let StatementKind::Unpack { names, .. } = statement("a, b, c = t;") else {
        panic!("expected unpack");
    };
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_loop_targets() {
    let StatementKind::For { target, .. } = statement("for x in y: end") else {
        panic!("expected for");
    };
    assert_eq!(target, LoopTarget::Single("x".into()));

    let StatementKind::For { target, .. } = statement("for (a, b) in y: end") else {
        panic!("expected for");
    };
    assert_eq!(target, LoopTarget::Unpack(vec!["a".into(), "b".into()]));
}

#[test]
fn test_except_types_are_flattened() {
    let StatementKind::Try { handlers, .. } =
        statement("try: x; except (A, B) as e: y; except C, D: z; except: w; end")
    else {
        panic!("expected try");
    };
    assert_eq!(handlers.len(), 3);
    assert_eq!(handlers[0].types.len(), 2);
    assert_eq!(handlers[0].name.as_deref(), Some("e"));
    assert_eq!(handlers[1].types.len(), 2);
    assert_eq!(handlers[1].name, None);
    assert!(handlers[2].types.is_empty());
}

#[test]
fn test_slice_parts() {
    let ExpressionKind::GetItem { index, .. } = expression("x[:5:2];").kind else {
        panic!("expected item access");
    };
    let ExpressionKind::Slice { start, end, step } = index.kind else {
        panic!("expected slice");
    };
    assert!(start.is_none());
    assert_eq!(end.map(|e| *e), Some(int(5, 1, 4)));
    assert_eq!(step.map(|e| *e), Some(int(2, 1, 6)));
}

#[test]
fn test_call_arguments() {
    let ExpressionKind::Call { args, kwargs, .. } = expression("f(1, 2, sep='-');").kind else {
        panic!("expected call");
    };
    assert_eq!(args.len(), 2);
    assert_eq!(kwargs.len(), 1);
    assert_eq!(kwargs[0].0, "sep");
}

#[test]
fn test_function_declaration() {
    let StatementKind::FunctionDef(decl) = statement("def add(a, b=2): return a + b; end") else {
        panic!("expected def");
    };
    assert_eq!(decl.name.as_deref(), Some("add"));
    assert_eq!(decl.params.len(), 2);
    assert!(matches!(decl.params[1].kind, ParamKind::Default(_)));
    assert_eq!(decl.body.len(), 1);

    let ExpressionKind::Lambda(decl) = expression("def (*xs): return xs; end;").kind else {
        panic!("expected lambda");
    };
    assert_eq!(decl.name, None);
    assert_eq!(decl.params[0].kind, ParamKind::Variadic);
}

#[test]
fn test_variadic_with_defaults_is_rejected() {
    let err = parse_module("def f(a=1, *rest): end").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::InvalidParameters(_)));
}

#[test]
fn test_variadic_must_be_last() {
    let err = parse_module("def f(*rest, a): end").unwrap_err();
    assert!(matches!(err.kind, ParseErrorKind::InvalidParameters(_)));
}

#[test]
fn test_statement_spans_follow_first_token() {
    let stmts = parse_module("x = 1;\n  if x: y; end").unwrap();
    assert_eq!(stmts[0].span, Span::new(1, 1));
    assert_eq!(stmts[1].span, Span::new(2, 3));
}
