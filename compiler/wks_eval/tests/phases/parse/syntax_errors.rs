use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;
use wks_parse::ParseErrorKind;

use crate::common::{runtime_error, syntax_error};

#[test]
fn errors_carry_line_and_column() {
    let err = syntax_error("x = 1;\ny = ;");
    assert_eq!(err.line(), 2);
    assert_eq!(err.column(), 5);
}

#[test]
fn comparisons_do_not_chain() {
    let err = syntax_error("ok = 1 < 2 < 3;");
    assert!(matches!(err.kind, ParseErrorKind::UnexpectedToken { .. }));
}

#[test]
fn variadic_and_defaults_cannot_mix() {
    let err = syntax_error("def f(a=1, *rest): return a; end");
    assert!(matches!(err.kind, ParseErrorKind::InvalidParameters(_)));

    let err = syntax_error("g = def (a=1, *rest): return a; end;");
    assert!(matches!(err.kind, ParseErrorKind::InvalidParameters(_)));
}

#[test]
fn invalid_targets() {
    assert!(matches!(
        syntax_error("1 = 2;").kind,
        ParseErrorKind::InvalidAssignmentTarget
    ));
    assert!(matches!(
        syntax_error("f(a=1, 2);").kind,
        ParseErrorKind::PositionalAfterNamed
    ));
    assert!(matches!(
        syntax_error("try: x = 1; end").kind,
        ParseErrorKind::MissingExcept
    ));
}

#[test]
fn nothing_runs_when_parsing_fails() {
    let interpreter = crate::common::interpreter();
    assert!(interpreter.run("print('before'); )").is_err());
    assert_eq!(interpreter.output(), "");
}

#[test]
fn stray_signals_at_top_level_are_syntax_errors() {
    for source in ["return 1;", "break;", "if true: continue; end"] {
        let err = runtime_error(source);
        assert_eq!(err.kind, ExceptionKind::SyntaxError, "{source}");
        assert!(err.message.starts_with("unexpected statement"), "{source}");
    }
}
