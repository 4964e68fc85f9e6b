use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;

use crate::common::{output_of, runtime_error};

#[test]
fn function_locals_shadow_outer_names() {
    assert_eq!(
        output_of("x = 1; def f(): x = 2; return x; end print(f(), x);"),
        "2 1\n"
    );
}

#[test]
fn function_locals_do_not_leak() {
    let err = runtime_error("def f(): local = 1; end f(); print(local);");
    assert_eq!(err.kind, ExceptionKind::NameError);
    assert_eq!(err.message, "name 'local' is not defined");
}

#[test]
fn undefined_names_report_their_position() {
    let err = runtime_error("x = 1;\nprint(y);");
    assert_eq!(err.kind, ExceptionKind::NameError);
    assert_eq!((err.line(), err.column()), (2, 7));
    assert_eq!(err.to_string(), "NameError: name 'y' is not defined (line 2, column 7)");
}

#[test]
fn builtins_can_be_shadowed() {
    assert_eq!(output_of("len = 3; print(len);"), "3\n");
}

#[test]
fn deleting_an_outer_variable_fails() {
    let err = runtime_error("x = 1; def f(): del x; end f();");
    assert_eq!(err.kind, ExceptionKind::NameError);
    assert!(err.message.contains("enclosing scope"), "{}", err.message);

    assert_eq!(runtime_error("del print;").kind, ExceptionKind::NameError);
}

#[test]
fn deleting_in_the_defining_scope_succeeds() {
    let err = runtime_error("y = 1; del y; print(y);");
    assert_eq!(err.kind, ExceptionKind::NameError);
    assert_eq!(err.message, "name 'y' is not defined");

    assert_eq!(
        output_of("def f(): v = 1; del v; return 'ok'; end print(f());"),
        "ok\n"
    );
    assert_eq!(runtime_error("del never;").kind, ExceptionKind::NameError);
}

#[test]
fn deleting_items() {
    assert_eq!(
        output_of("d = {'a': 1, 'b': 2}; del d['a']; xs = [1, 2, 3]; del xs[0]; print(d, xs);"),
        "{'b': 2} [2, 3]\n"
    );
    assert_eq!(runtime_error("d = {}; del d['a'];").kind, ExceptionKind::KeyError);
    assert_eq!(runtime_error("t = (1,); del t[0];").kind, ExceptionKind::TypeError);
}
