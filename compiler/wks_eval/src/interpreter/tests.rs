#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::ExceptionKind;
use crate::print_handler::{buffer_handler, silent_handler};
use pretty_assertions::assert_eq;

#[test]
fn builder_defaults() {
    let interpreter = Interpreter::new();
    assert_eq!(interpreter.module_name(), "__main__");
    assert_eq!(interpreter.max_depth(), DEFAULT_MAX_DEPTH);
    assert!(interpreter.imports_enabled());
}

#[test]
fn max_depth_is_clamped_to_one() {
    let interpreter = Interpreter::builder().max_depth(0).build();
    assert_eq!(interpreter.max_depth(), 1);
}

#[test]
fn run_uses_configured_module_name() {
    let interpreter = Interpreter::builder()
        .module_name("Page")
        .print_handler(silent_handler())
        .build();
    let module = interpreter.run("x = 1;").unwrap();
    assert_eq!(module.name(), "Page");
}

#[test]
fn output_is_captured_across_runs() {
    let interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    interpreter.run("print('one');").unwrap();
    interpreter.run("print('two', end='');").unwrap();
    assert_eq!(interpreter.output(), "one\ntwo");
}

#[test]
fn silent_handler_captures_nothing() {
    let interpreter = Interpreter::builder()
        .print_handler(silent_handler())
        .build();
    interpreter.run("print('hidden');").unwrap();
    assert_eq!(interpreter.output(), "");
}

#[test]
fn disabled_imports_raise_import_error() {
    let interpreter = Interpreter::builder()
        .imports_enabled(false)
        .print_handler(silent_handler())
        .build();
    let err = interpreter.import_module("math").unwrap_err();
    assert_eq!(err.kind, ExceptionKind::ImportError);

    match interpreter.run("m = import_module('math');") {
        Err(ScriptError::Runtime(err)) => assert_eq!(err.kind, ExceptionKind::ImportError),
        other => panic!("expected ImportError, got {:?}", other.map(|m| m.name().to_string())),
    }
}

#[test]
fn import_module_materialises_registry_modules() {
    let interpreter = Interpreter::new();
    let math = interpreter.import_module("math").unwrap();
    assert_eq!(math.repr(), "<module 'math'>");
    assert_eq!(
        interpreter.import_module("nope").unwrap_err().kind,
        ExceptionKind::ImportError
    );
}

#[test]
fn depth_limit_applies_to_script_calls() {
    let interpreter = Interpreter::builder()
        .max_depth(10)
        .print_handler(silent_handler())
        .build();
    let source = "def down(n): if n == 0: return 0; end return down(n - 1); end\nx = down(8);";
    interpreter.run(source).unwrap();

    let deeper = "def down(n): if n == 0: return 0; end return down(n - 1); end\nx = down(20);";
    match interpreter.run(deeper) {
        Err(ScriptError::Runtime(err)) => assert_eq!(err.kind, ExceptionKind::OverflowError),
        other => panic!("expected OverflowError, got {:?}", other.map(|m| m.name().to_string())),
    }
}

#[test]
fn syntax_errors_are_reported_before_execution() {
    let interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    let err = interpreter.run("print('ran'); x = ;").unwrap_err();
    assert!(matches!(err, ScriptError::Syntax(_)));
    assert_eq!(interpreter.output(), "");
}
