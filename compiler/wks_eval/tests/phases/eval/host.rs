use pretty_assertions::assert_eq;
use wks_eval::{compile, run, silent_handler, ExceptionKind, Interpreter, ScriptError, Value};

use crate::common::run_ok;

#[test]
fn public_variables_are_readable() {
    let (module, output) = run_ok("total = 2 + 3; print(total); def helper(): end");
    assert_eq!(output, "5\n");
    assert_eq!(module.name(), "Test");
    assert_eq!(module.get("total").unwrap().repr(), "5");
    assert!(matches!(module.get("helper").unwrap(), Value::Function(_)));
}

#[test]
fn private_and_missing_variables_fail_alike() {
    let (module, _) = run_ok("_secret = 1;");
    let private = module.get("_secret").unwrap_err();
    let missing = module.get("nothing").unwrap_err();
    assert_eq!(private.kind, ExceptionKind::AttributeError);
    assert_eq!(missing.kind, ExceptionKind::AttributeError);
    // Built-ins live in the parent scope and are not module variables.
    assert!(module.get("print").is_err());
}

#[test]
fn every_external_write_fails() {
    let (module, _) = run_ok("public = 1; _private = 2;");
    for name in ["public", "_private", "new_name"] {
        let err = module.set(name, Value::Int(9)).unwrap_err();
        assert_eq!(err.kind, ExceptionKind::AttributeError, "{name}");
    }
    assert_eq!(module.get("public").unwrap().repr(), "1");
}

#[test]
fn public_variables_are_sorted_and_filtered() {
    let (module, _) = run_ok("b = 2; a = 1; _c = 3;");
    let listed: Vec<(String, String)> = module
        .public_variables()
        .into_iter()
        .map(|(name, value)| (name, value.repr()))
        .collect();
    assert_eq!(
        listed,
        vec![("a".to_string(), "1".to_string()), ("b".to_string(), "2".to_string())]
    );
}

#[test]
fn compile_then_execute() {
    let interpreter = Interpreter::builder().print_handler(silent_handler()).build();
    let mut module = compile("Page", "x = 40 + 2;").unwrap();
    assert_eq!(module.statements().len(), 1);
    assert!(module.get("x").is_err());
    module.execute(&interpreter).unwrap();
    assert_eq!(module.get("x").unwrap().repr(), "42");
}

#[test]
fn runtime_errors_report_position() {
    let interpreter = Interpreter::builder().print_handler(silent_handler()).build();
    let err = run("Page", "x = 1;\n\ny = x // 0;", &interpreter).unwrap_err();
    assert!(matches!(err, ScriptError::Runtime(_)));
    assert_eq!(err.line(), 3);
}

#[test]
fn separate_runs_do_not_share_state() {
    let interpreter = Interpreter::builder().print_handler(silent_handler()).build();
    run("One", "shared = 1;", &interpreter).unwrap();
    let err = run("Two", "print(shared);", &interpreter).unwrap_err();
    assert!(matches!(err, ScriptError::Runtime(ref e) if e.kind == ExceptionKind::NameError));
}
