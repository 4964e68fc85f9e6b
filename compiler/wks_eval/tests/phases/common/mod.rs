//! Shared helpers for phase tests.

use wks_eval::{buffer_handler, EvalError, Interpreter, ScriptError, ScriptModule};
use wks_parse::ParseError;

/// An interpreter that captures `print` output.
pub fn interpreter() -> Interpreter {
    Interpreter::builder()
        .module_name("Test")
        .print_handler(buffer_handler())
        .build()
}

/// Run `source`, panicking on any error.
pub fn run_ok(source: &str) -> (ScriptModule, String) {
    let interpreter = interpreter();
    match interpreter.run(source) {
        Ok(module) => (module, interpreter.output()),
        Err(err) => panic!("script failed at {}:{}: {err}", err.line(), err.column()),
    }
}

/// Printed output of a script that must succeed.
pub fn output_of(source: &str) -> String {
    run_ok(source).1
}

/// The runtime error a script fails with.
pub fn runtime_error(source: &str) -> EvalError {
    match interpreter().run(source) {
        Err(ScriptError::Runtime(err)) => err,
        Err(ScriptError::Syntax(err)) => panic!("expected runtime error, got syntax error: {err}"),
        Ok(_) => panic!("script succeeded"),
    }
}

/// The parse error a script is rejected with.
pub fn syntax_error(source: &str) -> ParseError {
    match interpreter().run(source) {
        Err(ScriptError::Syntax(err)) => err,
        Err(ScriptError::Runtime(err)) => panic!("expected syntax error, got runtime error: {err}"),
        Ok(_) => panic!("script succeeded"),
    }
}
