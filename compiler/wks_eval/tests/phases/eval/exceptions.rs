use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;

use crate::common::{output_of, runtime_error};

#[test]
fn except_binds_the_message() {
    assert_eq!(
        output_of("try: raise ValueError(\"x\"); except ValueError as e: print(e); end"),
        "x\n"
    );
}

#[test]
fn unmatched_exceptions_propagate() {
    let err = runtime_error(
        "try: raise KeyError('k'); except ValueError: print('wrong handler'); end",
    );
    assert_eq!(err.kind, ExceptionKind::KeyError);
    assert_eq!(err.message, "k");
}

#[test]
fn first_matching_handler_wins() {
    assert_eq!(
        output_of(
            "try: 1 // 0; except ArithmeticError: print('arith'); except ZeroDivisionError: print('zero'); end"
        ),
        "arith\n"
    );
}

#[test]
fn handler_type_lists() {
    assert_eq!(
        output_of(
            "for xs in [[], {}]:
                 try: xs[0];
                 except (KeyError, IndexError) as e: print(type(xs), 'lookup failed');
                 end
             end"
        ),
        "list lookup failed\ndict lookup failed\n"
    );
    assert_eq!(
        output_of("try: [][1]; except KeyError, IndexError: print('caught'); end"),
        "caught\n"
    );
    assert_eq!(output_of("try: undefined; except: print('bare'); end"), "bare\n");
}

#[test]
fn host_failures_are_catchable() {
    assert_eq!(
        output_of(
            "try: int('x'); except ValueError as e: print('bad int'); end
             try: 'a' + 1; except TypeError: print('bad add'); end
             try: [].nope; except AttributeError: print('no attr'); end"
        ),
        "bad int\nbad add\nno attr\n"
    );
}

#[test]
fn raising_classes_and_instances() {
    assert_eq!(runtime_error("raise KeyError;").kind, ExceptionKind::KeyError);
    let err = runtime_error("err = NotImplementedError('later'); raise err;");
    assert_eq!(err.kind, ExceptionKind::NotImplementedError);
    assert_eq!(err.message, "later");
    assert_eq!(
        output_of("try: raise NotImplementedError('x'); except RuntimeError: print('parent'); end"),
        "parent\n"
    );
}

#[test]
fn raising_non_exceptions_is_a_type_error() {
    assert_eq!(runtime_error("raise 5;").kind, ExceptionKind::TypeError);
    assert_eq!(
        runtime_error("try: 1 // 0; except 5: print('no'); end").kind,
        ExceptionKind::TypeError
    );
}

#[test]
fn errors_inside_handlers_propagate() {
    let err = runtime_error("try: 1 // 0; except ZeroDivisionError: raise ValueError('again'); end");
    assert_eq!(err.kind, ExceptionKind::ValueError);
    assert_eq!(err.message, "again");
}

#[test]
fn exception_values_expose_message_and_args() {
    assert_eq!(
        output_of(
            "e = ValueError('bad'); f = ValueError('bad', 2);
             print(e.message, f.args, repr(f), isinstance(e, LookupError), isinstance(e, Exception));"
        ),
        "bad ('bad', 2) ValueError('bad', 2) false true\n"
    );
}
