use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;

use crate::common::{output_of, runtime_error};

#[test]
fn underscore_attributes_are_denied_everywhere() {
    for source in [
        "'abc'._private;",
        "[].__class__;",
        "print.__globals__;",
        "ns = namespace(); ns._x = 1;",
        "m = import_module('math'); m._secret;",
    ] {
        let err = runtime_error(source);
        assert_eq!(err.kind, ExceptionKind::AttributeError, "{source}");
    }
}

#[test]
fn denied_and_missing_attributes_look_alike() {
    let denied = runtime_error("ns = namespace(a=1); ns._a;");
    let missing = runtime_error("ns = namespace(a=1); ns.b;");
    assert_eq!(denied.message, "'namespace' object has no attribute '_a'");
    assert_eq!(missing.message, "'namespace' object has no attribute 'b'");
}

#[test]
fn introspection_names_are_allowed() {
    assert_eq!(
        output_of("def f(): end print(f.__name__, print.__name__, ValueError.__name__);"),
        "f print ValueError\n"
    );
}

#[test]
fn only_namespaces_accept_attribute_writes() {
    assert_eq!(
        output_of("ns = namespace(a=1); ns.b = 2; ns.a += 1; print(ns.a, ns.b);"),
        "2 2\n"
    );
    assert_eq!(runtime_error("xs = []; xs.size = 1;").kind, ExceptionKind::AttributeError);
    assert_eq!(
        runtime_error("m = import_module('math'); m.pi = 3;").kind,
        ExceptionKind::AttributeError
    );
}
