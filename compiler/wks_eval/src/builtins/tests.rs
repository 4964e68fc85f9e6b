#![allow(clippy::unwrap_used, clippy::expect_used)]

use super::*;
use crate::errors::ExceptionKind;
use crate::print_handler::buffer_handler;
use crate::Interpreter;
use pretty_assertions::assert_eq;

/// Run `source` and return what it printed.
fn output_of(source: &str) -> String {
    let interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    interpreter.run(source).unwrap();
    interpreter.output()
}

fn error_kind(source: &str) -> ExceptionKind {
    let interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    match interpreter.run(source) {
        Err(crate::ScriptError::Runtime(err)) => err.kind,
        Err(other) => panic!("expected runtime error, got {other}"),
        Ok(_) => panic!("script succeeded"),
    }
}

#[test]
fn builtins_scope_binds_functions_and_exceptions() {
    let scope = builtins_scope();
    assert!(scope.contains("print"));
    assert!(scope.contains("import_module"));
    assert!(scope.contains("ZeroDivisionError"));
    assert!(!scope.contains("open"));
}

#[test]
fn builtin_names_are_sorted_and_unique() {
    let names = builtin_names();
    let mut sorted = names.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(names, sorted);
}

#[test]
fn print_honours_sep_and_end() {
    assert_eq!(output_of("print(1, 'a', true);"), "1 a true\n");
    assert_eq!(output_of("print(1, 2, sep='-', end='!');"), "1-2!");
    assert_eq!(output_of("print();"), "\n");
}

#[test]
fn len_counts_characters_and_items() {
    assert_eq!(
        output_of("print(len('héllo'), len([1, 2]), len({1: 2}), len(range(0, 10, 3)));"),
        "5 2 1 4\n"
    );
    assert_eq!(error_kind("len(5);"), ExceptionKind::TypeError);
}

#[test]
fn range_forms() {
    assert_eq!(output_of("print(list(range(3)));"), "[0, 1, 2]\n");
    assert_eq!(output_of("print(list(range(5, 0, -2)));"), "[5, 3, 1]\n");
    assert_eq!(error_kind("range(1, 2, 0);"), ExceptionKind::ValueError);
}

#[test]
fn sorted_with_key_and_reverse() {
    assert_eq!(
        output_of("print(sorted(['bb', 'a', 'ccc'], key=len, reverse=true));"),
        "['ccc', 'bb', 'a']\n"
    );
    assert_eq!(error_kind("sorted([1, 'a']);"), ExceptionKind::TypeError);
}

#[test]
fn enumerate_zip_reversed() {
    assert_eq!(
        output_of("print(enumerate('ab', start=1));"),
        "[(1, 'a'), (2, 'b')]\n"
    );
    assert_eq!(
        output_of("print(zip([1, 2, 3], 'ab'));"),
        "[(1, 'a'), (2, 'b')]\n"
    );
    assert_eq!(output_of("print(reversed((1, 2, 3)));"), "[3, 2, 1]\n");
}

#[test]
fn any_and_all() {
    assert_eq!(
        output_of("print(any([0, '', 3]), all([1, 0]), all([]));"),
        "true false true\n"
    );
}

#[test]
fn min_max_with_key_and_default() {
    assert_eq!(output_of("print(min(3, 1, 2), max([3, 1, 2]));"), "1 3\n");
    assert_eq!(
        output_of("print(max(['a', 'ccc', 'bb'], key=len));"),
        "ccc\n"
    );
    assert_eq!(output_of("print(min([], default='none'));"), "none\n");
    assert_eq!(error_kind("max([]);"), ExceptionKind::ValueError);
}

#[test]
fn sum_round_divmod_pow() {
    assert_eq!(output_of("print(sum([1, 2, 3]), sum([0.5], 1));"), "6 1.5\n");
    assert_eq!(
        output_of("print(round(2.5), round(3.5), round(1.256, 2), round(1234, -2));"),
        "2 4 1.26 1200\n"
    );
    assert_eq!(output_of("print(divmod(-7, 2));"), "(-4, 1)\n");
    assert_eq!(output_of("print(pow(2, 10), pow(3, 4, 5), pow(2, -1));"), "1024 1 0.5\n");
}

#[test]
fn abs_overflow_is_reported() {
    assert_eq!(output_of("print(abs(-3), abs(-1.5));"), "3 1.5\n");
    assert_eq!(
        error_kind("abs(-9223372036854775807 - 1);"),
        ExceptionKind::OverflowError
    );
}

#[test]
fn conversions() {
    assert_eq!(
        output_of("print(int('0x1f', 0), int(' 42 '), int(3.9), float('1e3'), bool([]));"),
        "31 42 3 1000.0 false\n"
    );
    assert_eq!(output_of("print(int('ff', 16), int('1_000'));"), "255 1000\n");
    assert_eq!(error_kind("int('abc');"), ExceptionKind::ValueError);
    assert_eq!(output_of("print(str(1.0), repr('a'));"), "1.0 'a'\n");
}

#[test]
fn container_constructors() {
    assert_eq!(output_of("print(list('ab'), tuple([1]));"), "['a', 'b'] (1,)\n");
    assert_eq!(
        output_of("print(dict([('b', 2), ('a', 1)]), dict(x=1));"),
        "{'a': 1, 'b': 2} {'x': 1}\n"
    );
    assert_eq!(output_of("print(set([3, 1, 3]), set());"), "{1, 3} set()\n");
}

#[test]
fn namespace_fields_are_settable() {
    assert_eq!(
        output_of("ns = namespace(a=1); ns.b = 2; ns.a += 10; print(ns, ns.a);"),
        "namespace(a=11, b=2) 11\n"
    );
}

#[test]
fn type_and_isinstance() {
    assert_eq!(
        output_of("print(type(1), type('x'), type(null), type(ValueError('v')));"),
        "int str null ValueError\n"
    );
    assert_eq!(
        output_of("e = KeyError('k'); print(isinstance(e, LookupError), isinstance(e, (TypeError, ValueError)));"),
        "true false\n"
    );
    assert_eq!(output_of("print(isinstance(1, 'int'));"), "true\n");
}

#[test]
fn character_and_radix_helpers() {
    assert_eq!(
        output_of("print(chr(65), ord('a'), hex(255), oct(8), bin(-5));"),
        "A 97 0xff 0o10 -0b101\n"
    );
    assert_eq!(error_kind("ord('ab');"), ExceptionKind::TypeError);
}

#[test]
fn hash_agrees_for_equal_keys() {
    assert_eq!(output_of("print(hash(1) == hash(1.0), hash('a') == hash('a'));"), "true true\n");
    assert_eq!(error_kind("hash([]);"), ExceptionKind::TypeError);
}

#[test]
fn format_builtin() {
    assert_eq!(
        output_of("print(format(3.14159, '.2f'), format(42, '>5'), format(1234567, ','));"),
        "3.14    42 1,234,567\n"
    );
}

#[test]
fn builtins_can_be_shadowed() {
    assert_eq!(
        output_of("def len(x): return 99; end print(len([]));"),
        "99\n"
    );
}
