use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;

use crate::common::{output_of, run_ok, runtime_error};

#[test]
fn compound_assignment_on_variables() {
    let (module, _) = run_ok("x = 5; x += 3;");
    assert_eq!(module.get("x").unwrap().repr(), "8");

    assert_eq!(
        output_of(
            "y = 6; y &= 3; y |= 8; y ^= 1; y <<= 2; y >>= 1;
             z = 7; z //= 2; z **= 3; z %= 10; z -= 1; z *= 4;
             f = 1; f /= 4;
             s = 'ab'; s += 'c';
             print(y, z, f, s);"
        ),
        "22 24 0.25 abc\n"
    );
}

#[test]
fn compound_assignment_reads_targets_fresh() {
    assert_eq!(
        output_of(
            "ns = namespace(count=1); ns.count += 2;
             xs = [1, 2]; xs[0] += 10; xs[-1] -= len(xs);
             d = {'k': 1}; d['k'] *= 5;
             print(ns.count, xs, d);"
        ),
        "3 [11, 0] {'k': 5}\n"
    );
}

#[test]
fn compound_assignment_to_missing_names_fails() {
    assert_eq!(runtime_error("nope += 1;").kind, ExceptionKind::NameError);
    assert_eq!(runtime_error("d = {}; d['k'] += 1;").kind, ExceptionKind::KeyError);
}

#[test]
fn unpacking_binds_in_order() {
    let (module, _) = run_ok("a, b = (1, 2); c, d = [a + 10, b + 10]; e, f = 'xy';");
    let values: Vec<String> = ["a", "b", "c", "d", "e", "f"]
        .iter()
        .map(|name| module.get(name).unwrap().to_str())
        .collect();
    assert_eq!(values, vec!["1", "2", "11", "12", "x", "y"]);
}

#[test]
fn unpacking_arity_is_checked() {
    let too_many = runtime_error("a, b = (1, 2, 3);");
    assert_eq!(too_many.kind, ExceptionKind::ValueError);
    assert_eq!(too_many.message, "too many values to unpack (expected 2)");

    let too_few = runtime_error("a, b, c = (1, 2);");
    assert_eq!(too_few.kind, ExceptionKind::ValueError);
    assert_eq!(
        too_few.message,
        "not enough values to unpack (expected 3, got 2)"
    );

    assert_eq!(runtime_error("a, b = 5;").kind, ExceptionKind::TypeError);
}

#[test]
fn item_assignment_on_immutables_fails() {
    assert_eq!(runtime_error("t = (1, 2); t[0] = 3;").kind, ExceptionKind::TypeError);
    assert_eq!(runtime_error("s = 'ab'; s[0] = 'x';").kind, ExceptionKind::TypeError);
    assert_eq!(runtime_error("xs = [1]; xs[5] = 0;").kind, ExceptionKind::IndexError);
}
