use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;

use crate::common::{output_of, runtime_error};

const TWO_CYCLES: &str = "a = []; a.append(a); b = []; b.append(b);";

#[test]
fn comparing_distinct_cycles_is_a_catchable_overflow() {
    assert_eq!(
        output_of(&format!(
            "{TWO_CYCLES}
             try: print(a == b); except OverflowError as e: print('caught', e); end"
        )),
        "caught maximum nesting depth exceeded in comparison\n"
    );
}

#[test]
fn ordering_distinct_cycles_overflows() {
    for expr in ["a < b", "a != b", "a in [b]", "sorted([a, b])", "max(a, b)"] {
        let err = runtime_error(&format!("{TWO_CYCLES} x = {expr};"));
        assert_eq!(err.kind, ExceptionKind::OverflowError, "{expr}");
    }
}

#[test]
fn a_cycle_compares_equal_to_itself() {
    assert_eq!(
        output_of(
            "a = [1]; a.append(a);
             print(a == a, a != a, a < a, a <= a, a in [a], len(sorted([a, a])));"
        ),
        "true false false true true 2\n"
    );
}

#[test]
fn self_containing_dicts() {
    let source = "d = {}; d['me'] = d; e = {}; e['me'] = e;";
    assert_eq!(
        output_of(&format!("{source} print(d == d, d in [d], len(d));")),
        "true true 1\n"
    );
    assert_eq!(
        runtime_error(&format!("{source} x = d == e;")).kind,
        ExceptionKind::OverflowError
    );
}

#[test]
fn deep_acyclic_nesting_still_compares() {
    assert_eq!(
        output_of(
            "x = 0; y = 0;
             for i in range(300): x = [x]; y = [y]; end
             print(x == y, [x, 1] < [y, 2]);"
        ),
        "true true\n"
    );
}
