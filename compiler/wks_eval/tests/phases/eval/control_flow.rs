use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;

use crate::common::{output_of, runtime_error};

#[test]
fn for_unpacks_each_element_in_order() {
    assert_eq!(
        output_of("for (a, b) in [(1, 2), (3, 4)]: print(a, b); end"),
        "1 2\n3 4\n"
    );
    assert_eq!(
        output_of("for k, v in {'x': 1, 'y': 2}.items(): print(k, v); end"),
        "x 1\ny 2\n"
    );
}

#[test]
fn break_stops_before_later_elements() {
    assert_eq!(
        output_of("for (a, b) in [(1, 2), (3, 4)]: print(a, b); break; end print('done');"),
        "1 2\ndone\n"
    );
}

#[test]
fn for_unpack_arity_is_checked() {
    let err = runtime_error("for a, b in [(1, 2, 3)]: end");
    assert_eq!(err.kind, ExceptionKind::ValueError);
}

#[test]
fn while_reevaluates_its_condition() {
    assert_eq!(
        output_of(
            "i = 0; total = 0;
             while i < 5: i += 1; if i % 2 == 0: continue; end total += i; end
             print(i, total);"
        ),
        "5 9\n"
    );
}

#[test]
fn break_only_leaves_the_innermost_loop() {
    assert_eq!(
        output_of(
            "pairs = [];
             for i in range(3): for j in range(3): if j > i: break; end pairs.append((i, j)); end end
             print(len(pairs));"
        ),
        "6\n"
    );
}

#[test]
fn return_passes_through_loops() {
    assert_eq!(
        output_of(
            "def first_even(xs): for x in xs: if x % 2 == 0: return x; end end return null; end
             print(first_even([1, 3, 4, 6]), first_even([1]));"
        ),
        "4 null\n"
    );
}

#[test]
fn if_elif_else_chain() {
    assert_eq!(
        output_of(
            "def sign(n): if n < 0: return -1; elif n == 0: return 0; else: return 1; end end
             print(sign(-5), sign(0), sign(9));"
        ),
        "-1 0 1\n"
    );
}

#[test]
fn logical_operators_short_circuit() {
    assert_eq!(
        output_of(
            "def boom(): raise RuntimeError('evaluated'); end
             print(false and boom(), true or boom(), 0 or 'x', 1 and 2, not []);"
        ),
        "false true x 2 true\n"
    );
}

#[test]
fn signals_outside_loops_fail_inside_functions() {
    let err = runtime_error("def f(): break; end f();");
    assert_eq!(err.kind, ExceptionKind::SyntaxError);
}
