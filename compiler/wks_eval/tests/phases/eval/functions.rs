use pretty_assertions::assert_eq;
use wks_eval::ExceptionKind;

use crate::common::{output_of, runtime_error};

#[test]
fn defaults_and_named_arguments() {
    assert_eq!(
        output_of(
            "def f(a, b=10): return a + b; end
             print(f(1), f(1, 2), f(b=3, a=1));"
        ),
        "11 3 4\n"
    );
}

#[test]
fn defaults_are_evaluated_at_call_time() {
    assert_eq!(
        output_of(
            "base = 1; def g(x=base): return x; end base = 2;
             def fresh(xs=[]): xs.append(1); return len(xs); end
             print(g(), fresh(), fresh());"
        ),
        "2 1 1\n"
    );
}

#[test]
fn variadic_collects_a_tuple() {
    assert_eq!(
        output_of(
            "def h(a, *rest): return rest; end
             print(h(1), h(1, 2, 3));"
        ),
        "() (2, 3)\n"
    );
}

#[test]
fn arity_errors_are_type_errors() {
    let define = "def f(a, b=1): return a; end\n";
    for call in ["f();", "f(1, 2, 3);", "f(1, c=2);", "f(1, a=2);"] {
        let err = runtime_error(&format!("{define}{call}"));
        assert_eq!(err.kind, ExceptionKind::TypeError, "{call}");
    }
    assert_eq!(
        runtime_error("def h(a, *rest): end h();").kind,
        ExceptionKind::TypeError
    );
}

#[test]
fn named_functions_see_later_bindings() {
    assert_eq!(
        output_of("x = 1; def get(): return x; end x = 2; print(get());"),
        "2\n"
    );
}

#[test]
fn anonymous_functions_capture_a_scope_copy() {
    assert_eq!(
        output_of("x = 1; f = def (): return x; end; x = 2; print(f(), x);"),
        "1 2\n"
    );
    assert_eq!(
        output_of(
            "def make(n): return def (m): return n * m; end; end
             double = make(2); triple = make(3);
             print(double(5), triple(5));"
        ),
        "10 15\n"
    );
}

#[test]
fn recursion_works_below_the_limit() {
    assert_eq!(
        output_of(
            "def fib(n): return n < 2 ? n : fib(n - 1) + fib(n - 2); end
             def down(n): return n == 0 ? 'bottom' : down(n - 1); end
             print(fib(15), down(400));"
        ),
        "610 bottom\n"
    );
}

#[test]
fn recursion_past_the_limit_is_an_overflow_error() {
    let err = runtime_error("def f(n): return f(n + 1); end f(0);");
    assert_eq!(err.kind, ExceptionKind::OverflowError);

    assert_eq!(
        output_of(
            "def f(n): return f(n + 1); end
             try: f(0); except OverflowError: print('too deep'); end
             print(f.__name__);"
        ),
        "too deep\nf\n"
    );
}

#[test]
fn functions_without_return_give_null() {
    assert_eq!(output_of("def f(): x = 1; end print(f());"), "null\n");
    assert_eq!(output_of("def f(): return; end print(f());"), "null\n");
}

#[test]
fn calling_non_callables_fails() {
    assert_eq!(runtime_error("x = 1; x();").kind, ExceptionKind::TypeError);
}
