use pretty_assertions::assert_eq;

use crate::common::output_of;

#[test]
fn integer_radixes() {
    assert_eq!(
        output_of("print(0x1F, 0o17, 0b101, 1_000, 0xff_ff, 42);"),
        "31 15 5 1000 65535 42\n"
    );
}

#[test]
fn float_forms() {
    assert_eq!(
        output_of("print(1.5, 1e3, 2.5E-3, 0.1 + 0.2);"),
        "1.5 1000.0 0.0025 0.30000000000000004\n"
    );
}

#[test]
fn unicode_escapes_decode_before_char_escapes() {
    assert_eq!(
        output_of(r#"s = "\u0041\n"; print(len(s), s == "A" + chr(10));"#),
        "2 true\n"
    );
    assert_eq!(
        output_of(r#"print(len("\U0001F600"), ord("\U0001F600"));"#),
        "1 128512\n"
    );
}

#[test]
fn char_escapes() {
    assert_eq!(
        output_of(r#"print(repr("a\tb"), len("\\n"), "say \"hi\"", 'it\'s');"#),
        "'a\\tb' 2 say \"hi\" it's\n"
    );
}

#[test]
fn container_literals() {
    assert_eq!(
        output_of("print((), (1,), (1, 2), [], {}, {2, 1}, {'b': 2, 'a': 1});"),
        "() (1,) (1, 2) [] {} {1, 2} {'a': 1, 'b': 2}\n"
    );
    assert_eq!(output_of("print(true, false, null);"), "true false null\n");
}

#[test]
fn slice_forms() {
    assert_eq!(
        output_of(
            "xs = [0, 1, 2, 3, 4, 5];
             print(xs[1:3], xs[::2], xs[1::2], xs[:4:2], xs[::-1], xs[-2:], xs[:]);"
        ),
        "[1, 2] [0, 2, 4] [1, 3, 5] [0, 2] [5, 4, 3, 2, 1, 0] [4, 5] [0, 1, 2, 3, 4, 5]\n"
    );
    assert_eq!(output_of("print('hello'[1:4], (1, 2, 3)[1:]);"), "ell (2, 3)\n");
}

#[test]
fn comments_and_whitespace_are_ignored() {
    assert_eq!(
        output_of("# leading comment\nx =\n  1;   # trailing\nprint(x);"),
        "1\n"
    );
}

#[test]
fn ternary_is_right_associative() {
    assert_eq!(
        output_of("n = 5; print(n < 0 ? 'neg' : n == 0 ? 'zero' : 'pos');"),
        "pos\n"
    );
}
