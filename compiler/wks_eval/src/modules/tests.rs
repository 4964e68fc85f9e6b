#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::errors::ExceptionKind;
use crate::print_handler::buffer_handler;
use crate::{Interpreter, ScriptError};
use pretty_assertions::assert_eq;

fn output_of(source: &str) -> String {
    let interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    if let Err(err) = interpreter.run(source) {
        panic!("script failed: {err}");
    }
    interpreter.output()
}

fn error_kind(source: &str) -> ExceptionKind {
    let interpreter = Interpreter::builder()
        .print_handler(buffer_handler())
        .build();
    match interpreter.run(source) {
        Err(ScriptError::Runtime(err)) => err.kind,
        Err(other) => panic!("expected runtime error, got {other}"),
        Ok(_) => panic!("script succeeded"),
    }
}

#[test]
fn module_members_are_read_only() {
    assert_eq!(
        error_kind("m = import_module('math'); m.pi = 3;"),
        ExceptionKind::AttributeError
    );
    assert_eq!(
        error_kind("m = import_module('math'); x = m.__dict__;"),
        ExceptionKind::AttributeError
    );
    assert_eq!(error_kind("m = import_module('os');"), ExceptionKind::ImportError);
}

// math

#[test]
fn math_functions() {
    assert_eq!(
        output_of(
            "m = import_module('math');
             print(m.sqrt(16), m.floor(2.7), m.ceil(2.1), m.trunc(-2.7), m.factorial(5), m.gcd(12, 18));
             print(m.isclose(0.1 + 0.2, 0.3), m.isnan(m.nan), m.isinf(m.inf), m.fabs(-2));"
        ),
        "4.0 2 3 -2 120 6\ntrue true true 2.0\n"
    );
}

#[test]
fn math_domain_errors() {
    assert_eq!(
        error_kind("m = import_module('math'); m.sqrt(-1);"),
        ExceptionKind::ValueError
    );
    assert_eq!(
        error_kind("m = import_module('math'); m.factorial(-1);"),
        ExceptionKind::ValueError
    );
    assert_eq!(
        error_kind("m = import_module('math'); m.exp(1000);"),
        ExceptionKind::OverflowError
    );
}

// re

#[test]
fn re_matching() {
    assert_eq!(
        output_of(
            r"re = import_module('re');
              print(re.match('a(b)', 'abc'), re.match('b', 'abc'), re.search('b', 'abc'));
              print(re.fullmatch('\\d+', '123'), re.fullmatch('\\d+', '123x'));
              print(re.search('B', 'abc', re.IGNORECASE));"
        ),
        "('ab', 'b') null ('b',)\n('123',) null\n('b',)\n"
    );
}

#[test]
fn re_findall_follows_group_count() {
    assert_eq!(
        output_of(
            r"re = import_module('re');
              print(re.findall('\\d+', 'a1b22'), re.findall('(\\w)=(\\d)', 'a=1 b=2'));"
        ),
        "['1', '22'] [('a', '1'), ('b', '2')]\n"
    );
}

#[test]
fn re_sub_and_split() {
    assert_eq!(
        output_of(
            r"re = import_module('re');
              print(re.sub('(\\w)(\\d)', '\\2\\1', 'a1 b2'));
              print(re.sub('\\d', def (m): return str(int(m[0]) * 2); end, 'a1b4'));
              print(re.sub('a', 'x', 'aaa', 2));
              print(re.split(',\\s*', 'a, b,c'), re.split('(-)', 'x-y'));"
        ),
        "1a 2b\na2b8\nxxa\n['a', 'b', 'c'] ['x', '-', 'y']\n"
    );
}

#[test]
fn re_invalid_pattern() {
    assert_eq!(
        error_kind("re = import_module('re'); re.search('(', 'x');"),
        ExceptionKind::ValueError
    );
}

// json

#[test]
fn json_dumps() {
    assert_eq!(
        output_of(
            "json = import_module('json');
             print(json.dumps({'b': [1, 2.5, null], 'a': true}));
             print(json.dumps((1, 'x\"y')));
             print(json.dumps([1], indent=2));"
        ),
        "{\"a\": true, \"b\": [1, 2.5, null]}\n[1, \"x\\\"y\"]\n[\n  1\n]\n"
    );
}

#[test]
fn json_rejects_unencodable_values() {
    assert_eq!(
        error_kind("json = import_module('json'); json.dumps(float('nan'));"),
        ExceptionKind::ValueError
    );
    assert_eq!(
        error_kind("json = import_module('json'); json.dumps({1, 2});"),
        ExceptionKind::TypeError
    );
}

#[test]
fn json_indent_width_is_bounded() {
    assert_eq!(
        output_of("json = import_module('json'); print(json.dumps([1], indent=-3));"),
        "[\n1\n]\n"
    );
    assert_eq!(
        error_kind("json = import_module('json'); json.dumps([1], indent=10 ** 12);"),
        ExceptionKind::ValueError
    );
    assert_eq!(
        error_kind("json = import_module('json'); json.dumps([1], indent=' ' * 65);"),
        ExceptionKind::ValueError
    );
}

#[test]
fn json_rejects_self_containing_values() {
    assert_eq!(
        error_kind("json = import_module('json'); a = [1]; a.append(a); json.dumps(a);"),
        ExceptionKind::OverflowError
    );
    assert_eq!(
        error_kind("json = import_module('json'); d = {}; d['d'] = d; json.dumps(d, indent=2);"),
        ExceptionKind::OverflowError
    );
}

// string, statistics, textwrap, collections

#[test]
fn string_module() {
    assert_eq!(
        output_of(
            "s = import_module('string');
             print(s.digits, s.ascii_uppercase[:3], s.capwords('hello  wide world'), s.capwords('a-b', '-'));"
        ),
        "0123456789 ABC Hello Wide World A-B\n"
    );
}

#[test]
fn statistics_module() {
    assert_eq!(
        output_of(
            "st = import_module('statistics');
             print(st.mean([1, 2, 3]), st.mean([1, 2]), st.median([3, 1, 2]), st.median([1, 2, 3, 4]));
             print(st.median_low([1, 2, 3, 4]), st.median_high([1, 2, 3, 4]), st.mode([1, 2, 2, 3]));
             print(st.pvariance([1, 2, 3, 4]), st.variance([2, 4, 6]));"
        ),
        "2 1.5 2 2.5\n2 3 2\n1.25 4.0\n"
    );
    assert_eq!(
        error_kind("st = import_module('statistics'); st.mean([]);"),
        ExceptionKind::ValueError
    );
    assert_eq!(
        error_kind("st = import_module('statistics'); st.variance([1]);"),
        ExceptionKind::ValueError
    );
}

#[test]
fn textwrap_module() {
    assert_eq!(
        output_of(
            "tw = import_module('textwrap');
             print(tw.wrap('the quick brown fox', 10));
             print(tw.fill('the quick brown fox', width=10));
             print(tw.shorten('Hello  world, how are you', 15));
             print(repr(tw.dedent('  a\\n    b')), repr(tw.indent('a\\n\\nb', '> ')));"
        ),
        "['the quick', 'brown fox']\nthe quick\nbrown fox\nHello [...]\n'a\\n  b' '> a\\n\\n> b'\n"
    );
}

#[test]
fn collections_module() {
    assert_eq!(
        output_of(
            "c = import_module('collections');
             counts = c.Counter('abca');
             print(counts, c.most_common(counts, 1));
             print(c.OrderedDict([('x', 1)], y=2));"
        ),
        "{'a': 2, 'b': 1, 'c': 1} [('a', 2)]\n{'x': 1, 'y': 2}\n"
    );
}

// html

#[test]
fn html_escaping() {
    assert_eq!(
        output_of(
            "h = import_module('html');
             print(h.escape('<a href=\"x\">'), h.escape('\"', quote=false));
             print(h.unescape('&lt;&amp;&#65;&#x42;&eacute;&bogus;'));"
        ),
        "&lt;a href=&quot;x&quot;&gt; \"\n<&ABé&bogus;\n"
    );
}

#[test]
fn html_submodules() {
    assert_eq!(
        output_of(
            "h = import_module('html');
             print(h.entities.name2codepoint['amp'], h.entities.codepoint2name[60]);
             print(h.parser.tokenize('<b>hi</b>'));"
        ),
        "38 lt\n[('starttag', 'b', []), ('data', 'hi'), ('endtag', 'b')]\n"
    );
}

// time zones

#[test]
fn datetime_from_fixed_timestamp() {
    assert_eq!(
        output_of(
            "dt = import_module('datetime');
             d = dt.fromtimestamp(0, 'UTC');
             print(d.year, d.month, d.day, d.hour, d.tzname, dt.weekday(d));
             print(dt.isoformat(d), dt.strftime(d, '%Y/%m/%d'));"
        ),
        "1970 1 1 0 UTC 3\n1970-01-01T00:00:00+00:00 1970/01/01\n"
    );
}

#[test]
fn datetime_strptime_is_naive() {
    assert_eq!(
        output_of(
            "dt = import_module('datetime');
             d = dt.strptime('2024-03-05', '%Y-%m-%d');
             print(d.tzname, dt.weekday(d), dt.isoformat(d, ' '));"
        ),
        "null 1 2024-03-05 00:00:00\n"
    );
    assert_eq!(
        error_kind("dt = import_module('datetime'); dt.strptime('nope', '%Y');"),
        ExceptionKind::ValueError
    );
    assert_eq!(
        error_kind("dt = import_module('datetime'); dt.fromtimestamp(0, 'Mars/Base');"),
        ExceptionKind::KeyError
    );
}

#[test]
fn zoneinfo_module() {
    assert_eq!(
        output_of(
            "z = import_module('zoneinfo');
             print(z.utcoffset('Asia/Tokyo', 0), z.convert(0, 'Asia/Tokyo', '%H:%M'));
             print('Europe/Paris' in z.available_timezones());"
        ),
        "32400 09:00\ntrue\n"
    );
}

// random, time, unicodedata

#[test]
fn random_is_reproducible_after_seed() {
    assert_eq!(
        output_of(
            "r = import_module('random');
             r.seed(42); a = [r.random(), r.randint(1, 6)];
             r.seed(42); b = [r.random(), r.randint(1, 6)];
             xs = [1, 2, 3, 4]; r.shuffle(xs);
             print(a == b, sorted(xs), len(r.sample(xs, 2)), r.choice([7]));"
        ),
        "true [1, 2, 3, 4] 2 7\n"
    );
    assert_eq!(
        error_kind("r = import_module('random'); r.choice([]);"),
        ExceptionKind::IndexError
    );
}

#[test]
fn time_is_positive() {
    assert_eq!(
        output_of("t = import_module('time'); print(t.time() > 0, t.monotonic() >= 0);"),
        "true true\n"
    );
}

#[test]
fn unicodedata_module() {
    assert_eq!(
        output_of(
            "u = import_module('unicodedata');
             print(u.category('A'), u.category('7'), u.decimal('7'), u.numeric('½'));"
        ),
        "Lu Nd 7 0.5\n"
    );
}
