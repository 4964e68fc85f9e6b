//! `unicodedata`: character properties derived from the standard library's
//! Unicode tables. Categories outside letters, digits, separators and ASCII
//! punctuation are approximated.

use crate::errors::{type_error, value_error, EvalResult};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "unicodedata",
    members: &[
        Member::constant("unidata_version", || {
            let (major, minor, update) = char::UNICODE_VERSION;
            Value::str(format!("{major}.{minor}.{update}"))
        }),
        Member::function("category", category),
        Member::function("decimal", decimal),
        Member::function("digit", digit),
        Member::function("numeric", numeric),
        Member::function("mirrored", mirrored),
    ],
};

/// The single-character argument.
fn character(func: &str, args: &Args) -> EvalResult<char> {
    let text = args.str(func, 0)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(type_error(format!(
            "{func}() argument must be a unicode character, not str"
        ))),
    }
}

fn ascii_punctuation_category(c: char) -> &'static str {
    match c {
        '(' | '[' | '{' => "Ps",
        ')' | ']' | '}' => "Pe",
        '-' => "Pd",
        '_' => "Pc",
        '$' => "Sc",
        '+' | '<' | '=' | '>' | '|' | '~' => "Sm",
        '^' | '`' => "Sk",
        _ => "Po",
    }
}

fn category_of(c: char) -> &'static str {
    match c {
        '\u{2028}' => "Zl",
        '\u{2029}' => "Zp",
        c if c.is_control() => "Cc",
        c if c.is_whitespace() => "Zs",
        c if c.is_uppercase() => "Lu",
        c if c.is_lowercase() => "Ll",
        c if c.is_alphabetic() => "Lo",
        c if c.is_ascii_digit() => "Nd",
        c if c.is_numeric() => "No",
        c if c.is_ascii_punctuation() => ascii_punctuation_category(c),
        '\u{E000}'..='\u{F8FF}' => "Co",
        _ => "So",
    }
}

fn category(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("category", 1)?;
    Ok(Value::str(category_of(character("category", &args)?)))
}

fn superscript_digit(c: char) -> Option<u32> {
    match c {
        '\u{2070}' => Some(0),
        '\u{00B9}' => Some(1),
        '\u{00B2}' => Some(2),
        '\u{00B3}' => Some(3),
        '\u{2074}'..='\u{2079}' => Some(u32::from(c) - 0x2070),
        '\u{2080}'..='\u{2089}' => Some(u32::from(c) - 0x2080),
        _ => None,
    }
}

fn vulgar_fraction(c: char) -> Option<f64> {
    Some(match c {
        '\u{00BC}' => 0.25,
        '\u{00BD}' => 0.5,
        '\u{00BE}' => 0.75,
        '\u{2153}' => 1.0 / 3.0,
        '\u{2154}' => 2.0 / 3.0,
        '\u{215B}' => 0.125,
        _ => return None,
    })
}

/// Shared driver: the property value, else `default`, else `ValueError`.
fn lookup(func: &str, args: &Args, property: impl Fn(char) -> Option<Value>) -> EvalResult {
    args.between(func, 1, 2)?;
    args.no_named(func)?;
    let c = character(func, args)?;
    match (property(c), args.get(1)) {
        (Some(value), _) => Ok(value),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(value_error(format!("not a {func}"))),
    }
}

fn decimal(_: &Evaluator<'_>, args: Args) -> EvalResult {
    lookup("decimal", &args, |c| c.to_digit(10).map(|d| Value::Int(i64::from(d))))
}

fn digit(_: &Evaluator<'_>, args: Args) -> EvalResult {
    lookup("digit", &args, |c| {
        c.to_digit(10)
            .or_else(|| superscript_digit(c))
            .map(|d| Value::Int(i64::from(d)))
    })
}

fn numeric(_: &Evaluator<'_>, args: Args) -> EvalResult {
    lookup("numeric", &args, |c| {
        c.to_digit(10)
            .or_else(|| superscript_digit(c))
            .map(f64::from)
            .or_else(|| vulgar_fraction(c))
            .map(Value::Float)
    })
}

fn mirrored(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("mirrored", 1)?;
    let c = character("mirrored", &args)?;
    let is_mirrored = matches!(
        c,
        '(' | ')' | '<' | '>' | '[' | ']' | '{' | '}' | '«' | '»' | '‹' | '›' | '≤' | '≥' | '∈'
            | '∉' | '⊂' | '⊃' | '⊆' | '⊇'
    );
    Ok(Value::Int(i64::from(is_mirrored)))
}

#[cfg(test)]
mod tests {
    use super::category_of;
    use pretty_assertions::assert_eq;

    #[test]
    fn common_categories() {
        assert_eq!(category_of('A'), "Lu");
        assert_eq!(category_of('é'), "Ll");
        assert_eq!(category_of('7'), "Nd");
        assert_eq!(category_of(' '), "Zs");
        assert_eq!(category_of('\n'), "Cc");
        assert_eq!(category_of('('), "Ps");
        assert_eq!(category_of('$'), "Sc");
        assert_eq!(category_of('!'), "Po");
    }
}
