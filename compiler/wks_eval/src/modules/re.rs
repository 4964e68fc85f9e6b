//! `re`: regular expressions over the `regex` crate.
//!
//! Match results are tuples `(whole, group1, ...)` with `null` for groups
//! that did not participate, or `null` when nothing matched.

use regex::{Captures, Regex, RegexBuilder};

use crate::errors::{value_error, wrong_arg_type, EvalResult};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

const IGNORECASE: i64 = 2;
const MULTILINE: i64 = 8;
const DOTALL: i64 = 16;

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "re",
    members: &[
        Member::constant("IGNORECASE", || Value::Int(IGNORECASE)),
        Member::constant("I", || Value::Int(IGNORECASE)),
        Member::constant("MULTILINE", || Value::Int(MULTILINE)),
        Member::constant("M", || Value::Int(MULTILINE)),
        Member::constant("DOTALL", || Value::Int(DOTALL)),
        Member::constant("S", || Value::Int(DOTALL)),
        Member::function("match", match_),
        Member::function("search", search),
        Member::function("fullmatch", fullmatch),
        Member::function("findall", findall),
        Member::function("sub", sub),
        Member::function("split", split),
        Member::function("escape", escape),
    ],
};

fn compile(pattern: &str, flags: i64) -> EvalResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(flags & IGNORECASE != 0)
        .multi_line(flags & MULTILINE != 0)
        .dot_matches_new_line(flags & DOTALL != 0)
        .build()
        .map_err(|err| value_error(format!("invalid regular expression: {err}")))
}

/// `flags` from the named argument or positional slot `index`.
fn flags(func: &str, args: &Args, index: usize) -> EvalResult<i64> {
    match args.param(index, "flags") {
        None => Ok(0),
        Some(value) => value.as_int(func),
    }
}

fn match_tuple(caps: &Captures<'_>) -> Value {
    Value::tuple(
        caps.iter()
            .map(|group| group.map_or(Value::Null, |m| Value::str(m.as_str())))
            .collect(),
    )
}

/// Shared driver for `match`, `search` and `fullmatch`.
fn find_with(func: &str, args: &Args, wrap: fn(&str) -> String) -> EvalResult {
    args.between(func, 2, 3)?;
    args.only_named(func, &["flags"])?;
    let pattern = args.str(func, 0)?;
    let text = args.str(func, 1)?;
    let regex = compile(&wrap(pattern), flags(func, args, 2)?)?;
    Ok(regex
        .captures(text)
        .map_or(Value::Null, |caps| match_tuple(&caps)))
}

fn match_(_: &Evaluator<'_>, args: Args) -> EvalResult {
    find_with("match", &args, |p| format!(r"\A(?:{p})"))
}

fn search(_: &Evaluator<'_>, args: Args) -> EvalResult {
    find_with("search", &args, str::to_string)
}

fn fullmatch(_: &Evaluator<'_>, args: Args) -> EvalResult {
    find_with("fullmatch", &args, |p| format!(r"\A(?:{p})\z"))
}

/// `findall(pattern, string, flags=0)`: strings when the pattern has at
/// most one group, tuples of groups otherwise.
fn findall(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("findall", 2, 3)?;
    args.only_named("findall", &["flags"])?;
    let regex = compile(args.str("findall", 0)?, flags("findall", &args, 2)?)?;
    let text = args.str("findall", 1)?;
    let group_text = |caps: &Captures<'_>, i: usize| {
        Value::str(caps.get(i).map_or("", |m| m.as_str()))
    };
    let groups = regex.captures_len() - 1;
    let found = regex
        .captures_iter(text)
        .map(|caps| match groups {
            0 => group_text(&caps, 0),
            1 => group_text(&caps, 1),
            n => Value::tuple((1..=n).map(|i| group_text(&caps, i)).collect()),
        })
        .collect();
    Ok(Value::list(found))
}

/// Rewrite `\1` and `\g<name>` group references into `regex` syntax,
/// escaping literal `$`.
fn expand_template(repl: &str) -> String {
    let mut out = String::with_capacity(repl.len());
    let mut chars = repl.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '$' => out.push_str("$$"),
            '\\' => match chars.peek().copied() {
                Some(d) if d.is_ascii_digit() => {
                    let mut digits = String::new();
                    while let Some(d) = chars.peek().copied().filter(char::is_ascii_digit) {
                        digits.push(d);
                        chars.next();
                    }
                    out.push_str(&format!("${{{digits}}}"));
                }
                Some('g') => {
                    chars.next();
                    if chars.peek() == Some(&'<') {
                        chars.next();
                        let name: String = chars.by_ref().take_while(|c| *c != '>').collect();
                        out.push_str(&format!("${{{name}}}"));
                    } else {
                        out.push_str("\\g");
                    }
                }
                Some('\\') => {
                    chars.next();
                    out.push('\\');
                }
                _ => out.push('\\'),
            },
            c => out.push(c),
        }
    }
    out
}

/// `sub(pattern, repl, string, count=0, flags=0)`. `repl` may be a
/// callable receiving the match tuple.
fn sub(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("sub", 3, 5)?;
    args.only_named("sub", &["count", "flags"])?;
    let regex = compile(args.str("sub", 0)?, flags("sub", &args, 4)?)?;
    let text = args.str("sub", 2)?;
    let count = match args.param(3, "count") {
        None => 0,
        Some(value) => value.as_int("sub")?,
    };
    let limit = usize::try_from(count).ok().filter(|n| *n > 0);
    let repl = &args.positional[1];
    let template = match repl {
        Value::Str(s) => Some(expand_template(s)),
        Value::Function(_) | Value::Builtin(_) | Value::BoundMethod(_) => None,
        other => return Err(wrong_arg_type("sub", "str or callable", other.type_name())),
    };

    let mut out = String::with_capacity(text.len());
    let mut last = 0;
    for caps in regex.captures_iter(text).take(limit.unwrap_or(usize::MAX)) {
        let Some(whole) = caps.get(0) else { continue };
        out.push_str(&text[last..whole.start()]);
        match &template {
            Some(template) => caps.expand(template, &mut out),
            None => {
                let replacement = ev.call_value(repl, Args::new(vec![match_tuple(&caps)]))?;
                out.push_str(&replacement.to_str());
            }
        }
        last = whole.end();
    }
    out.push_str(&text[last..]);
    Ok(Value::str(out))
}

/// `split(pattern, string, maxsplit=0, flags=0)`; captured groups are
/// included between the pieces.
fn split(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("split", 2, 4)?;
    args.only_named("split", &["maxsplit", "flags"])?;
    let regex = compile(args.str("split", 0)?, flags("split", &args, 3)?)?;
    let text = args.str("split", 1)?;
    let maxsplit = match args.param(2, "maxsplit") {
        None => 0,
        Some(value) => value.as_int("split")?,
    };
    let limit = usize::try_from(maxsplit).ok().filter(|n| *n > 0);

    let mut pieces = Vec::new();
    let mut last = 0;
    for caps in regex.captures_iter(text).take(limit.unwrap_or(usize::MAX)) {
        let Some(whole) = caps.get(0) else { continue };
        pieces.push(Value::str(&text[last..whole.start()]));
        pieces.extend(
            caps.iter()
                .skip(1)
                .map(|group| group.map_or(Value::Null, |m| Value::str(m.as_str()))),
        );
        last = whole.end();
    }
    pieces.push(Value::str(&text[last..]));
    Ok(Value::list(pieces))
}

fn escape(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("escape", 1)?;
    Ok(Value::str(regex::escape(args.str("escape", 0)?)))
}

#[cfg(test)]
mod tests {
    use super::expand_template;
    use pretty_assertions::assert_eq;

    #[test]
    fn group_references_are_rewritten() {
        assert_eq!(expand_template(r"\2-\1"), "${2}-${1}");
        assert_eq!(expand_template(r"<\g<word>>"), "<${word}>");
        assert_eq!(expand_template("cost: $5"), "cost: $$5");
        assert_eq!(expand_template(r"a\\b"), r"a\b");
    }
}
