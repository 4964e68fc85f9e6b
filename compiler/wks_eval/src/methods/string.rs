//! `str` methods. Positions are counted in characters, not bytes.

use crate::errors::{value_error, wrong_arg_type, EvalResult};
use crate::value::{Args, Value};

use super::format_template;

pub(super) fn call(s: &str, name: &str, args: Args) -> EvalResult {
    let qualified = format!("str.{name}");
    let func = qualified.as_str();
    match name {
        "upper" => {
            args.exact(func, 0)?;
            Ok(Value::str(s.to_uppercase()))
        }
        "lower" => {
            args.exact(func, 0)?;
            Ok(Value::str(s.to_lowercase()))
        }
        "title" => {
            args.exact(func, 0)?;
            Ok(Value::str(title_case(s)))
        }
        "capitalize" => {
            args.exact(func, 0)?;
            let mut chars = s.chars();
            let capitalized = match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.as_str().to_lowercase().chars()).collect(),
                None => String::new(),
            };
            Ok(Value::str(capitalized))
        }
        "strip" | "lstrip" | "rstrip" => {
            args.between(func, 0, 1)?;
            args.no_named(func)?;
            let chars = optional_str(&args, func, 0)?;
            let matches = |c: char| match chars {
                Some(set) => set.contains(c),
                None => c.is_whitespace(),
            };
            let stripped = match name {
                "strip" => s.trim_matches(matches),
                "lstrip" => s.trim_start_matches(matches),
                _ => s.trim_end_matches(matches),
            };
            Ok(Value::str(stripped))
        }
        "split" => {
            args.between(func, 0, 2)?;
            args.only_named(func, &["sep", "maxsplit"])?;
            let sep = match args.param(0, "sep") {
                None | Some(Value::Null) => None,
                Some(Value::Str(sep)) => Some(sep.clone()),
                Some(other) => return Err(wrong_arg_type(func, "str", other.type_name())),
            };
            let maxsplit = match args.param(1, "maxsplit") {
                None => -1,
                Some(value) => value.as_int(func)?,
            };
            let parts = split(s, sep.as_deref(), maxsplit)?;
            Ok(Value::list(parts.into_iter().map(Value::str).collect()))
        }
        "splitlines" => {
            args.exact(func, 0)?;
            Ok(Value::list(s.lines().map(Value::str).collect()))
        }
        "join" => {
            args.exact(func, 1)?;
            let mut joined = String::new();
            for (i, item) in args.positional[0].iter()?.enumerate() {
                if i > 0 {
                    joined.push_str(s);
                }
                match item {
                    Value::Str(part) => joined.push_str(&part),
                    other => {
                        return Err(wrong_arg_type(func, "iterable of str", other.type_name()))
                    }
                }
            }
            Ok(Value::str(joined))
        }
        "replace" => {
            args.between(func, 2, 3)?;
            args.no_named(func)?;
            let old = args.str(func, 0)?;
            let new = args.str(func, 1)?;
            let count = match args.get(2) {
                Some(value) => value.as_int(func)?,
                None => -1,
            };
            let replaced = match usize::try_from(count) {
                Ok(count) => s.replacen(old, new, count),
                Err(_) => s.replace(old, new),
            };
            Ok(Value::str(replaced))
        }
        "startswith" | "endswith" => {
            args.exact(func, 1)?;
            let candidates = match &args.positional[0] {
                Value::Tuple(items) => items.to_vec(),
                other => vec![other.clone()],
            };
            for candidate in candidates {
                let Value::Str(affix) = candidate else {
                    return Err(wrong_arg_type(func, "str", candidate.type_name()));
                };
                let hit = if name == "startswith" {
                    s.starts_with(&*affix)
                } else {
                    s.ends_with(&*affix)
                };
                if hit {
                    return Ok(Value::Bool(true));
                }
            }
            Ok(Value::Bool(false))
        }
        "find" | "rfind" | "index" => {
            args.exact(func, 1)?;
            let needle = args.str(func, 0)?;
            let found = if name == "rfind" {
                s.rfind(needle)
            } else {
                s.find(needle)
            };
            match found {
                Some(byte) => Ok(Value::Int(char_index(s, byte))),
                None if name == "index" => Err(value_error("substring not found")),
                None => Ok(Value::Int(-1)),
            }
        }
        "count" => {
            args.exact(func, 1)?;
            let needle = args.str(func, 0)?;
            let count = if needle.is_empty() {
                s.chars().count() + 1
            } else {
                s.matches(needle).count()
            };
            Ok(Value::Int(i64::try_from(count).unwrap_or(i64::MAX)))
        }
        "isdigit" | "isalpha" | "isalnum" | "isspace" => {
            args.exact(func, 0)?;
            let test: fn(char) -> bool = match name {
                "isdigit" => |c| c.is_numeric(),
                "isalpha" => char::is_alphabetic,
                "isalnum" => char::is_alphanumeric,
                _ => char::is_whitespace,
            };
            Ok(Value::Bool(!s.is_empty() && s.chars().all(test)))
        }
        "isupper" | "islower" => {
            args.exact(func, 0)?;
            let mut cased = s.chars().filter(|c| c.is_uppercase() || c.is_lowercase());
            let upper = name == "isupper";
            let mut any = false;
            let all = cased.all(|c| {
                any = true;
                c.is_uppercase() == upper
            });
            Ok(Value::Bool(any && all))
        }
        "zfill" => {
            args.exact(func, 1)?;
            let width = width_arg(&args, func)?;
            let len = s.chars().count();
            if len >= width {
                return Ok(Value::str(s));
            }
            let (sign, digits) = match s.strip_prefix(|c: char| c == '+' || c == '-') {
                Some(rest) => (&s[..1], rest),
                None => ("", s),
            };
            Ok(Value::str(format!("{sign}{}{digits}", "0".repeat(width - len))))
        }
        "center" | "ljust" | "rjust" => {
            args.between(func, 1, 2)?;
            args.no_named(func)?;
            let width = width_arg(&args, func)?;
            let fill = match optional_str(&args, func, 1)? {
                Some(fill) if fill.chars().count() == 1 => fill.chars().next().unwrap_or(' '),
                Some(_) => {
                    return Err(value_error(
                        "the fill character must be exactly one character long",
                    ))
                }
                None => ' ',
            };
            let len = s.chars().count();
            let padding = width.saturating_sub(len);
            let (left, right) = match name {
                "ljust" => (0, padding),
                "rjust" => (padding, 0),
                _ => {
                    let left = padding / 2 + (padding & width & 1);
                    (left, padding - left)
                }
            };
            let pad = |n: usize| std::iter::repeat(fill).take(n).collect::<String>();
            Ok(Value::str(format!("{}{s}{}", pad(left), pad(right))))
        }
        "format" => format_template(s, &args).map(Value::str),
        _ => Err(crate::errors::attribute_not_allowed("str", name)),
    }
}

fn optional_str<'a>(args: &'a Args, func: &str, index: usize) -> EvalResult<Option<&'a str>> {
    match args.get(index) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Str(s)) => Ok(Some(s)),
        Some(other) => Err(wrong_arg_type(func, "str", other.type_name())),
    }
}

fn width_arg(args: &Args, func: &str) -> EvalResult<usize> {
    Ok(usize::try_from(args.int(func, 0)?).unwrap_or(0))
}

fn char_index(s: &str, byte: usize) -> i64 {
    i64::try_from(s[..byte].chars().count()).unwrap_or(i64::MAX)
}

/// Uppercase the first letter of every cased run, lowercase the rest.
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut previous_cased = false;
    for c in s.chars() {
        if previous_cased {
            out.extend(c.to_lowercase());
        } else {
            out.extend(c.to_uppercase());
        }
        previous_cased = c.is_alphabetic();
    }
    out
}

/// `str.split` semantics: `None` splits on whitespace runs and drops empty
/// parts; a separator splits exactly. `maxsplit < 0` means unlimited.
pub(crate) fn split(s: &str, sep: Option<&str>, maxsplit: i64) -> EvalResult<Vec<String>> {
    let limit = usize::try_from(maxsplit).ok();
    match sep {
        Some("") => Err(value_error("empty separator")),
        Some(sep) => Ok(match limit {
            Some(limit) => s.splitn(limit + 1, sep).map(str::to_string).collect(),
            None => s.split(sep).map(str::to_string).collect(),
        }),
        None => {
            let mut parts = Vec::new();
            let mut rest = s.trim_start();
            while !rest.is_empty() {
                if limit.is_some_and(|limit| parts.len() >= limit) {
                    parts.push(rest.to_string());
                    break;
                }
                match rest.find(char::is_whitespace) {
                    Some(end) => {
                        parts.push(rest[..end].to_string());
                        rest = rest[end..].trim_start();
                    }
                    None => {
                        parts.push(rest.to_string());
                        break;
                    }
                }
            }
            Ok(parts)
        }
    }
}
