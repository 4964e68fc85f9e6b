//! Conversions and introspection: `str`, `int`, `dict`, `isinstance`, ...

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};

use rustc_hash::FxHasher;

use crate::errors::{integer_overflow, type_error, value_error, wrong_arg_type, EvalResult};
use crate::interpreter::Evaluator;
use crate::methods::{format_value, hash_all, pairs_of};
use crate::value::{Args, HashKey, Value};

pub(super) fn str(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("str", 0, 1)?;
    args.no_named("str")?;
    Ok(match args.get(0) {
        Some(value) => Value::str(value.to_str()),
        None => Value::str(""),
    })
}

pub(super) fn repr(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("repr", 1)?;
    Ok(Value::str(args.positional[0].repr()))
}

/// `int(x=0, base=10)`.
pub(super) fn int(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("int", 0, 2)?;
    args.only_named("int", &["base"])?;
    let base = match args.param(1, "base") {
        Some(base) => Some(base.as_int("int")?),
        None => None,
    };
    match (args.get(0), base) {
        (None, _) => Ok(Value::Int(0)),
        (Some(Value::Str(text)), base) => parse_int(text, base.unwrap_or(10)).map(Value::Int),
        (Some(_), Some(_)) => Err(type_error("int() can't convert non-string with explicit base")),
        (Some(Value::Int(i)), None) => Ok(Value::Int(*i)),
        (Some(Value::Bool(b)), None) => Ok(Value::Int(i64::from(*b))),
        (Some(Value::Float(f)), None) => float_to_int(*f).map(Value::Int),
        (Some(other), None) => Err(wrong_arg_type("int", "str or number", other.type_name())),
    }
}

pub(crate) fn float_to_int(f: f64) -> EvalResult<i64> {
    if f.is_nan() {
        return Err(value_error("cannot convert float NaN to integer"));
    }
    let truncated = f.trunc();
    if truncated >= -9_223_372_036_854_775_808.0 && truncated < 9_223_372_036_854_775_808.0 {
        Ok(truncated as i64)
    } else {
        Err(integer_overflow("float conversion"))
    }
}

/// Parse an integer literal the way `int(text, base)` does. Base 0 infers
/// the base from a `0x`/`0o`/`0b` prefix.
fn parse_int(text: &str, base: i64) -> EvalResult<i64> {
    let invalid = || {
        value_error(format!(
            "invalid literal for int() with base {base}: {}",
            crate::value::quote_str(text)
        ))
    };
    if base != 0 && !(2..=36).contains(&base) {
        return Err(value_error("int() base must be >= 2 and <= 36, or 0"));
    }
    let trimmed = text.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let lower = unsigned.to_ascii_lowercase();
    let prefixed = |prefix: &str, radix: i64| {
        lower
            .strip_prefix(prefix)
            .filter(|_| base == 0 || base == radix)
            .map(|digits| (radix, digits.to_string()))
    };
    let (radix, digits) = prefixed("0x", 16)
        .or_else(|| prefixed("0o", 8))
        .or_else(|| prefixed("0b", 2))
        .unwrap_or((if base == 0 { 10 } else { base }, lower.clone()));
    if digits.is_empty() || digits.starts_with('_') || digits.ends_with('_') || digits.contains("__")
    {
        return Err(invalid());
    }
    let cleaned: String = digits.chars().filter(|c| *c != '_').collect();
    let radix = u32::try_from(radix).map_err(|_| invalid())?;
    let magnitude = u64::from_str_radix(&cleaned, radix).map_err(|_| invalid())?;
    let value = if negative {
        0i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    };
    value.ok_or_else(|| integer_overflow("int()"))
}

pub(super) fn float(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("float", 0, 1)?;
    args.no_named("float")?;
    match args.get(0) {
        None => Ok(Value::Float(0.0)),
        Some(Value::Str(text)) => {
            let cleaned: String = text.trim().chars().filter(|c| *c != '_').collect();
            cleaned.parse::<f64>().map(Value::Float).map_err(|_| {
                value_error(format!(
                    "could not convert string to float: {}",
                    crate::value::quote_str(text)
                ))
            })
        }
        Some(value) => value.as_float("float").map(Value::Float),
    }
}

pub(super) fn bool(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("bool", 0, 1)?;
    args.no_named("bool")?;
    Ok(Value::Bool(args.get(0).is_some_and(Value::is_truthy)))
}

pub(super) fn list(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("list", 0, 1)?;
    args.no_named("list")?;
    match args.get(0) {
        Some(iterable) => Ok(Value::list(iterable.to_vec()?)),
        None => Ok(Value::list(Vec::new())),
    }
}

pub(super) fn tuple(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("tuple", 0, 1)?;
    args.no_named("tuple")?;
    match args.get(0) {
        Some(Value::Tuple(items)) => Ok(Value::Tuple(items.clone())),
        Some(iterable) => Ok(Value::tuple(iterable.to_vec()?)),
        None => Ok(Value::tuple(Vec::new())),
    }
}

/// `dict(pairs_or_mapping=(), **entries)`.
pub(super) fn dict(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("dict", 0, 1)?;
    let mut entries = match args.get(0) {
        Some(source) => pairs_of(source)?,
        None => Vec::new(),
    };
    for (name, value) in &args.named {
        entries.push((HashKey::Str(name.as_str().into()), value.clone()));
    }
    Ok(Value::dict(entries.into_iter().collect()))
}

pub(super) fn set(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("set", 0, 1)?;
    args.no_named("set")?;
    match args.get(0) {
        Some(iterable) => Ok(Value::set(hash_all(iterable)?)),
        None => Ok(Value::set(Default::default())),
    }
}

/// `namespace(**fields)`: a mutable attribute bag.
pub(super) fn namespace(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("namespace", 0, 0)?;
    for (name, _) in &args.named {
        crate::sandbox::check_attribute("namespace", name)?;
    }
    let fields: BTreeMap<String, Value> = args.named.into_iter().collect();
    Ok(Value::namespace(fields))
}

/// `type(x)`: the name of the value's type.
pub(super) fn type_of(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("type", 1)?;
    Ok(Value::str(args.positional[0].type_name()))
}

/// `isinstance(value, class)`: exception values against exception classes
/// (or a tuple of them); anything else against a type name.
pub(super) fn isinstance(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("isinstance", 2)?;
    is_instance(&args.positional[0], &args.positional[1]).map(Value::Bool)
}

fn is_instance(value: &Value, class: &Value) -> EvalResult<bool> {
    match class {
        Value::ExceptionClass(kind) => Ok(match value {
            Value::Exception(exception) => exception.kind.is_subclass_of(*kind),
            _ => false,
        }),
        Value::Str(name) => Ok(value.type_name() == &**name),
        Value::Tuple(classes) => {
            for class in classes.iter() {
                if is_instance(value, class)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        other => Err(wrong_arg_type(
            "isinstance",
            "exception class, type name or tuple",
            other.type_name(),
        )),
    }
}

pub(super) fn chr(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("chr", 1)?;
    let code = args.int("chr", 0)?;
    u32::try_from(code)
        .ok()
        .and_then(char::from_u32)
        .map(|c| Value::str(c.encode_utf8(&mut [0; 4])))
        .ok_or_else(|| value_error("chr() arg not in range(0x110000)"))
}

pub(super) fn ord(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("ord", 1)?;
    let text = args.str("ord", 0)?;
    let mut chars = text.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(Value::Int(i64::from(u32::from(c)))),
        _ => Err(type_error(format!(
            "ord() expected a character, but string of length {} found",
            text.chars().count()
        ))),
    }
}

fn radix_string(func: &str, args: &Args, prefix: &str, render: fn(u64) -> String) -> EvalResult {
    args.exact(func, 1)?;
    let n = args.int(func, 0)?;
    let sign = if n < 0 { "-" } else { "" };
    Ok(Value::str(format!("{sign}{prefix}{}", render(n.unsigned_abs()))))
}

pub(super) fn hex(_: &Evaluator<'_>, args: Args) -> EvalResult {
    radix_string("hex", &args, "0x", |n| format!("{n:x}"))
}

pub(super) fn oct(_: &Evaluator<'_>, args: Args) -> EvalResult {
    radix_string("oct", &args, "0o", |n| format!("{n:o}"))
}

pub(super) fn bin(_: &Evaluator<'_>, args: Args) -> EvalResult {
    radix_string("bin", &args, "0b", |n| format!("{n:b}"))
}

/// `hash(x)`: stable within a process; equal keys hash equal.
pub(super) fn hash(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("hash", 1)?;
    let key = HashKey::from_value(&args.positional[0])?;
    let mut hasher = FxHasher::default();
    key.hash(&mut hasher);
    Ok(Value::Int(hasher.finish() as i64))
}

/// `format(value, spec="")`.
pub(super) fn format(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("format", 1, 2)?;
    args.no_named("format")?;
    let spec = match args.get(1) {
        Some(_) => args.str("format", 1)?,
        None => "",
    };
    format_value(&args.positional[0], spec).map(Value::str)
}
