//! `str.format` templates and format specs.
//!
//! Spec grammar: `[[fill]align][sign][#][0][width][,|_][.precision][type]`
//! with the types `s d x X o b c f F e E g G %`.

use crate::errors::{key_not_found, value_error, EvalError, EvalResult, ExceptionKind};
use crate::value::{format_float, quote_str, Args, Value};

#[derive(Debug)]
struct FormatSpec {
    fill: char,
    align: Option<char>,
    sign: char,
    alternate: bool,
    zero: bool,
    width: usize,
    grouping: Option<char>,
    precision: Option<usize>,
    kind: Option<char>,
}

fn parse_spec(spec: &str) -> EvalResult<FormatSpec> {
    let chars: Vec<char> = spec.chars().collect();
    let invalid = || value_error(format!("Invalid format specifier '{spec}'"));
    let is_align = |c: char| matches!(c, '<' | '>' | '^' | '=');
    let mut parsed = FormatSpec {
        fill: ' ',
        align: None,
        sign: '-',
        alternate: false,
        zero: false,
        width: 0,
        grouping: None,
        precision: None,
        kind: None,
    };
    let mut i = 0;
    if chars.len() >= 2 && is_align(chars[1]) {
        parsed.fill = chars[0];
        parsed.align = Some(chars[1]);
        i = 2;
    } else if chars.first().copied().is_some_and(is_align) {
        parsed.align = Some(chars[0]);
        i = 1;
    }
    if let Some(&sign @ ('+' | '-' | ' ')) = chars.get(i) {
        parsed.sign = sign;
        i += 1;
    }
    if chars.get(i) == Some(&'#') {
        parsed.alternate = true;
        i += 1;
    }
    if chars.get(i) == Some(&'0') {
        parsed.zero = true;
        i += 1;
    }
    let digits = |i: &mut usize| {
        let start = *i;
        while chars.get(*i).is_some_and(char::is_ascii_digit) {
            *i += 1;
        }
        chars[start..*i].iter().collect::<String>()
    };
    let width = digits(&mut i);
    if !width.is_empty() {
        parsed.width = width.parse().map_err(|_| invalid())?;
    }
    if let Some(&group @ (',' | '_')) = chars.get(i) {
        parsed.grouping = Some(group);
        i += 1;
    }
    if chars.get(i) == Some(&'.') {
        i += 1;
        let precision = digits(&mut i);
        if precision.is_empty() {
            return Err(invalid());
        }
        parsed.precision = Some(precision.parse().map_err(|_| invalid())?);
    }
    if let Some(&kind) = chars.get(i) {
        parsed.kind = Some(kind);
        i += 1;
    }
    if i == chars.len() {
        Ok(parsed)
    } else {
        Err(invalid())
    }
}

/// Render `value` under a format spec (the part after `:`).
pub(crate) fn format_value(value: &Value, spec: &str) -> EvalResult<String> {
    if spec.is_empty() {
        return Ok(value.to_str());
    }
    let spec = parse_spec(spec)?;
    let unknown = || {
        value_error(format!(
            "Unknown format code '{}' for object of type '{}'",
            spec.kind.unwrap_or('?'),
            value.type_name()
        ))
    };
    let (negative, prefix, body, numeric) = match (spec.kind, value) {
        (Some('d' | 'x' | 'X' | 'o' | 'b'), Value::Int(_) | Value::Bool(_))
        | (None, Value::Int(_)) => {
            let n = value.as_int("format")?;
            let (prefix, digits) = format_int(n.unsigned_abs(), spec.kind.unwrap_or('d'));
            let prefix = if spec.alternate { prefix } else { "" };
            (n < 0, prefix, group(&digits, spec.grouping), true)
        }
        (Some('c'), Value::Int(n)) => {
            let c = u32::try_from(*n)
                .ok()
                .and_then(char::from_u32)
                .ok_or_else(|| value_error("%c arg not in range(0x110000)"))?;
            (false, "", c.to_string(), false)
        }
        (Some('f' | 'F' | 'e' | 'E' | 'g' | 'G' | '%'), v) if v.is_number() => {
            let f = v.as_float("format")?;
            let body = format_float_kind(f.abs(), spec.kind.unwrap_or('g'), spec.precision);
            (f.is_sign_negative() && !f.is_nan(), "", group(&body, spec.grouping), true)
        }
        (None, Value::Float(f)) => {
            let body = match spec.precision {
                Some(_) => format_float_kind(f.abs(), 'g', spec.precision),
                None => format_float(f.abs()),
            };
            (f.is_sign_negative() && !f.is_nan(), "", group(&body, spec.grouping), true)
        }
        (None | Some('s'), v) => {
            let text = v.to_str();
            let text = match spec.precision {
                Some(limit) => text.chars().take(limit).collect(),
                None => text,
            };
            (false, "", text, false)
        }
        _ => return Err(unknown()),
    };

    let sign = match (negative, spec.sign) {
        (true, _) => "-",
        (false, '+') if numeric => "+",
        (false, ' ') if numeric => " ",
        _ => "",
    };
    let (fill, align) = match (spec.align, spec.zero && numeric) {
        (Some(align), _) => (spec.fill, align),
        (None, true) => ('0', '='),
        (None, false) if numeric => (spec.fill, '>'),
        (None, false) => (spec.fill, '<'),
    };
    let len = sign.len() + prefix.len() + body.chars().count();
    let padding = spec.width.saturating_sub(len);
    let pad = |n: usize| std::iter::repeat(fill).take(n).collect::<String>();
    Ok(match align {
        '<' => format!("{sign}{prefix}{body}{}", pad(padding)),
        '^' => format!(
            "{}{sign}{prefix}{body}{}",
            pad(padding / 2),
            pad(padding - padding / 2)
        ),
        '=' => format!("{sign}{prefix}{}{body}", pad(padding)),
        _ => format!("{}{sign}{prefix}{body}", pad(padding)),
    })
}

fn format_int(n: u64, kind: char) -> (&'static str, String) {
    match kind {
        'x' => ("0x", format!("{n:x}")),
        'X' => ("0X", format!("{n:X}")),
        'o' => ("0o", format!("{n:o}")),
        'b' => ("0b", format!("{n:b}")),
        _ => ("", n.to_string()),
    }
}

/// Format a non-negative float for one of the float presentation types.
fn format_float_kind(f: f64, kind: char, precision: Option<usize>) -> String {
    if f.is_nan() {
        return if kind.is_uppercase() { "NAN" } else { "nan" }.to_string();
    }
    if f.is_infinite() {
        return if kind.is_uppercase() { "INF" } else { "inf" }.to_string();
    }
    let precision = precision.unwrap_or(6);
    match kind {
        'f' | 'F' => format!("{f:.precision$}"),
        'e' | 'E' => {
            let text = exponent_form(f, precision);
            if kind == 'E' {
                text.to_uppercase()
            } else {
                text
            }
        }
        '%' => format!("{:.precision$}%", f * 100.0),
        _ => {
            let text = general_form(f, precision.max(1));
            if kind == 'G' {
                text.to_uppercase()
            } else {
                text
            }
        }
    }
}

/// `1.500000e+03` rather than Rust's `1.5e3`.
fn exponent_form(f: f64, precision: usize) -> String {
    let text = format!("{f:.precision$e}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// The `g` presentation: fixed or exponent form by magnitude, trailing
/// zeros removed.
fn general_form(f: f64, precision: usize) -> String {
    if f == 0.0 {
        return "0".to_string();
    }
    let exponent = f.abs().log10().floor() as i64;
    let significant = i64::try_from(precision).unwrap_or(i64::MAX);
    if (-4..significant).contains(&exponent) {
        let decimals = usize::try_from(significant - 1 - exponent).unwrap_or(0);
        trim_fraction(&format!("{f:.decimals$}"))
    } else {
        let text = exponent_form(f, precision - 1);
        match text.split_once('e') {
            Some((mantissa, exponent)) => format!("{}e{exponent}", trim_fraction(mantissa)),
            None => text,
        }
    }
}

fn trim_fraction(text: &str) -> String {
    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text.to_string()
    }
}

/// Insert a thousands separator into the integer part of `digits`.
fn group(digits: &str, separator: Option<char>) -> String {
    let Some(separator) = separator else {
        return digits.to_string();
    };
    let (integer, rest) = match digits.find(|c: char| !c.is_ascii_digit()) {
        Some(split) => digits.split_at(split),
        None => (digits, ""),
    };
    let mut grouped = String::with_capacity(digits.len() + integer.len() / 3);
    for (i, c) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped.push_str(rest);
    grouped
}

/// `template.format(*args, **kwargs)`.
pub(crate) fn format_template(template: &str, args: &Args) -> EvalResult<String> {
    let mut out = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();
    let mut next_auto = 0;
    while let Some(c) = chars.next() {
        match c {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                out.push('{');
            }
            '{' => {
                let mut field = String::new();
                let mut closed = false;
                for c in chars.by_ref() {
                    if c == '}' {
                        closed = true;
                        break;
                    }
                    field.push(c);
                }
                if !closed {
                    return Err(value_error("Single '{' encountered in format string"));
                }
                out.push_str(&render_field(&field, args, &mut next_auto)?);
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                out.push('}');
            }
            '}' => return Err(value_error("Single '}' encountered in format string")),
            c => out.push(c),
        }
    }
    Ok(out)
}

fn render_field(field: &str, args: &Args, next_auto: &mut usize) -> EvalResult<String> {
    let (head, spec) = field.split_once(':').unwrap_or((field, ""));
    let (name, conversion) = match head.split_once('!') {
        Some((name, conversion)) => (name, Some(conversion)),
        None => (head, None),
    };
    let positional = |index: usize| {
        args.get(index).ok_or_else(|| {
            EvalError::new(
                ExceptionKind::IndexError,
                format!("Replacement index {index} out of range for positional args tuple"),
            )
        })
    };
    let value = if name.is_empty() {
        let value = positional(*next_auto)?;
        *next_auto += 1;
        value
    } else if let Ok(index) = name.parse::<usize>() {
        positional(index)?
    } else {
        args.named(name).ok_or_else(|| key_not_found(&quote_str(name)))?
    };
    let converted = match conversion {
        None => value.clone(),
        Some("r") => Value::str(value.repr()),
        Some("s") => Value::str(value.to_str()),
        Some(other) => {
            return Err(value_error(format!(
                "Unknown conversion specifier {other}"
            )))
        }
    };
    format_value(&converted, spec)
}
