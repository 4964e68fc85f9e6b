//! `str()` and `repr()` renderings.

use std::fmt::{self, Write as _};

use super::{HashKey, Value};

/// Containers nested deeper than this render as `...`; self-referencing
/// lists would otherwise recurse forever.
const MAX_RENDER_DEPTH: usize = 64;

impl Value {
    /// `repr(value)`: unambiguous, strings quoted.
    pub fn repr(&self) -> String {
        let mut out = String::new();
        write_repr(&mut out, self, 0);
        out
    }

    /// `str(value)`: strings unquoted, everything else as `repr`.
    pub fn to_str(&self) -> String {
        match self {
            Value::Str(s) => s.to_string(),
            Value::Exception(e) => e.message.clone(),
            other => other.repr(),
        }
    }
}

/// Python-compatible float rendering: `1.0`, `0.1`, `1e+16`, `inf`.
pub fn format_float(f: f64) -> String {
    if f.is_nan() {
        return "nan".into();
    }
    if f.is_infinite() {
        return if f > 0.0 { "inf".into() } else { "-inf".into() };
    }
    let magnitude = f.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let formatted = format!("{f:e}");
        return match formatted.split_once('e') {
            Some((mantissa, exponent)) => {
                let (sign, digits) = match exponent.strip_prefix('-') {
                    Some(digits) => ('-', digits),
                    None => ('+', exponent),
                };
                format!("{mantissa}e{sign}{digits:0>2}")
            }
            None => formatted,
        };
    }
    if f.fract() == 0.0 {
        format!("{f:.1}")
    } else {
        format!("{f}")
    }
}

/// Quote a string the way `repr` does: single quotes unless the text
/// contains one and no double quote.
pub fn quote_str(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => {
                let _ = write!(out, "\\x{:02x}", u32::from(c));
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

fn write_seq<'a>(
    out: &mut String,
    items: impl Iterator<Item = &'a Value>,
    open: &str,
    close: &str,
    depth: usize,
) {
    out.push_str(open);
    for (i, item) in items.enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_repr(out, item, depth + 1);
    }
    out.push_str(close);
}

fn write_repr(out: &mut String, value: &Value, depth: usize) {
    if depth > MAX_RENDER_DEPTH {
        out.push_str("...");
        return;
    }
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(true) => out.push_str("true"),
        Value::Bool(false) => out.push_str("false"),
        Value::Int(i) => {
            let _ = write!(out, "{i}");
        }
        Value::Float(f) => out.push_str(&format_float(*f)),
        Value::Str(s) => out.push_str(&quote_str(s)),
        Value::List(items) => write_seq(out, items.borrow().iter(), "[", "]", depth),
        Value::Tuple(items) if items.len() == 1 => {
            out.push('(');
            write_repr(out, &items[0], depth + 1);
            out.push_str(",)");
        }
        Value::Tuple(items) => write_seq(out, items.iter(), "(", ")", depth),
        Value::Dict(map) => {
            out.push('{');
            for (i, (key, item)) in map.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(out, &key.to_value(), depth + 1);
                out.push_str(": ");
                write_repr(out, item, depth + 1);
            }
            out.push('}');
        }
        Value::Set(items) => {
            let items = items.borrow();
            if items.is_empty() {
                out.push_str("set()");
            } else {
                let values: Vec<Value> = items.iter().map(HashKey::to_value).collect();
                write_seq(out, values.iter(), "{", "}", depth);
            }
        }
        Value::Range(r) => {
            if r.step == 1 {
                let _ = write!(out, "range({}, {})", r.start, r.stop);
            } else {
                let _ = write!(out, "range({}, {}, {})", r.start, r.stop, r.step);
            }
        }
        Value::Slice(s) => {
            let part = |p: Option<i64>| p.map_or_else(|| "null".to_string(), |v| v.to_string());
            let _ = write!(
                out,
                "slice({}, {}, {})",
                part(s.start),
                part(s.stop),
                part(s.step)
            );
        }
        Value::Function(f) => {
            let _ = write!(out, "<function {}>", f.name());
        }
        Value::Builtin(b) => {
            let _ = write!(out, "<built-in function {}>", b.qualname());
        }
        Value::BoundMethod(m) => {
            let _ = write!(
                out,
                "<built-in method {} of {} object>",
                m.name,
                m.receiver.type_name()
            );
        }
        Value::Module(m) => {
            let _ = write!(out, "<module '{}'>", m.name);
        }
        Value::ExceptionClass(kind) => {
            let _ = write!(out, "<class '{kind}'>");
        }
        Value::Exception(e) => {
            let _ = write!(out, "{}(", e.kind);
            for (i, arg) in e.args.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_repr(out, arg, depth + 1);
            }
            out.push(')');
        }
        Value::Namespace(fields) => {
            out.push_str("namespace(");
            for (i, (name, item)) in fields.borrow().iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                out.push_str(name);
                out.push('=');
                write_repr(out, item, depth + 1);
            }
            out.push(')');
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.repr())
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_str())
    }
}
