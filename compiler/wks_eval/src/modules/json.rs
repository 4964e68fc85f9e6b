//! `json`: encoding only.

use std::cell::Cell;

use serde::ser::{Error as _, SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::ser::{Formatter, PrettyFormatter};
use wks_stack::ensure_sufficient_stack;

use crate::errors::{
    nesting_too_deep, type_error, value_error, wrong_arg_type, EvalError, EvalResult,
};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{format_float, Args, HashKey, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "json",
    members: &[Member::function("dumps", dumps)],
};

/// Widest accepted `indent`, in spaces or characters.
const MAX_INDENT: usize = 64;

/// Containers nested deeper than this are rejected; self-containing lists
/// would otherwise recurse forever.
const MAX_JSON_DEPTH: usize = 500;

/// Compact layout with a space after `,` and `:`.
struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    fn begin_object_value<W>(&mut self, writer: &mut W) -> std::io::Result<()>
    where
        W: ?Sized + std::io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Serialises a script value; records the first encoding failure so it
/// can be reported with the right exception class.
struct Json<'a> {
    value: &'a Value,
    sort_keys: bool,
    depth: usize,
    failure: &'a Cell<Option<Failure>>,
}

#[derive(Copy, Clone)]
enum Failure {
    NonFinite,
    Unserializable(&'static str),
    TooDeep,
}

impl Json<'_> {
    fn nested<'b>(&'b self, value: &'b Value) -> Json<'b> {
        Json {
            value,
            sort_keys: self.sort_keys,
            depth: self.depth + 1,
            failure: self.failure,
        }
    }

    fn fail<E: serde::ser::Error>(&self, failure: Failure) -> E {
        self.failure.set(Some(failure));
        E::custom("unserializable value")
    }
}

fn key_text(key: &HashKey) -> Option<String> {
    match key {
        HashKey::Str(s) => Some(s.to_string()),
        HashKey::Int(i) => Some(i.to_string()),
        HashKey::Float(f) => Some(format_float(*f)),
        HashKey::Bool(b) => Some(b.to_string()),
        HashKey::Null => Some("null".to_string()),
        HashKey::Tuple(_) => None,
    }
}

impl Serialize for Json<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.depth > MAX_JSON_DEPTH {
            return Err(self.fail(Failure::TooDeep));
        }
        ensure_sufficient_stack(|| self.serialize_value(serializer))
    }
}

impl Json<'_> {
    fn serialize_value<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.value {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(i) => serializer.serialize_i64(*i),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) => Err(self.fail(Failure::NonFinite)),
            Value::Str(s) => serializer.serialize_str(s),
            Value::List(_) | Value::Tuple(_) => {
                let items = self.value.to_vec().map_err(|_| S::Error::custom("sequence"))?;
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in &items {
                    seq.serialize_element(&self.nested(item))?;
                }
                seq.end()
            }
            Value::Dict(map) => {
                let map = map.borrow();
                let mut entries = Vec::with_capacity(map.len());
                for (key, value) in map.iter() {
                    let Some(text) = key_text(key) else {
                        return Err(self.fail(Failure::Unserializable("tuple")));
                    };
                    entries.push((text, value));
                }
                if self.sort_keys {
                    entries.sort_by(|a, b| a.0.cmp(&b.0));
                }
                let mut out = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    out.serialize_entry(&key, &self.nested(value))?;
                }
                out.end()
            }
            other => Err(self.fail(Failure::Unserializable(other.type_name()))),
        }
    }
}

/// `dumps(value, indent=null, sort_keys=false)`.
fn dumps(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact_with("dumps", 1, &["indent", "sort_keys"])?;
    let sort_keys = args.named("sort_keys").is_some_and(Value::is_truthy);
    let indent = match args.named("indent") {
        None | Some(Value::Null) => None,
        Some(Value::Int(n)) => {
            let width = usize::try_from(*n).unwrap_or(0);
            if width > MAX_INDENT {
                return Err(indent_too_wide());
            }
            Some(" ".repeat(width))
        }
        Some(Value::Str(s)) if s.chars().count() > MAX_INDENT => return Err(indent_too_wide()),
        Some(Value::Str(s)) => Some(s.to_string()),
        Some(other) => return Err(wrong_arg_type("dumps", "int or str", other.type_name())),
    };

    let failure = Cell::new(None);
    let json = Json {
        value: &args.positional[0],
        sort_keys,
        depth: 0,
        failure: &failure,
    };
    let mut out = Vec::new();
    let result = match &indent {
        Some(indent) => {
            let formatter = PrettyFormatter::with_indent(indent.as_bytes());
            json.serialize(&mut serde_json::Serializer::with_formatter(&mut out, formatter))
        }
        None => json.serialize(&mut serde_json::Serializer::with_formatter(
            &mut out,
            SpacedFormatter,
        )),
    };
    if let Err(err) = result {
        return Err(match failure.get() {
            Some(Failure::NonFinite) => value_error("Out of range float values are not JSON compliant"),
            Some(Failure::Unserializable(type_name)) => {
                type_error(format!("Object of type {type_name} is not JSON serializable"))
            }
            Some(Failure::TooDeep) => nesting_too_deep("json.dumps"),
            None => value_error(err.to_string()),
        });
    }
    String::from_utf8(out)
        .map(Value::str)
        .map_err(|err| value_error(err.to_string()))
}

#[cold]
fn indent_too_wide() -> EvalError {
    value_error(format!("dumps() indent must be at most {MAX_INDENT}"))
}
