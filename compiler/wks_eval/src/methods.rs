//! Per-variant property and method tables.
//!
//! Property access on a [`Value`] goes through the sandbox, then through
//! the fixed tables here; there is no reflection. Reading a method name
//! yields a [`Value::BoundMethod`], and calling that dispatches back into
//! [`call_method`].

mod dict;
mod format;
mod list;
mod set;
mod string;

pub(crate) use dict::pairs_of;
pub(crate) use format::{format_template, format_value};
pub(crate) use list::sort_values;
pub(crate) use set::hash_all;
pub(crate) use string::split;

use crate::errors::{attribute_not_allowed, readonly_attribute, EvalResult};
use crate::interpreter::Evaluator;
use crate::sandbox::check_attribute;
use crate::value::{Args, Value};

const STR_METHODS: &[&str] = &[
    "capitalize",
    "center",
    "count",
    "endswith",
    "find",
    "format",
    "index",
    "isalnum",
    "isalpha",
    "isdigit",
    "islower",
    "isspace",
    "isupper",
    "join",
    "ljust",
    "lower",
    "lstrip",
    "replace",
    "rfind",
    "rjust",
    "rstrip",
    "split",
    "splitlines",
    "startswith",
    "strip",
    "title",
    "upper",
    "zfill",
];

const LIST_METHODS: &[&str] = &[
    "append", "clear", "copy", "count", "extend", "index", "insert", "pop", "remove", "reverse",
    "sort",
];

const DICT_METHODS: &[&str] = &[
    "clear",
    "copy",
    "get",
    "items",
    "keys",
    "pop",
    "setdefault",
    "update",
    "values",
];

const SET_METHODS: &[&str] = &[
    "add",
    "copy",
    "difference",
    "discard",
    "intersection",
    "remove",
    "union",
];

const TUPLE_METHODS: &[&str] = &["count", "index"];

const FLOAT_METHODS: &[&str] = &["is_integer"];

fn methods_of(value: &Value) -> &'static [&'static str] {
    match value {
        Value::Str(_) => STR_METHODS,
        Value::List(_) => LIST_METHODS,
        Value::Dict(_) => DICT_METHODS,
        Value::Set(_) => SET_METHODS,
        Value::Tuple(_) => TUPLE_METHODS,
        Value::Float(_) => FLOAT_METHODS,
        _ => &[],
    }
}

/// The interned method name, if `value` has a method called `name`.
fn method_name(value: &Value, name: &str) -> Option<&'static str> {
    methods_of(value).iter().copied().find(|m| *m == name)
}

/// `object.name`.
pub fn get_property(object: &Value, name: &str) -> EvalResult {
    check_attribute(object.type_name(), name)?;
    let missing = || attribute_not_allowed(object.type_name(), name);
    match name {
        "__name__" => return object.declared_name().map(Value::str).ok_or_else(missing),
        "__qualname__" => return object.qualified_name().map(Value::str).ok_or_else(missing),
        _ => {}
    }
    match object {
        Value::Exception(exception) => match name {
            "message" => Ok(Value::str(&exception.message)),
            "args" => Ok(Value::tuple(exception.args.clone())),
            _ => Err(missing()),
        },
        Value::Namespace(fields) => fields.borrow().get(name).cloned().ok_or_else(missing),
        Value::Module(module) => module.members.get(name).cloned().ok_or_else(missing),
        Value::Range(range) => match name {
            "start" => Ok(Value::Int(range.start)),
            "stop" => Ok(Value::Int(range.stop)),
            "step" => Ok(Value::Int(range.step)),
            _ => Err(missing()),
        },
        _ => method_name(object, name)
            .map(|method| Value::bound_method(object.clone(), method))
            .ok_or_else(missing),
    }
}

/// `object.name = value`. Only namespaces accept new attributes.
pub fn set_property(object: &Value, name: &str, value: Value) -> EvalResult<()> {
    check_attribute(object.type_name(), name)?;
    match object {
        Value::Namespace(fields) => {
            fields.borrow_mut().insert(name.to_string(), value);
            Ok(())
        }
        other => Err(readonly_attribute(other.type_name(), name)),
    }
}

/// Invoke a bound built-in method.
pub fn call_method(ev: &Evaluator<'_>, receiver: &Value, name: &str, args: Args) -> EvalResult {
    match receiver {
        Value::Str(s) => string::call(s, name, args),
        Value::List(items) => list::call(ev, receiver, items, name, args),
        Value::Dict(map) => dict::call(map, name, args),
        Value::Set(items) => set::call(items, name, args),
        Value::Tuple(items) => list::call_sequence(items, "tuple", name, &args),
        Value::Float(f) if name == "is_integer" => {
            args.exact("float.is_integer", 0)?;
            Ok(Value::Bool(f.is_finite() && f.fract() == 0.0))
        }
        other => Err(attribute_not_allowed(other.type_name(), name)),
    }
}
