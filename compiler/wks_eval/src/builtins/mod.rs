//! Global built-in functions and exception classes.
//!
//! Every script module's root scope has a parent scope holding these
//! bindings, so scripts can shadow them and the host never sees them among
//! a module's own variables.

mod convert;
mod iter;
mod numeric;

pub(crate) use convert::float_to_int;

use crate::errors::{EvalResult, ExceptionKind};
use crate::interpreter::Evaluator;
use crate::scope::Scope;
use crate::value::{Args, BuiltinFunction, Value};

/// Every global built-in function.
const BUILTINS: &[BuiltinFunction] = &[
    BuiltinFunction::new("print", print),
    BuiltinFunction::new("import_module", import_module),
    BuiltinFunction::new("len", iter::len),
    BuiltinFunction::new("range", iter::range),
    BuiltinFunction::new("sorted", iter::sorted),
    BuiltinFunction::new("reversed", iter::reversed),
    BuiltinFunction::new("enumerate", iter::enumerate),
    BuiltinFunction::new("zip", iter::zip),
    BuiltinFunction::new("any", iter::any),
    BuiltinFunction::new("all", iter::all),
    BuiltinFunction::new("str", convert::str),
    BuiltinFunction::new("repr", convert::repr),
    BuiltinFunction::new("int", convert::int),
    BuiltinFunction::new("float", convert::float),
    BuiltinFunction::new("bool", convert::bool),
    BuiltinFunction::new("list", convert::list),
    BuiltinFunction::new("tuple", convert::tuple),
    BuiltinFunction::new("dict", convert::dict),
    BuiltinFunction::new("set", convert::set),
    BuiltinFunction::new("namespace", convert::namespace),
    BuiltinFunction::new("type", convert::type_of),
    BuiltinFunction::new("isinstance", convert::isinstance),
    BuiltinFunction::new("chr", convert::chr),
    BuiltinFunction::new("ord", convert::ord),
    BuiltinFunction::new("hex", convert::hex),
    BuiltinFunction::new("oct", convert::oct),
    BuiltinFunction::new("bin", convert::bin),
    BuiltinFunction::new("hash", convert::hash),
    BuiltinFunction::new("format", convert::format),
    BuiltinFunction::new("abs", numeric::abs),
    BuiltinFunction::new("min", numeric::min),
    BuiltinFunction::new("max", numeric::max),
    BuiltinFunction::new("sum", numeric::sum),
    BuiltinFunction::new("round", numeric::round),
    BuiltinFunction::new("divmod", numeric::divmod),
    BuiltinFunction::new("pow", numeric::pow),
];

/// A scope binding every built-in function and exception class.
pub fn builtins_scope() -> Scope {
    let mut scope = Scope::new();
    for builtin in BUILTINS {
        scope.set_variable(builtin.name, Value::Builtin(*builtin));
    }
    for kind in ExceptionKind::ALL {
        scope.set_variable(kind.name(), Value::ExceptionClass(kind));
    }
    scope
}

/// Names of every global built-in, sorted.
pub fn builtin_names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = BUILTINS
        .iter()
        .map(|b| b.name)
        .chain(ExceptionKind::ALL.iter().map(|k| k.name()))
        .collect();
    names.sort_unstable();
    names
}

/// `print(*values, sep=" ", end="\n")`
fn print(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    args.only_named("print", &["sep", "end"])?;
    let text_arg = |name: &str, default: &str| match args.named(name) {
        None | Some(Value::Null) => Ok(default.to_string()),
        Some(Value::Str(s)) => Ok(s.to_string()),
        Some(other) => Err(crate::errors::wrong_arg_type("print", "str", other.type_name())),
    };
    let sep = text_arg("sep", " ")?;
    let end = text_arg("end", "\n")?;
    let mut text = args
        .positional
        .iter()
        .map(Value::to_str)
        .collect::<Vec<_>>()
        .join(&sep);
    text.push_str(&end);
    ev.interpreter().print(&text);
    Ok(Value::Null)
}

/// `import_module(name)`: a fresh copy of a registered built-in module.
fn import_module(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("import_module", 1)?;
    let name = args.str("import_module", 0)?;
    ev.interpreter().import_module(name)
}

#[cfg(test)]
mod tests;
