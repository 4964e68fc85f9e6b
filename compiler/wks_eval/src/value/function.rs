//! Callable and namespace-like runtime objects.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use wks_ir::{FunctionDecl, ParamKind};

use super::Value;
use crate::errors::{
    too_few_args, unexpected_keyword, wrong_arg_count, wrong_arg_range, wrong_arg_type, EvalResult,
    ExceptionKind,
};
use crate::interpreter::Evaluator;
use crate::scope::{LocalScope, Scope};

/// A script-defined function: declaration plus captured scope.
pub struct ScriptFunction {
    pub decl: Arc<FunctionDecl>,
    pub closure: LocalScope<Scope>,
}

impl ScriptFunction {
    pub fn name(&self) -> &str {
        self.decl.name.as_deref().unwrap_or("<anonymous>")
    }

    pub fn is_variadic(&self) -> bool {
        self.decl
            .params
            .last()
            .is_some_and(|p| p.kind == ParamKind::Variadic)
    }
}

impl fmt::Debug for ScriptFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScriptFunction")
            .field("name", &self.name())
            .field("params", &self.decl.params.len())
            .finish_non_exhaustive()
    }
}

/// Host implementation of a built-in function.
pub type BuiltinFn = fn(&Evaluator<'_>, Args) -> EvalResult;

/// A host-provided function.
#[derive(Copy, Clone)]
pub struct BuiltinFunction {
    pub name: &'static str,
    /// Owning module for qualified names (`math.sqrt`); `None` for globals.
    pub module: Option<&'static str>,
    pub func: BuiltinFn,
}

impl BuiltinFunction {
    pub const fn new(name: &'static str, func: BuiltinFn) -> Self {
        BuiltinFunction {
            name,
            module: None,
            func,
        }
    }

    pub fn qualname(&self) -> String {
        match self.module {
            Some(module) => format!("{module}.{}", self.name),
            None => self.name.to_string(),
        }
    }
}

impl fmt::Debug for BuiltinFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BuiltinFunction({})", self.qualname())
    }
}

/// A built-in method bound to its receiver (`items.append`).
#[derive(Clone, Debug)]
pub struct BoundMethod {
    pub receiver: Value,
    pub name: &'static str,
}

/// A built-in module's namespace.
#[derive(Clone, Debug)]
pub struct ModuleValue {
    pub name: String,
    pub members: BTreeMap<String, Value>,
}

/// An instantiated exception (`ValueError("bad")`).
#[derive(Clone, Debug, PartialEq)]
pub struct ExceptionValue {
    pub kind: ExceptionKind,
    pub message: String,
    pub args: Vec<Value>,
}

/// Arguments to a built-in call.
#[derive(Clone, Debug, Default)]
pub struct Args {
    pub positional: Vec<Value>,
    pub named: Vec<(String, Value)>,
}

impl Args {
    pub fn new(positional: Vec<Value>) -> Self {
        Args {
            positional,
            named: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.positional.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty()
    }

    /// Require exactly `n` positional arguments and no named ones.
    pub fn exact(&self, func: &str, n: usize) -> EvalResult<()> {
        self.no_named(func)?;
        if self.positional.len() == n {
            Ok(())
        } else {
            Err(wrong_arg_count(func, n, self.positional.len()))
        }
    }

    /// Require exactly `n` positional arguments and only `allowed` named ones.
    pub fn exact_with(&self, func: &str, n: usize, allowed: &[&str]) -> EvalResult<()> {
        self.only_named(func, allowed)?;
        self.between(func, n, n)
    }

    /// Require between `min` and `max` positional arguments.
    pub fn between(&self, func: &str, min: usize, max: usize) -> EvalResult<()> {
        let got = self.positional.len();
        if got < min || got > max {
            return Err(if min == max {
                wrong_arg_count(func, min, got)
            } else {
                wrong_arg_range(func, min, max, got)
            });
        }
        Ok(())
    }

    pub fn at_least(&self, func: &str, min: usize) -> EvalResult<()> {
        let got = self.positional.len();
        if got < min {
            Err(too_few_args(func, min, got))
        } else {
            Ok(())
        }
    }

    pub fn no_named(&self, func: &str) -> EvalResult<()> {
        match self.named.first() {
            Some((name, _)) => Err(unexpected_keyword(func, name)),
            None => Ok(()),
        }
    }

    /// Reject named arguments other than `allowed`.
    pub fn only_named(&self, func: &str, allowed: &[&str]) -> EvalResult<()> {
        match self.named.iter().find(|(n, _)| !allowed.contains(&n.as_str())) {
            Some((name, _)) => Err(unexpected_keyword(func, name)),
            None => Ok(()),
        }
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.positional.get(index)
    }

    /// Named argument `name`, falling back to positional slot `index`.
    pub fn param(&self, index: usize, name: &str) -> Option<&Value> {
        self.named
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v)
            .or_else(|| self.positional.get(index))
    }

    pub fn named(&self, name: &str) -> Option<&Value> {
        self.named.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn int(&self, func: &str, index: usize) -> EvalResult<i64> {
        match self.positional.get(index) {
            Some(value) => value.as_int(func),
            None => Err(too_few_args(func, index + 1, self.positional.len())),
        }
    }

    pub fn float(&self, func: &str, index: usize) -> EvalResult<f64> {
        match self.positional.get(index) {
            Some(value) => value.as_float(func),
            None => Err(too_few_args(func, index + 1, self.positional.len())),
        }
    }

    pub fn str(&self, func: &str, index: usize) -> EvalResult<&str> {
        match self.positional.get(index) {
            Some(Value::Str(s)) => Ok(s),
            Some(other) => Err(wrong_arg_type(func, "str", other.type_name())),
            None => Err(too_few_args(func, index + 1, self.positional.len())),
        }
    }

    pub fn value(&self, func: &str, index: usize) -> EvalResult<&Value> {
        self.positional
            .get(index)
            .ok_or_else(|| too_few_args(func, index + 1, self.positional.len()))
    }
}
