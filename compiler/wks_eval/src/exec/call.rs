//! Calls: script functions, built-ins, bound methods, exception classes.

use wks_ir::{ParamKind, Statement};

use super::Signal;
use crate::errors::{
    duplicate_argument, missing_argument, not_callable, unexpected_keyword, unexpected_signal,
    wrong_arg_count, wrong_arg_range, EvalResult, ExceptionKind,
};
use crate::interpreter::Evaluator;
use crate::methods::call_method;
use crate::scope::{LocalScope, Scope};
use crate::value::{Args, ScriptFunction, Value};

impl Evaluator<'_> {
    /// Call any callable value with already-evaluated arguments.
    pub fn call_value(&self, callee: &Value, args: Args) -> EvalResult {
        match callee {
            Value::Function(function) => self.call_function(function, args),
            Value::Builtin(builtin) => (builtin.func)(self, args),
            Value::BoundMethod(method) => call_method(self, &method.receiver, method.name, args),
            Value::ExceptionClass(kind) => instantiate_exception(*kind, args),
            other => Err(not_callable(other.type_name())),
        }
    }

    /// Call a script function in a fresh frame.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %function.name(), depth = self.stack.len() + 1))]
    pub fn call_function(&self, function: &ScriptFunction, args: Args) -> EvalResult {
        let stack = self.stack.push(function.name())?;
        let scope = LocalScope::new(Scope::with_parent(function.closure.clone()));
        let callee = Evaluator::new(self.interpreter, scope, stack);
        callee.bind_arguments(function, args)?;
        callee.exec_function_body(&function.decl.body)
    }

    /// Run a function body, turning its control signal into a return value.
    fn exec_function_body(&self, body: &[Statement]) -> EvalResult {
        for statement in body {
            match self.exec_statement(statement)? {
                Signal::None => {}
                Signal::Return(value) => return Ok(value),
                signal => {
                    return Err(unexpected_signal(signal.keyword()).with_span(statement.span))
                }
            }
        }
        Ok(Value::Null)
    }

    /// Bind call arguments to parameters in the callee's scope.
    ///
    /// Positionals fill parameters left to right, any surplus going to a
    /// trailing `*rest` as a tuple. Named arguments bind by name. Defaults
    /// are evaluated now, in the closure scope, for whatever is left.
    fn bind_arguments(&self, function: &ScriptFunction, args: Args) -> EvalResult<()> {
        let name = function.name();
        let params = &function.decl.params;
        let variadic = function.is_variadic();
        let fixed = if variadic { params.len() - 1 } else { params.len() };
        let given = args.positional.len();

        let mut slots: Vec<Option<Value>> = vec![None; params.len()];
        let mut positional = args.positional.into_iter();
        for (slot, value) in slots.iter_mut().take(fixed).zip(&mut positional) {
            *slot = Some(value);
        }
        let surplus: Vec<Value> = positional.collect();
        if variadic {
            slots[fixed] = Some(Value::tuple(surplus));
        } else if !surplus.is_empty() {
            let required = params
                .iter()
                .filter(|p| p.kind == ParamKind::Positional)
                .count();
            return Err(if required == fixed {
                wrong_arg_count(name, fixed, given)
            } else {
                wrong_arg_range(name, required, fixed, given)
            });
        }

        for (keyword, value) in args.named {
            let index = params[..fixed]
                .iter()
                .position(|p| p.name == keyword)
                .ok_or_else(|| unexpected_keyword(name, &keyword))?;
            if slots[index].is_some() {
                return Err(duplicate_argument(name, &keyword));
            }
            slots[index] = Some(value);
        }

        let defaults = self.with_scope(function.closure.clone());
        for (param, slot) in params.iter().zip(slots) {
            let value = match (slot, &param.kind) {
                (Some(value), _) => value,
                (None, ParamKind::Default(default)) => defaults.eval(default)?,
                (None, _) => return Err(missing_argument(name, &param.name)),
            };
            self.define(&param.name, value);
        }
        Ok(())
    }
}

/// `ValueError("bad")`: an exception value carrying its arguments.
fn instantiate_exception(kind: ExceptionKind, args: Args) -> EvalResult {
    args.no_named(kind.name())?;
    let message = match args.positional.as_slice() {
        [] => String::new(),
        [single] => single.to_str(),
        many => Value::tuple(many.to_vec()).repr(),
    };
    Ok(Value::exception(kind, message, args.positional))
}
