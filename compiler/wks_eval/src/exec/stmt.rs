//! Statement execution.

use std::rc::Rc;
use std::sync::Arc;

use wks_ir::{ExceptHandler, Expression, Statement, StatementKind};
use wks_stack::ensure_sufficient_stack;

use super::{ExecResult, Signal};
use crate::errors::{not_an_exception_class, raise_non_exception, EvalError, EvalResult};
use crate::interpreter::Evaluator;
use crate::value::ScriptFunction;
use crate::Value;

impl Evaluator<'_> {
    /// Run statements in order, stopping at the first control signal.
    pub fn exec_block(&self, body: &[Statement]) -> ExecResult {
        for statement in body {
            match self.exec_statement(statement)? {
                Signal::None => {}
                signal => return Ok(signal),
            }
        }
        Ok(Signal::None)
    }

    pub fn exec_statement(&self, statement: &Statement) -> ExecResult {
        ensure_sufficient_stack(|| self.exec_kind(&statement.kind))
            .map_err(|err| err.with_span(statement.span))
    }

    fn exec_kind(&self, kind: &StatementKind) -> ExecResult {
        match kind {
            StatementKind::Expression(expr) => {
                self.eval(expr)?;
                Ok(Signal::None)
            }
            StatementKind::SetVariable { name, op, value } => {
                self.exec_set_variable(name, *op, value)?;
                Ok(Signal::None)
            }
            StatementKind::SetProperty {
                object,
                property,
                op,
                value,
            } => {
                self.exec_set_property(object, property, *op, value)?;
                Ok(Signal::None)
            }
            StatementKind::SetItem {
                object,
                index,
                op,
                value,
            } => {
                self.exec_set_item(object, index, *op, value)?;
                Ok(Signal::None)
            }
            StatementKind::Unpack { names, value } => {
                let value = self.eval(value)?;
                self.unpack_into(names, &value)?;
                Ok(Signal::None)
            }
            StatementKind::DeleteVariable { name } => {
                self.scope.borrow_mut().delete_variable(name)?;
                Ok(Signal::None)
            }
            StatementKind::DeleteItem { object, index } => {
                let object = self.eval(object)?;
                let index = self.eval(index)?;
                super::delete_item(&object, &index)?;
                Ok(Signal::None)
            }
            StatementKind::If {
                branches,
                else_body,
            } => {
                for (condition, body) in branches {
                    if self.eval(condition)?.is_truthy() {
                        return self.exec_block(body);
                    }
                }
                match else_body {
                    Some(body) => self.exec_block(body),
                    None => Ok(Signal::None),
                }
            }
            StatementKind::For {
                target,
                iterable,
                body,
            } => {
                let items = self.eval(iterable)?.iter()?;
                for item in items {
                    self.bind_loop_target(target, item)?;
                    match self.exec_block(body)? {
                        Signal::Break => break,
                        Signal::None | Signal::Continue => {}
                        signal @ Signal::Return(_) => return Ok(signal),
                    }
                }
                Ok(Signal::None)
            }
            StatementKind::While { condition, body } => {
                while self.eval(condition)?.is_truthy() {
                    match self.exec_block(body)? {
                        Signal::Break => break,
                        Signal::None | Signal::Continue => {}
                        signal @ Signal::Return(_) => return Ok(signal),
                    }
                }
                Ok(Signal::None)
            }
            StatementKind::Try { body, handlers } => self.exec_try(body, handlers),
            StatementKind::Raise(expr) => Err(self.raised_error(expr)?),
            StatementKind::Break => Ok(Signal::Break),
            StatementKind::Continue => Ok(Signal::Continue),
            StatementKind::Return(value) => {
                let value = match value {
                    Some(expr) => self.eval(expr)?,
                    None => Value::Null,
                };
                Ok(Signal::Return(value))
            }
            StatementKind::FunctionDef(decl) => {
                let function = ScriptFunction {
                    decl: Arc::clone(decl),
                    closure: self.scope.clone(),
                };
                let name = function.name().to_string();
                self.define(&name, Value::Function(Rc::new(function)));
                Ok(Signal::None)
            }
        }
    }

    /// `try`: the first handler whose class list matches runs; with no
    /// match the original error propagates.
    fn exec_try(&self, body: &[Statement], handlers: &[ExceptHandler]) -> ExecResult {
        let err = match self.exec_block(body) {
            Ok(signal) => return Ok(signal),
            Err(err) => err,
        };
        for handler in handlers {
            if self.handler_matches(handler, &err)? {
                tracing::trace!(kind = %err.kind, line = err.line(), "exception handled");
                if let Some(name) = &handler.name {
                    self.define(name, Value::str(&err.message));
                }
                return self.exec_block(&handler.body);
            }
        }
        Err(err)
    }

    fn handler_matches(&self, handler: &ExceptHandler, err: &EvalError) -> EvalResult<bool> {
        if handler.types.is_empty() {
            return Ok(true);
        }
        for type_expr in &handler.types {
            let class = self.eval(type_expr)?;
            if class_matches(&class, err).map_err(|e| e.with_span(type_expr.span))? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// The error a `raise` statement throws.
    fn raised_error(&self, expr: &Expression) -> EvalResult<EvalError> {
        Ok(match self.eval(expr)? {
            Value::ExceptionClass(kind) => EvalError::new(kind, ""),
            Value::Exception(exception) => EvalError::new(exception.kind, exception.message.clone()),
            other => raise_non_exception(other.type_name()),
        }
        .with_span(expr.span))
    }
}

/// Whether `err` is an instance of `class` (or of any class in a tuple).
fn class_matches(class: &Value, err: &EvalError) -> EvalResult<bool> {
    match class {
        Value::ExceptionClass(kind) => Ok(err.kind.is_subclass_of(*kind)),
        Value::Tuple(classes) => {
            for class in classes.iter() {
                if class_matches(class, err)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        other => Err(not_an_exception_class(other.type_name())),
    }
}
