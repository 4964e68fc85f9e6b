//! Expression evaluation and subscripting.

use std::rc::Rc;
use std::sync::Arc;

use wks_ir::{Expression, ExpressionKind, Literal, LogicalOp};
use wks_stack::ensure_sufficient_stack;

use crate::errors::{
    index_out_of_range, item_assignment_unsupported, item_deletion_unsupported, key_not_found,
    not_subscriptable, type_error, EvalResult,
};
use crate::interpreter::Evaluator;
use crate::methods::get_property;
use crate::operators::evaluate_binary;
use crate::scope::LocalScope;
use crate::unary_operators::evaluate_unary;
use crate::value::{Args, DictMap, HashKey, ScriptFunction, SetItems, SliceValue, Value};

impl Evaluator<'_> {
    /// Evaluate an expression, attaching its position to any error that
    /// does not carry one yet.
    pub fn eval(&self, expr: &Expression) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_kind(&expr.kind)).map_err(|err| err.with_span(expr.span))
    }

    fn eval_kind(&self, kind: &ExpressionKind) -> EvalResult {
        match kind {
            ExpressionKind::Literal(literal) => Ok(literal_value(literal)),
            ExpressionKind::Variable(name) => self.lookup(name),
            ExpressionKind::GetProperty { object, property } => {
                let object = self.eval(object)?;
                get_property(&object, property)
            }
            ExpressionKind::GetItem { object, index } => {
                let object = self.eval(object)?;
                let index = self.eval(index)?;
                get_item(&object, &index)
            }
            ExpressionKind::Slice { start, end, step } => Ok(Value::Slice(SliceValue {
                start: self.eval_slice_part(start.as_deref())?,
                stop: self.eval_slice_part(end.as_deref())?,
                step: self.eval_slice_part(step.as_deref())?,
            })),
            ExpressionKind::Unary { op, operand } => evaluate_unary(&self.eval(operand)?, *op),
            ExpressionKind::Binary { op, left, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                evaluate_binary(&left, &right, *op)
            }
            ExpressionKind::Logical { op, left, right } => {
                let left = self.eval(left)?;
                let decided = match op {
                    LogicalOp::And => !left.is_truthy(),
                    LogicalOp::Or => left.is_truthy(),
                };
                if decided {
                    Ok(left)
                } else {
                    self.eval(right)
                }
            }
            ExpressionKind::IfElse {
                condition,
                then,
                otherwise,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval(then)
                } else {
                    self.eval(otherwise)
                }
            }
            ExpressionKind::Call {
                callee,
                args,
                kwargs,
            } => {
                let callee = self.eval(callee)?;
                let positional = args
                    .iter()
                    .map(|arg| self.eval(arg))
                    .collect::<EvalResult<Vec<_>>>()?;
                let mut named = Vec::with_capacity(kwargs.len());
                for (name, arg) in kwargs {
                    named.push((name.clone(), self.eval(arg)?));
                }
                self.call_value(&callee, Args { positional, named })
            }
            ExpressionKind::List(items) => Ok(Value::list(self.eval_all(items)?)),
            ExpressionKind::Tuple(items) => Ok(Value::tuple(self.eval_all(items)?)),
            ExpressionKind::Set(items) => {
                let mut set = SetItems::new();
                for item in items {
                    let value = self.eval(item)?;
                    set.insert(HashKey::from_value(&value).map_err(|e| e.with_span(item.span))?);
                }
                Ok(Value::set(set))
            }
            ExpressionKind::Dict(entries) => {
                let mut map = DictMap::new();
                for (key, value) in entries {
                    let key_value = self.eval(key)?;
                    let hashed = HashKey::from_value(&key_value).map_err(|e| e.with_span(key.span))?;
                    map.insert(hashed, self.eval(value)?);
                }
                Ok(Value::dict(map))
            }
            ExpressionKind::Lambda(decl) => {
                // Anonymous functions see a snapshot of the defining scope.
                let closure = LocalScope::new(self.scope.borrow().copy());
                Ok(Value::Function(Rc::new(ScriptFunction {
                    decl: Arc::clone(decl),
                    closure,
                })))
            }
        }
    }

    fn eval_all(&self, items: &[Expression]) -> EvalResult<Vec<Value>> {
        items.iter().map(|item| self.eval(item)).collect()
    }

    fn eval_slice_part(&self, part: Option<&Expression>) -> EvalResult<Option<i64>> {
        match part {
            None => Ok(None),
            Some(expr) => match self.eval(expr)? {
                Value::Null => Ok(None),
                other => other.as_int("slice").map(Some),
            },
        }
    }
}

fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Null => Value::Null,
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Int(i) => Value::Int(*i),
        Literal::Float(f) => Value::Float(*f),
        Literal::Str(s) => Value::str(s),
    }
}

/// Resolve a possibly negative index against `len`.
fn normalize_index(index: i64, len: usize, type_name: &str) -> EvalResult<usize> {
    let len = i64::try_from(len).unwrap_or(i64::MAX);
    let resolved = if index < 0 { index + len } else { index };
    if (0..len).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(index_out_of_range(type_name))
    }
}

fn index_type_error(container: &str, index: &Value) -> crate::errors::EvalError {
    type_error(format!(
        "{container} indices must be integers or slices, not {}",
        index.type_name()
    ))
}

/// `object[index]`.
pub fn get_item(object: &Value, index: &Value) -> EvalResult {
    match (object, index) {
        (Value::List(items), Value::Int(i)) => {
            let items = items.borrow();
            Ok(items[normalize_index(*i, items.len(), "list")?].clone())
        }
        (Value::List(items), Value::Slice(slice)) => {
            let items = items.borrow();
            let picked = slice.positions(items.len())?;
            Ok(Value::list(picked.into_iter().map(|p| items[p].clone()).collect()))
        }
        (Value::Tuple(items), Value::Int(i)) => {
            Ok(items[normalize_index(*i, items.len(), "tuple")?].clone())
        }
        (Value::Tuple(items), Value::Slice(slice)) => {
            let picked = slice.positions(items.len())?;
            Ok(Value::tuple(picked.into_iter().map(|p| items[p].clone()).collect()))
        }
        (Value::Str(s), Value::Int(i)) => {
            let chars: Vec<char> = s.chars().collect();
            let c = chars[normalize_index(*i, chars.len(), "string")?];
            Ok(Value::str(c.encode_utf8(&mut [0; 4])))
        }
        (Value::Str(s), Value::Slice(slice)) => {
            let chars: Vec<char> = s.chars().collect();
            let picked = slice.positions(chars.len())?;
            Ok(Value::str(picked.into_iter().map(|p| chars[p]).collect::<String>()))
        }
        (Value::Range(range), Value::Int(i)) => {
            let position = normalize_index(*i, range.len(), "range")?;
            range
                .get(position)
                .map(Value::Int)
                .ok_or_else(|| index_out_of_range("range"))
        }
        (Value::Range(range), Value::Slice(slice)) => {
            let picked = slice.positions(range.len())?;
            Ok(Value::list(
                picked
                    .into_iter()
                    .filter_map(|p| range.get(p))
                    .map(Value::Int)
                    .collect(),
            ))
        }
        (Value::Dict(map), key) => {
            let hashed = HashKey::from_value(key)?;
            map.borrow()
                .get(&hashed)
                .cloned()
                .ok_or_else(|| key_not_found(&key.repr()))
        }
        (Value::List(_), other) => Err(index_type_error("list", other)),
        (Value::Tuple(_), other) => Err(index_type_error("tuple", other)),
        (Value::Str(_), other) => Err(index_type_error("string", other)),
        (Value::Range(_), other) => Err(index_type_error("range", other)),
        (other, _) => Err(not_subscriptable(other.type_name())),
    }
}

/// `object[index] = value`.
pub fn set_item(object: &Value, index: &Value, value: Value) -> EvalResult<()> {
    match (object, index) {
        (Value::List(items), Value::Int(i)) => {
            let mut items = items.borrow_mut();
            let position = normalize_index(*i, items.len(), "list")?;
            items[position] = value;
            Ok(())
        }
        (Value::List(_), other) => Err(type_error(format!(
            "list indices must be integers, not {}",
            other.type_name()
        ))),
        (Value::Dict(map), key) => {
            let hashed = HashKey::from_value(key)?;
            map.borrow_mut().insert(hashed, value);
            Ok(())
        }
        (other, _) => Err(item_assignment_unsupported(other.type_name())),
    }
}

/// `del object[index]`.
pub fn delete_item(object: &Value, index: &Value) -> EvalResult<()> {
    match (object, index) {
        (Value::List(items), Value::Int(i)) => {
            let mut items = items.borrow_mut();
            let position = normalize_index(*i, items.len(), "list")?;
            items.remove(position);
            Ok(())
        }
        (Value::List(items), Value::Slice(slice)) => {
            let mut items = items.borrow_mut();
            let mut picked = slice.positions(items.len())?;
            picked.sort_unstable_by(|a, b| b.cmp(a));
            for position in picked {
                items.remove(position);
            }
            Ok(())
        }
        (Value::Dict(map), key) => {
            let hashed = HashKey::from_value(key)?;
            map.borrow_mut()
                .remove(&hashed)
                .map(|_| ())
                .ok_or_else(|| key_not_found(&key.repr()))
        }
        (other, _) => Err(item_deletion_unsupported(other.type_name())),
    }
}
