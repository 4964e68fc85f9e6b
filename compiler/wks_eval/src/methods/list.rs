//! `list` and `tuple` methods, and the sort shared with `sorted()`.

use std::cell::RefCell;
use std::cmp::Ordering;

use wks_ir::BinaryOp;

use crate::errors::{
    attribute_not_allowed, index_out_of_range, not_comparable, value_error, EvalError, EvalResult,
};
use crate::interpreter::Evaluator;
use crate::value::{Args, Value};

pub(super) fn call(
    ev: &Evaluator<'_>,
    receiver: &Value,
    items: &RefCell<Vec<Value>>,
    name: &str,
    args: Args,
) -> EvalResult {
    let qualified = format!("list.{name}");
    let func = qualified.as_str();
    match name {
        "append" => {
            args.exact(func, 1)?;
            let item = args.positional.into_iter().next().unwrap_or(Value::Null);
            items.borrow_mut().push(item);
            Ok(Value::Null)
        }
        "extend" => {
            args.exact(func, 1)?;
            // Snapshot first: `xs.extend(xs)` iterates the list it grows.
            let extra = args.positional[0].to_vec()?;
            items.borrow_mut().extend(extra);
            Ok(Value::Null)
        }
        "insert" => {
            args.exact(func, 2)?;
            let index = args.int(func, 0)?;
            let mut items = items.borrow_mut();
            let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let position = if index < 0 { (index + len).max(0) } else { index.min(len) };
            items.insert(position as usize, args.positional[1].clone());
            Ok(Value::Null)
        }
        "pop" => {
            args.between(func, 0, 1)?;
            let mut items = items.borrow_mut();
            if items.is_empty() {
                return Err(EvalError::new(
                    crate::errors::ExceptionKind::IndexError,
                    "pop from empty list",
                ));
            }
            let len = i64::try_from(items.len()).unwrap_or(i64::MAX);
            let index = match args.get(0) {
                Some(value) => value.as_int(func)?,
                None => -1,
            };
            let resolved = if index < 0 { index + len } else { index };
            if !(0..len).contains(&resolved) {
                return Err(index_out_of_range("pop"));
            }
            Ok(items.remove(resolved as usize))
        }
        "remove" => {
            args.exact(func, 1)?;
            // Search under a shared borrow: the target may be this list.
            let position = position_of(&items.borrow(), &args.positional[0])?;
            match position {
                Some(position) => {
                    items.borrow_mut().remove(position);
                    Ok(Value::Null)
                }
                None => Err(value_error("list.remove(x): x not in list")),
            }
        }
        "sort" => {
            args.exact_with(func, 0, &["key", "reverse"])?;
            let key = args.named("key").cloned();
            let reverse = args.named("reverse").is_some_and(Value::is_truthy);
            // The key function may read the list, so sort a copy.
            let snapshot = items.borrow().clone();
            let sorted = sort_values(ev, snapshot, key.as_ref(), reverse)?;
            *items.borrow_mut() = sorted;
            Ok(Value::Null)
        }
        "reverse" => {
            args.exact(func, 0)?;
            items.borrow_mut().reverse();
            Ok(Value::Null)
        }
        "copy" => {
            args.exact(func, 0)?;
            Ok(Value::list(items.borrow().clone()))
        }
        "clear" => {
            args.exact(func, 0)?;
            items.borrow_mut().clear();
            Ok(Value::Null)
        }
        "index" | "count" => {
            let snapshot = items.borrow().clone();
            call_sequence(&snapshot, receiver.type_name(), name, &args)
        }
        _ => Err(attribute_not_allowed(receiver.type_name(), name)),
    }
}

/// Read-only methods shared by lists and tuples.
pub(super) fn call_sequence(
    items: &[Value],
    type_name: &str,
    name: &str,
    args: &Args,
) -> EvalResult {
    let qualified = format!("{type_name}.{name}");
    let func = qualified.as_str();
    args.exact(func, 1)?;
    let target = &args.positional[0];
    match name {
        "index" => position_of(items, target)?
            .map(|p| Value::Int(i64::try_from(p).unwrap_or(i64::MAX)))
            .ok_or_else(|| value_error(format!("{type_name}.index(x): x not in {type_name}"))),
        "count" => {
            let mut count: i64 = 0;
            for item in items {
                if item.equals(target)? {
                    count += 1;
                }
            }
            Ok(Value::Int(count))
        }
        _ => Err(attribute_not_allowed(type_name, name)),
    }
}

fn position_of(items: &[Value], target: &Value) -> EvalResult<Option<usize>> {
    for (position, item) in items.iter().enumerate() {
        if item.equals(target)? {
            return Ok(Some(position));
        }
    }
    Ok(None)
}

/// Stable sort by `key(item)` (or the items themselves).
///
/// A pair that cannot be ordered fails the whole sort with a `TypeError`
/// (or the comparison's own error); the first failure is reported.
pub(crate) fn sort_values(
    ev: &Evaluator<'_>,
    items: Vec<Value>,
    key: Option<&Value>,
    reverse: bool,
) -> EvalResult<Vec<Value>> {
    let keys: Vec<Value> = match key {
        Some(Value::Null) | None => items.clone(),
        Some(key) => items
            .iter()
            .map(|item| ev.call_value(key, Args::new(vec![item.clone()])))
            .collect::<EvalResult<_>>()?,
    };
    let mut failure: Option<EvalError> = None;
    let mut order: Vec<usize> = (0..items.len()).collect();
    order.sort_by(|&a, &b| {
        let compared = keys[a].compare(&keys[b]).and_then(|ordering| {
            ordering.ok_or_else(|| {
                not_comparable(BinaryOp::Lt, keys[a].type_name(), keys[b].type_name())
            })
        });
        let ordering = compared.unwrap_or_else(|err| {
            failure.get_or_insert(err);
            Ordering::Equal
        });
        if reverse {
            ordering.reverse()
        } else {
            ordering
        }
    });
    if let Some(err) = failure {
        return Err(err);
    }
    Ok(order.into_iter().map(|i| items[i].clone()).collect())
}
