//! `set` methods.

use std::cell::RefCell;

use crate::errors::{attribute_not_allowed, key_not_found, EvalResult};
use crate::value::{Args, HashKey, SetItems, Value};

pub(super) fn call(items: &RefCell<SetItems>, name: &str, args: Args) -> EvalResult {
    let qualified = format!("set.{name}");
    let func = qualified.as_str();
    match name {
        "add" | "remove" | "discard" => {
            args.exact(func, 1)?;
            let key = HashKey::from_value(&args.positional[0])?;
            let mut items = items.borrow_mut();
            match name {
                "add" => {
                    items.insert(key);
                }
                "remove" => {
                    if !items.remove(&key) {
                        return Err(key_not_found(&args.positional[0].repr()));
                    }
                }
                _ => {
                    items.remove(&key);
                }
            }
            Ok(Value::Null)
        }
        "union" | "intersection" | "difference" => {
            args.no_named(func)?;
            let mut result = items.borrow().clone();
            for other in &args.positional {
                let other = hash_all(other)?;
                result = match name {
                    "union" => result.union(&other).cloned().collect(),
                    "intersection" => result.intersection(&other).cloned().collect(),
                    _ => result.difference(&other).cloned().collect(),
                };
            }
            Ok(Value::set(result))
        }
        "copy" => {
            args.exact(func, 0)?;
            Ok(Value::set(items.borrow().clone()))
        }
        _ => Err(attribute_not_allowed("set", name)),
    }
}

/// Hash every element of an iterable.
pub(crate) fn hash_all(iterable: &Value) -> EvalResult<SetItems> {
    if let Value::Set(items) = iterable {
        return Ok(items.borrow().clone());
    }
    iterable
        .iter()?
        .map(|item| HashKey::from_value(&item))
        .collect()
}
