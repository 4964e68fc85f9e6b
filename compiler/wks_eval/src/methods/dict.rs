//! `dict` methods.

use std::cell::RefCell;

use crate::errors::{attribute_not_allowed, key_not_found, type_error, EvalResult};
use crate::exec::unpack_pair;
use crate::value::{Args, DictMap, HashKey, Value};

pub(super) fn call(map: &RefCell<DictMap>, name: &str, args: Args) -> EvalResult {
    let qualified = format!("dict.{name}");
    let func = qualified.as_str();
    match name {
        "get" => {
            args.between(func, 1, 2)?;
            args.no_named(func)?;
            let key = HashKey::from_value(&args.positional[0])?;
            let fallback = args.get(1).cloned().unwrap_or(Value::Null);
            Ok(map.borrow().get(&key).cloned().unwrap_or(fallback))
        }
        "keys" => {
            args.exact(func, 0)?;
            Ok(Value::list(map.borrow().keys().map(HashKey::to_value).collect()))
        }
        "values" => {
            args.exact(func, 0)?;
            Ok(Value::list(map.borrow().values().cloned().collect()))
        }
        "items" => {
            args.exact(func, 0)?;
            Ok(Value::list(
                map.borrow()
                    .iter()
                    .map(|(k, v)| Value::tuple(vec![k.to_value(), v.clone()]))
                    .collect(),
            ))
        }
        "pop" => {
            args.between(func, 1, 2)?;
            args.no_named(func)?;
            let key = HashKey::from_value(&args.positional[0])?;
            let removed = map.borrow_mut().remove(&key);
            match (removed, args.get(1)) {
                (Some(value), _) => Ok(value),
                (None, Some(fallback)) => Ok(fallback.clone()),
                (None, None) => Err(key_not_found(&args.positional[0].repr())),
            }
        }
        "setdefault" => {
            args.between(func, 1, 2)?;
            args.no_named(func)?;
            let key = HashKey::from_value(&args.positional[0])?;
            let default = args.get(1).cloned().unwrap_or(Value::Null);
            Ok(map.borrow_mut().entry(key).or_insert(default).clone())
        }
        "update" => {
            args.between(func, 0, 1)?;
            let mut entries = Vec::new();
            if let Some(source) = args.get(0) {
                entries = pairs_of(source)?;
            }
            for (name, value) in &args.named {
                entries.push((HashKey::Str(name.as_str().into()), value.clone()));
            }
            map.borrow_mut().extend(entries);
            Ok(Value::Null)
        }
        "copy" => {
            args.exact(func, 0)?;
            Ok(Value::dict(map.borrow().clone()))
        }
        "clear" => {
            args.exact(func, 0)?;
            map.borrow_mut().clear();
            Ok(Value::Null)
        }
        _ => Err(attribute_not_allowed("dict", name)),
    }
}

/// Key/value pairs from a dict or an iterable of two-element sequences.
pub(crate) fn pairs_of(source: &Value) -> EvalResult<Vec<(HashKey, Value)>> {
    if let Value::Dict(other) = source {
        return Ok(other
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect());
    }
    let mut pairs = Vec::new();
    for item in source.iter()? {
        let (key, value) = unpack_pair(&item).map_err(|_| {
            type_error(format!(
                "cannot convert {} element to a key/value pair",
                item.type_name()
            ))
        })?;
        pairs.push((HashKey::from_value(&key)?, value));
    }
    Ok(pairs)
}
