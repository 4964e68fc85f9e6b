//! `collections`: `Counter` and `OrderedDict`, both producing plain dicts.

use crate::errors::{integer_overflow, EvalResult};
use crate::interpreter::Evaluator;
use crate::methods::pairs_of;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, DictMap, HashKey, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "collections",
    members: &[
        Member::function("Counter", counter),
        Member::function("OrderedDict", ordered_dict),
        Member::function("most_common", most_common),
    ],
};

fn bump(counts: &mut DictMap, key: HashKey, by: i64) -> EvalResult<()> {
    let current = match counts.get(&key) {
        Some(Value::Int(n)) => *n,
        _ => 0,
    };
    let next = current
        .checked_add(by)
        .ok_or_else(|| integer_overflow("Counter"))?;
    counts.insert(key, Value::Int(next));
    Ok(())
}

/// `Counter(iterable=null, **counts)`: a dict of element counts. A dict
/// argument is taken as existing counts.
fn counter(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("Counter", 0, 1)?;
    let mut counts = DictMap::new();
    match args.get(0) {
        None | Some(Value::Null) => {}
        Some(Value::Dict(existing)) => {
            for (key, value) in existing.borrow().iter() {
                bump(&mut counts, key.clone(), value.as_int("Counter")?)?;
            }
        }
        Some(iterable) => {
            for item in iterable.iter()? {
                bump(&mut counts, HashKey::from_value(&item)?, 1)?;
            }
        }
    }
    for (name, value) in &args.named {
        bump(
            &mut counts,
            HashKey::Str(name.as_str().into()),
            value.as_int("Counter")?,
        )?;
    }
    Ok(Value::dict(counts))
}

/// `OrderedDict(pairs=null, **entries)`. Dicts already iterate in a fixed
/// order, so this is `dict`.
fn ordered_dict(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("OrderedDict", 0, 1)?;
    let mut entries = match args.get(0) {
        None | Some(Value::Null) => Vec::new(),
        Some(source) => pairs_of(source)?,
    };
    for (name, value) in &args.named {
        entries.push((HashKey::Str(name.as_str().into()), value.clone()));
    }
    Ok(Value::dict(entries.into_iter().collect()))
}

/// `most_common(counter, n=null)`: `(element, count)` pairs, highest count
/// first; equal counts keep key order.
fn most_common(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("most_common", 1, 2)?;
    args.only_named("most_common", &["n"])?;
    let Value::Dict(counts) = &args.positional[0] else {
        return Err(crate::errors::wrong_arg_type(
            "most_common",
            "dict",
            args.positional[0].type_name(),
        ));
    };
    let mut pairs: Vec<(Value, i64)> = counts
        .borrow()
        .iter()
        .map(|(key, value)| Ok((key.to_value(), value.as_int("most_common")?)))
        .collect::<EvalResult<_>>()?;
    pairs.sort_by(|a, b| b.1.cmp(&a.1));
    let limit = match args.param(1, "n") {
        None | Some(Value::Null) => pairs.len(),
        Some(n) => usize::try_from(n.as_int("most_common")?).unwrap_or(0),
    };
    Ok(Value::list(
        pairs
            .into_iter()
            .take(limit)
            .map(|(key, count)| Value::tuple(vec![key, Value::Int(count)]))
            .collect(),
    ))
}
