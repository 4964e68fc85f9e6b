//! Sequence built-ins: `len`, `range`, `sorted`, `zip`, ...

use crate::errors::{type_error, EvalResult};
use crate::interpreter::Evaluator;
use crate::methods::sort_values;
use crate::value::{Args, RangeValue, Value, ValueIter};

fn int_value(n: usize) -> Value {
    Value::Int(i64::try_from(n).unwrap_or(i64::MAX))
}

pub(super) fn len(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("len", 1)?;
    let n = match &args.positional[0] {
        Value::Str(s) => s.chars().count(),
        Value::List(items) => items.borrow().len(),
        Value::Tuple(items) => items.len(),
        Value::Dict(map) => map.borrow().len(),
        Value::Set(items) => items.borrow().len(),
        Value::Range(range) => range.len(),
        Value::Namespace(fields) => fields.borrow().len(),
        other => {
            return Err(type_error(format!(
                "object of type '{}' has no len()",
                other.type_name()
            )))
        }
    };
    Ok(int_value(n))
}

/// `range(stop)`, `range(start, stop)`, `range(start, stop, step)`.
pub(super) fn range(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("range", 1, 3)?;
    args.no_named("range")?;
    let (start, stop, step) = match args.len() {
        1 => (0, args.int("range", 0)?, 1),
        2 => (args.int("range", 0)?, args.int("range", 1)?, 1),
        _ => (
            args.int("range", 0)?,
            args.int("range", 1)?,
            args.int("range", 2)?,
        ),
    };
    RangeValue::new(start, stop, step).map(Value::Range)
}

/// `sorted(iterable, key=null, reverse=false)`.
pub(super) fn sorted(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact_with("sorted", 1, &["key", "reverse"])?;
    let items = args.positional[0].to_vec()?;
    let key = args.named("key").filter(|k| !matches!(k, Value::Null));
    let reverse = args.named("reverse").is_some_and(Value::is_truthy);
    sort_values(ev, items, key, reverse).map(Value::list)
}

/// `reversed(sequence)` as a new list.
pub(super) fn reversed(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("reversed", 1)?;
    let mut items = args.positional[0].to_vec()?;
    items.reverse();
    Ok(Value::list(items))
}

/// `enumerate(iterable, start=0)` as a list of `(index, item)` tuples.
pub(super) fn enumerate(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("enumerate", 1, 2)?;
    args.only_named("enumerate", &["start"])?;
    let start = match args.param(1, "start") {
        Some(start) => start.as_int("enumerate")?,
        None => 0,
    };
    let mut pairs = Vec::new();
    let mut index = start;
    for item in args.positional[0].iter()? {
        pairs.push(Value::tuple(vec![Value::Int(index), item]));
        index = index.saturating_add(1);
    }
    Ok(Value::list(pairs))
}

/// `zip(*iterables)`: tuples up to the shortest input.
pub(super) fn zip(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.no_named("zip")?;
    let mut iterators = args
        .positional
        .iter()
        .map(Value::iter)
        .collect::<EvalResult<Vec<ValueIter>>>()?;
    let mut rows = Vec::new();
    if iterators.is_empty() {
        return Ok(Value::list(rows));
    }
    'rows: loop {
        let mut row = Vec::with_capacity(iterators.len());
        for iterator in &mut iterators {
            match iterator.next() {
                Some(item) => row.push(item),
                None => break 'rows,
            }
        }
        rows.push(Value::tuple(row));
    }
    Ok(Value::list(rows))
}

pub(super) fn any(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("any", 1)?;
    Ok(Value::Bool(args.positional[0].iter()?.any(|v| v.is_truthy())))
}

pub(super) fn all(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("all", 1)?;
    Ok(Value::Bool(args.positional[0].iter()?.all(|v| v.is_truthy())))
}
