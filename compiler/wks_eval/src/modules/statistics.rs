//! `statistics`: averages and spread of numeric data.

use crate::errors::{value_error, wrong_arg_type, EvalResult};
use crate::interpreter::Evaluator;
use crate::methods::sort_values;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, HashKey, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "statistics",
    members: &[
        Member::function("mean", mean),
        Member::function("median", median),
        Member::function("median_low", median_low),
        Member::function("median_high", median_high),
        Member::function("mode", mode),
        Member::function("variance", variance),
        Member::function("pvariance", pvariance),
        Member::function("stdev", stdev),
        Member::function("pstdev", pstdev),
    ],
};

/// The single data argument, which must be non-empty.
fn data(func: &str, args: &Args, at_least: usize) -> EvalResult<Vec<Value>> {
    args.exact(func, 1)?;
    let items = args.positional[0].to_vec()?;
    if items.len() < at_least {
        return Err(value_error(if at_least == 1 {
            format!("{func} requires at least one data point")
        } else {
            format!("{func} requires at least two data points")
        }));
    }
    Ok(items)
}

fn numbers(func: &str, items: &[Value]) -> EvalResult<Vec<f64>> {
    items
        .iter()
        .map(|item| match item {
            Value::Int(_) | Value::Float(_) => item.as_float(func),
            other => Err(wrong_arg_type(func, "number", other.type_name())),
        })
        .collect()
}

fn sorted(ev: &Evaluator<'_>, func: &str, args: &Args) -> EvalResult<Vec<Value>> {
    let items = data(func, args, 1)?;
    sort_values(ev, items, None, false)
}

/// Arithmetic mean; an int when every point is an int and the division is
/// exact.
fn mean(_: &Evaluator<'_>, args: Args) -> EvalResult {
    let items = data("mean", &args, 1)?;
    let ints: Option<Vec<i64>> = items
        .iter()
        .map(|item| match item {
            Value::Int(i) => Some(*i),
            _ => None,
        })
        .collect();
    if let Some(ints) = ints {
        let total: i128 = ints.iter().map(|i| i128::from(*i)).sum();
        let n = ints.len() as i128;
        if total % n == 0 {
            if let Ok(exact) = i64::try_from(total / n) {
                return Ok(Value::Int(exact));
            }
        }
        return Ok(Value::Float(total as f64 / n as f64));
    }
    let values = numbers("mean", &items)?;
    Ok(Value::Float(values.iter().sum::<f64>() / values.len() as f64))
}

fn median(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    let items = sorted(ev, "median", &args)?;
    let n = items.len();
    if n % 2 == 1 {
        return Ok(items[n / 2].clone());
    }
    let pair = numbers("median", &items[n / 2 - 1..=n / 2])?;
    Ok(Value::Float((pair[0] + pair[1]) / 2.0))
}

fn median_low(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    let items = sorted(ev, "median_low", &args)?;
    let n = items.len();
    let index = if n % 2 == 1 { n / 2 } else { n / 2 - 1 };
    Ok(items[index].clone())
}

fn median_high(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    let items = sorted(ev, "median_high", &args)?;
    Ok(items[items.len() / 2].clone())
}

/// Most common value; ties go to the first one seen.
fn mode(_: &Evaluator<'_>, args: Args) -> EvalResult {
    let items = data("mode", &args, 1)?;
    let mut counts: Vec<(HashKey, usize)> = Vec::new();
    for item in &items {
        let key = HashKey::from_value(item)?;
        match counts.iter_mut().find(|(seen, _)| *seen == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    let best = counts.iter().map(|(_, count)| *count).max().unwrap_or(0);
    counts
        .into_iter()
        .find(|(_, count)| *count == best)
        .map(|(key, _)| key.to_value())
        .ok_or_else(|| value_error("no mode for empty data"))
}

/// Sum of squared deviations from the mean.
fn squared_deviations(values: &[f64]) -> f64 {
    let mean = values.iter().sum::<f64>() / values.len() as f64;
    values.iter().map(|x| (x - mean).powi(2)).sum()
}

fn sample_variance(func: &str, args: &Args) -> EvalResult<f64> {
    let values = numbers(func, &data(func, args, 2)?)?;
    Ok(squared_deviations(&values) / (values.len() - 1) as f64)
}

fn population_variance(func: &str, args: &Args) -> EvalResult<f64> {
    let values = numbers(func, &data(func, args, 1)?)?;
    Ok(squared_deviations(&values) / values.len() as f64)
}

fn variance(_: &Evaluator<'_>, args: Args) -> EvalResult {
    sample_variance("variance", &args).map(Value::Float)
}

fn pvariance(_: &Evaluator<'_>, args: Args) -> EvalResult {
    population_variance("pvariance", &args).map(Value::Float)
}

fn stdev(_: &Evaluator<'_>, args: Args) -> EvalResult {
    sample_variance("stdev", &args).map(|v| Value::Float(v.sqrt()))
}

fn pstdev(_: &Evaluator<'_>, args: Args) -> EvalResult {
    population_variance("pstdev", &args).map(|v| Value::Float(v.sqrt()))
}
