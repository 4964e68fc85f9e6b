//! Numeric built-ins.

use std::cmp::Ordering;

use wks_ir::BinaryOp;

use super::convert::float_to_int;
use crate::errors::{
    integer_overflow, not_comparable, value_error, wrong_arg_type, EvalResult,
};
use crate::interpreter::Evaluator;
use crate::operators::evaluate_binary;
use crate::value::{Args, Value};

pub(super) fn abs(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("abs", 1)?;
    match &args.positional[0] {
        Value::Int(i) => i
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| integer_overflow("abs()")),
        Value::Float(f) => Ok(Value::Float(f.abs())),
        Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
        other => Err(wrong_arg_type("abs", "number", other.type_name())),
    }
}

pub(super) fn min(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    extreme(ev, args, "min", Ordering::Less)
}

pub(super) fn max(ev: &Evaluator<'_>, args: Args) -> EvalResult {
    extreme(ev, args, "max", Ordering::Greater)
}

/// `min`/`max`: one iterable or several arguments, optional `key` and
/// `default`. Ties keep the first candidate.
fn extreme(ev: &Evaluator<'_>, args: Args, func: &str, wanted: Ordering) -> EvalResult {
    args.at_least(func, 1)?;
    args.only_named(func, &["key", "default"])?;
    let candidates = if args.len() == 1 {
        args.positional[0].to_vec()?
    } else {
        args.positional.clone()
    };
    let key = args.named("key").filter(|k| !matches!(k, Value::Null));
    let mut best: Option<(Value, Value)> = None;
    for candidate in candidates {
        let rank = match key {
            Some(key) => ev.call_value(key, Args::new(vec![candidate.clone()]))?,
            None => candidate.clone(),
        };
        best = Some(match best {
            None => (candidate, rank),
            Some((current, current_rank)) => {
                let ordering = rank.compare(&current_rank)?.ok_or_else(|| {
                    not_comparable(BinaryOp::Lt, rank.type_name(), current_rank.type_name())
                })?;
                if ordering == wanted {
                    (candidate, rank)
                } else {
                    (current, current_rank)
                }
            }
        });
    }
    match (best, args.named("default")) {
        (Some((value, _)), _) => Ok(value),
        (None, Some(default)) => Ok(default.clone()),
        (None, None) => Err(value_error(format!("{func}() arg is an empty sequence"))),
    }
}

/// `sum(iterable, start=0)`.
pub(super) fn sum(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("sum", 1, 2)?;
    args.only_named("sum", &["start"])?;
    let mut total = args.param(1, "start").cloned().unwrap_or(Value::Int(0));
    if matches!(total, Value::Str(_)) {
        return Err(wrong_arg_type("sum", "non-string start", "str"));
    }
    for item in args.positional[0].iter()? {
        total = evaluate_binary(&total, &item, BinaryOp::Add)?;
    }
    Ok(total)
}

/// `round(x)` rounds half to even and returns an int; `round(x, n)`
/// keeps the input type.
pub(super) fn round(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("round", 1, 2)?;
    args.only_named("round", &["ndigits"])?;
    let digits = match args.param(1, "ndigits") {
        None | Some(Value::Null) => None,
        Some(value) => Some(value.as_int("round")?),
    };
    match (&args.positional[0], digits) {
        (Value::Int(i), None) => Ok(Value::Int(*i)),
        (Value::Int(i), Some(n)) if n >= 0 => Ok(Value::Int(*i)),
        (Value::Int(i), Some(n)) => {
            let factor = u32::try_from(-n)
                .ok()
                .and_then(|e| 10i64.checked_pow(e));
            match factor {
                Some(factor) => {
                    let rounded = (*i as f64 / factor as f64).round_ties_even() * factor as f64;
                    float_to_int(rounded).map(Value::Int)
                }
                None => Ok(Value::Int(0)),
            }
        }
        (Value::Float(f), None) => {
            if f.is_infinite() {
                return Err(integer_overflow("round()"));
            }
            float_to_int(f.round_ties_even()).map(Value::Int)
        }
        (Value::Float(f), Some(n)) => {
            if !f.is_finite() {
                return Ok(Value::Float(*f));
            }
            let exponent = i32::try_from(n.clamp(-308, 308)).unwrap_or(0);
            let factor = 10f64.powi(exponent);
            let scaled = f * factor;
            if scaled.is_finite() {
                Ok(Value::Float(scaled.round_ties_even() / factor))
            } else {
                Ok(Value::Float(*f))
            }
        }
        (Value::Bool(b), _) => Ok(Value::Int(i64::from(*b))),
        (other, _) => Err(wrong_arg_type("round", "number", other.type_name())),
    }
}

/// `divmod(a, b)` = `(a // b, a % b)`.
pub(super) fn divmod(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("divmod", 2)?;
    let (a, b) = (&args.positional[0], &args.positional[1]);
    let quotient = evaluate_binary(a, b, BinaryOp::FloorDiv)?;
    let remainder = evaluate_binary(a, b, BinaryOp::Mod)?;
    Ok(Value::tuple(vec![quotient, remainder]))
}

/// `pow(base, exp)` or modular `pow(base, exp, mod)`.
pub(super) fn pow(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("pow", 2, 3)?;
    args.no_named("pow")?;
    if args.len() == 2 {
        return evaluate_binary(&args.positional[0], &args.positional[1], BinaryOp::Pow);
    }
    let base = args.int("pow", 0)?;
    let exponent = args.int("pow", 1)?;
    let modulus = args.int("pow", 2)?;
    if modulus == 0 {
        return Err(value_error("pow() 3rd argument cannot be 0"));
    }
    if exponent < 0 {
        return Err(value_error("pow() 2nd argument cannot be negative when 3rd argument specified"));
    }
    Ok(Value::Int(mod_pow(base, exponent, modulus)))
}

/// Square-and-multiply in `i128`; the result takes the modulus's sign.
fn mod_pow(base: i64, mut exponent: i64, modulus: i64) -> i64 {
    let m = i128::from(modulus);
    let mut result: i128 = 1 % m;
    let mut base = i128::from(base).rem_euclid(m);
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = result * base % m;
        }
        base = base * base % m;
        exponent >>= 1;
    }
    let mut result = result.rem_euclid(m.abs());
    if m < 0 && result != 0 {
        result += m;
    }
    // |result| < |modulus|, so it fits.
    i64::try_from(result).unwrap_or(0)
}
