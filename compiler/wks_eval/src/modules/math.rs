//! `math`: floating-point functions and integer helpers.

use std::f64::consts;

use crate::builtins::float_to_int;
use crate::errors::{
    integer_overflow, math_domain_error, math_range_error, value_error, EvalResult,
};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "math",
    members: &[
        Member::constant("pi", || Value::Float(consts::PI)),
        Member::constant("e", || Value::Float(consts::E)),
        Member::constant("tau", || Value::Float(consts::TAU)),
        Member::constant("inf", || Value::Float(f64::INFINITY)),
        Member::constant("nan", || Value::Float(f64::NAN)),
        Member::function("sqrt", sqrt),
        Member::function("exp", exp),
        Member::function("log", log),
        Member::function("log2", log2),
        Member::function("log10", log10),
        Member::function("sin", sin),
        Member::function("cos", cos),
        Member::function("tan", tan),
        Member::function("asin", asin),
        Member::function("acos", acos),
        Member::function("atan", atan),
        Member::function("atan2", atan2),
        Member::function("floor", floor),
        Member::function("ceil", ceil),
        Member::function("trunc", trunc),
        Member::function("fabs", fabs),
        Member::function("factorial", factorial),
        Member::function("gcd", gcd),
        Member::function("isclose", isclose),
        Member::function("isfinite", isfinite),
        Member::function("isinf", isinf),
        Member::function("isnan", isnan),
        Member::function("degrees", degrees),
        Member::function("radians", radians),
        Member::function("hypot", hypot),
        Member::function("pow", pow),
        Member::function("copysign", copysign),
    ],
};

/// Map a float result back into the script, turning a NaN produced from
/// non-NaN input into a domain error and an infinity produced from finite
/// input into a range error.
fn checked(inputs: &[f64], result: f64) -> EvalResult {
    if result.is_nan() && !inputs.iter().any(|x| x.is_nan()) {
        return Err(math_domain_error());
    }
    if result.is_infinite() && inputs.iter().all(|x| x.is_finite()) {
        return Err(math_range_error());
    }
    Ok(Value::Float(result))
}

fn unary(func: &str, args: &Args, op: fn(f64) -> f64) -> EvalResult {
    args.exact(func, 1)?;
    let x = args.float(func, 0)?;
    checked(&[x], op(x))
}

fn sqrt(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("sqrt", &args, f64::sqrt)
}

fn exp(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("exp", &args, f64::exp)
}

/// `log(x)` or `log(x, base)`.
fn log(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("log", 1, 2)?;
    args.no_named("log")?;
    let x = args.float("log", 0)?;
    if x <= 0.0 {
        return Err(math_domain_error());
    }
    match args.get(1) {
        None => checked(&[x], x.ln()),
        Some(_) => {
            let base = args.float("log", 1)?;
            if base <= 0.0 || base == 1.0 {
                return Err(math_domain_error());
            }
            checked(&[x, base], x.ln() / base.ln())
        }
    }
}

fn positive_log(func: &str, args: &Args, op: fn(f64) -> f64) -> EvalResult {
    args.exact(func, 1)?;
    let x = args.float(func, 0)?;
    if x <= 0.0 {
        return Err(math_domain_error());
    }
    checked(&[x], op(x))
}

fn log2(_: &Evaluator<'_>, args: Args) -> EvalResult {
    positive_log("log2", &args, f64::log2)
}

fn log10(_: &Evaluator<'_>, args: Args) -> EvalResult {
    positive_log("log10", &args, f64::log10)
}

fn sin(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("sin", &args, f64::sin)
}

fn cos(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("cos", &args, f64::cos)
}

fn tan(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("tan", &args, f64::tan)
}

fn asin(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("asin", &args, f64::asin)
}

fn acos(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("acos", &args, f64::acos)
}

fn atan(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("atan", &args, f64::atan)
}

fn atan2(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("atan2", 2)?;
    let (y, x) = (args.float("atan2", 0)?, args.float("atan2", 1)?);
    checked(&[y, x], y.atan2(x))
}

fn rounding(func: &str, args: &Args, op: fn(f64) -> f64) -> EvalResult {
    args.exact(func, 1)?;
    match &args.positional[0] {
        Value::Int(i) => Ok(Value::Int(*i)),
        _ => {
            let x = args.float(func, 0)?;
            if x.is_infinite() {
                return Err(integer_overflow(func));
            }
            float_to_int(op(x)).map(Value::Int)
        }
    }
}

fn floor(_: &Evaluator<'_>, args: Args) -> EvalResult {
    rounding("floor", &args, f64::floor)
}

fn ceil(_: &Evaluator<'_>, args: Args) -> EvalResult {
    rounding("ceil", &args, f64::ceil)
}

fn trunc(_: &Evaluator<'_>, args: Args) -> EvalResult {
    rounding("trunc", &args, f64::trunc)
}

fn fabs(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("fabs", &args, f64::abs)
}

fn factorial(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("factorial", 1)?;
    let n = args.int("factorial", 0)?;
    if n < 0 {
        return Err(value_error("factorial() not defined for negative values"));
    }
    let mut product: i64 = 1;
    for k in 2..=n {
        product = product
            .checked_mul(k)
            .ok_or_else(|| integer_overflow("factorial()"))?;
    }
    Ok(Value::Int(product))
}

/// `gcd(*integers)`; `gcd()` is 0.
fn gcd(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.no_named("gcd")?;
    let mut acc: u64 = 0;
    for index in 0..args.len() {
        let mut b = args.int("gcd", index)?.unsigned_abs();
        let mut a = acc;
        while b != 0 {
            (a, b) = (b, a % b);
        }
        acc = a;
    }
    i64::try_from(acc)
        .map(Value::Int)
        .map_err(|_| integer_overflow("gcd()"))
}

/// `isclose(a, b, rel_tol=1e-09, abs_tol=0.0)`.
fn isclose(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact_with("isclose", 2, &["rel_tol", "abs_tol"])?;
    let (a, b) = (args.float("isclose", 0)?, args.float("isclose", 1)?);
    let rel_tol = match args.named("rel_tol") {
        Some(v) => v.as_float("isclose")?,
        None => 1e-9,
    };
    let abs_tol = match args.named("abs_tol") {
        Some(v) => v.as_float("isclose")?,
        None => 0.0,
    };
    if rel_tol < 0.0 || abs_tol < 0.0 {
        return Err(value_error("tolerances must be non-negative"));
    }
    if a == b {
        return Ok(Value::Bool(true));
    }
    if a.is_infinite() || b.is_infinite() {
        return Ok(Value::Bool(false));
    }
    let diff = (a - b).abs();
    Ok(Value::Bool(
        diff <= (rel_tol * b).abs() || diff <= (rel_tol * a).abs() || diff <= abs_tol,
    ))
}

fn predicate(func: &str, args: &Args, test: fn(f64) -> bool) -> EvalResult {
    args.exact(func, 1)?;
    Ok(Value::Bool(test(args.float(func, 0)?)))
}

fn isfinite(_: &Evaluator<'_>, args: Args) -> EvalResult {
    predicate("isfinite", &args, f64::is_finite)
}

fn isinf(_: &Evaluator<'_>, args: Args) -> EvalResult {
    predicate("isinf", &args, f64::is_infinite)
}

fn isnan(_: &Evaluator<'_>, args: Args) -> EvalResult {
    predicate("isnan", &args, f64::is_nan)
}

fn degrees(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("degrees", &args, f64::to_degrees)
}

fn radians(_: &Evaluator<'_>, args: Args) -> EvalResult {
    unary("radians", &args, f64::to_radians)
}

/// `hypot(*coordinates)`.
fn hypot(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.no_named("hypot")?;
    let coordinates = (0..args.len())
        .map(|i| args.float("hypot", i))
        .collect::<EvalResult<Vec<f64>>>()?;
    if coordinates.iter().any(|x| x.is_infinite()) {
        return Ok(Value::Float(f64::INFINITY));
    }
    let result = coordinates.iter().fold(0.0_f64, |acc, x| acc.hypot(*x));
    checked(&coordinates, result)
}

fn pow(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("pow", 2)?;
    let (x, y) = (args.float("pow", 0)?, args.float("pow", 1)?);
    if x == 0.0 && y < 0.0 {
        return Err(math_domain_error());
    }
    checked(&[x, y], x.powf(y))
}

fn copysign(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("copysign", 2)?;
    let (x, y) = (args.float("copysign", 0)?, args.float("copysign", 1)?);
    Ok(Value::Float(x.copysign(y)))
}
