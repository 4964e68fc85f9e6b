//! `time`: wall-clock and monotonic clocks.

use std::sync::OnceLock;
use std::time::Instant;

use chrono::Utc;

use crate::errors::{integer_overflow, EvalResult};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "time",
    members: &[
        Member::function("time", time),
        Member::function("time_ns", time_ns),
        Member::function("monotonic", monotonic),
    ],
};

/// Seconds since the Unix epoch as a float.
fn time(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("time", 0)?;
    let now = Utc::now();
    Ok(Value::Float(
        now.timestamp() as f64 + f64::from(now.timestamp_subsec_nanos()) / 1e9,
    ))
}

fn time_ns(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("time_ns", 0)?;
    Utc::now()
        .timestamp_nanos_opt()
        .map(Value::Int)
        .ok_or_else(|| integer_overflow("time_ns()"))
}

/// Seconds since an arbitrary fixed point in this process.
fn monotonic(_: &Evaluator<'_>, args: Args) -> EvalResult {
    static START: OnceLock<Instant> = OnceLock::new();
    args.exact("monotonic", 0)?;
    let start = START.get_or_init(Instant::now);
    Ok(Value::Float(start.elapsed().as_secs_f64()))
}
