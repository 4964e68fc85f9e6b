//! `random`: pseudo-random numbers from a per-thread generator.

use std::cell::RefCell;

use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};

use crate::errors::{type_error, value_error, wrong_arg_type, EvalError, EvalResult, ExceptionKind};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "random",
    members: &[
        Member::function("seed", seed),
        Member::function("random", random),
        Member::function("uniform", uniform),
        Member::function("randint", randint),
        Member::function("randrange", randrange),
        Member::function("choice", choice),
        Member::function("shuffle", shuffle),
        Member::function("sample", sample),
    ],
};

thread_local! {
    static RNG: RefCell<StdRng> = RefCell::new(StdRng::from_entropy());
}

fn with_rng<T>(f: impl FnOnce(&mut StdRng) -> T) -> T {
    RNG.with(|rng| f(&mut rng.borrow_mut()))
}

/// `seed(n=null)`: reseed; `null` draws fresh entropy.
fn seed(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("seed", 0, 1)?;
    args.no_named("seed")?;
    let fresh = match args.get(0) {
        None | Some(Value::Null) => StdRng::from_entropy(),
        Some(Value::Int(n)) => StdRng::seed_from_u64(*n as u64),
        Some(other) => return Err(wrong_arg_type("seed", "int", other.type_name())),
    };
    with_rng(|rng| *rng = fresh);
    Ok(Value::Null)
}

fn random(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("random", 0)?;
    Ok(Value::Float(with_rng(|rng| rng.gen::<f64>())))
}

fn uniform(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("uniform", 2)?;
    let (a, b) = (args.float("uniform", 0)?, args.float("uniform", 1)?);
    let t: f64 = with_rng(|rng| rng.gen());
    Ok(Value::Float(a + (b - a) * t))
}

/// `randint(a, b)`: inclusive on both ends.
fn randint(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("randint", 2)?;
    let (a, b) = (args.int("randint", 0)?, args.int("randint", 1)?);
    if a > b {
        return Err(value_error(format!("empty range for randint({a}, {b})")));
    }
    Ok(Value::Int(with_rng(|rng| rng.gen_range(a..=b))))
}

/// `randrange(stop)` or `randrange(start, stop, step=1)`.
fn randrange(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("randrange", 1, 3)?;
    args.no_named("randrange")?;
    let (start, stop, step) = match args.len() {
        1 => (0, args.int("randrange", 0)?, 1),
        2 => (args.int("randrange", 0)?, args.int("randrange", 1)?, 1),
        _ => (
            args.int("randrange", 0)?,
            args.int("randrange", 1)?,
            args.int("randrange", 2)?,
        ),
    };
    let range = crate::value::RangeValue::new(start, stop, step)?;
    let len = range.len();
    if len == 0 {
        return Err(value_error("empty range for randrange()"));
    }
    let position = with_rng(|rng| rng.gen_range(0..len));
    range
        .get(position)
        .map(Value::Int)
        .ok_or_else(|| value_error("empty range for randrange()"))
}

fn choice(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("choice", 1)?;
    let items = args.positional[0].to_vec()?;
    with_rng(|rng| items.choose(rng).cloned())
        .ok_or_else(|| EvalError::new(ExceptionKind::IndexError, "cannot choose from an empty sequence"))
}

/// `shuffle(list)`: shuffles in place.
fn shuffle(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("shuffle", 1)?;
    match &args.positional[0] {
        Value::List(items) => {
            with_rng(|rng| items.borrow_mut().shuffle(rng));
            Ok(Value::Null)
        }
        other => Err(wrong_arg_type("shuffle", "list", other.type_name())),
    }
}

/// `sample(population, k)`: `k` distinct positions, in selection order.
fn sample(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("sample", 2)?;
    if matches!(args.positional[0], Value::Dict(_)) {
        return Err(type_error("population must be a sequence"));
    }
    let population = args.positional[0].to_vec()?;
    let k = args.int("sample", 1)?;
    let too_large = || value_error("sample larger than population or is negative");
    let k = usize::try_from(k).map_err(|_| too_large())?;
    if k > population.len() {
        return Err(too_large());
    }
    let picked = with_rng(|rng| index::sample(rng, population.len(), k));
    Ok(Value::list(
        picked.into_iter().map(|i| population[i].clone()).collect(),
    ))
}
