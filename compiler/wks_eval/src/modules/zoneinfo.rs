//! `zoneinfo`: the IANA time-zone database.

use chrono::{Offset, Utc};
use chrono_tz::TZ_VARIANTS;

use super::datetime::{format_with, parse_zone, utc_from_timestamp};
use crate::errors::EvalResult;
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "zoneinfo",
    members: &[
        Member::function("available_timezones", available_timezones),
        Member::function("convert", convert),
        Member::function("utcoffset", utcoffset),
    ],
};

const DEFAULT_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Every zone name, sorted.
fn available_timezones(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("available_timezones", 0)?;
    let mut names: Vec<&str> = TZ_VARIANTS.iter().map(|tz| tz.name()).collect();
    names.sort_unstable();
    Ok(Value::list(names.into_iter().map(Value::str).collect()))
}

/// `convert(timestamp, zone, format="%Y-%m-%d %H:%M:%S %Z")`: the local
/// time in `zone`.
fn convert(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("convert", 2, 3)?;
    args.only_named("convert", &["format"])?;
    let utc = utc_from_timestamp(args.float("convert", 0)?)?;
    let zone = parse_zone(args.str("convert", 1)?)?;
    let pattern = match args.param(2, "format") {
        None | Some(Value::Null) => DEFAULT_FORMAT.to_string(),
        Some(value) => value.to_str(),
    };
    format_with(&utc.with_timezone(&zone), &pattern).map(Value::str)
}

/// `utcoffset(zone, timestamp=now)`: offset from UTC in seconds.
fn utcoffset(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("utcoffset", 1, 2)?;
    args.only_named("utcoffset", &["timestamp"])?;
    let zone = parse_zone(args.str("utcoffset", 0)?)?;
    let utc = match args.param(1, "timestamp") {
        None | Some(Value::Null) => Utc::now(),
        Some(value) => utc_from_timestamp(value.as_float("utcoffset")?)?,
    };
    let offset = utc.with_timezone(&zone).offset().fix().local_minus_utc();
    Ok(Value::Int(i64::from(offset)))
}
