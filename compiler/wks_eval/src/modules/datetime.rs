//! `datetime`: dates and times as attribute namespaces.
//!
//! A datetime is a namespace with `year`, `month`, `day`, `hour`,
//! `minute`, `second`, `microsecond`, `timestamp` (float seconds since the
//! epoch), `utcoffset` (seconds) and `tzname` (`null` for naive values
//! from `strptime`). Functions taking a datetime also accept a bare
//! timestamp, read as UTC.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use chrono::format::{Item, StrftimeItems};
use chrono::{
    DateTime, Datelike, FixedOffset, Local, NaiveDate, NaiveDateTime, NaiveTime, Offset,
    TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;

use crate::errors::{key_not_found, value_error, wrong_arg_type, EvalError, EvalResult};
use crate::interpreter::Evaluator;
use crate::registry::{Member, ModuleDescriptor};
use crate::value::{Args, Value};

pub(super) const DESCRIPTOR: ModuleDescriptor = ModuleDescriptor {
    name: "datetime",
    members: &[
        Member::function("now", now),
        Member::function("utcnow", utcnow),
        Member::function("today", today),
        Member::function("fromtimestamp", fromtimestamp),
        Member::function("strftime", strftime),
        Member::function("strptime", strptime),
        Member::function("weekday", weekday),
        Member::function("isoformat", isoformat),
    ],
};

/// Resolve an IANA zone name.
pub(super) fn parse_zone(name: &str) -> EvalResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| key_not_found(&format!("No time zone found with key {name}")))
}

/// A UTC instant from float seconds since the epoch.
pub(super) fn utc_from_timestamp(timestamp: f64) -> EvalResult<DateTime<Utc>> {
    let seconds = timestamp.floor();
    let nanos = ((timestamp - seconds) * 1e9).round().clamp(0.0, 999_999_999.0) as u32;
    if !seconds.is_finite() || seconds.abs() > 1e15 {
        return Err(value_error("timestamp out of range"));
    }
    DateTime::from_timestamp(seconds as i64, nanos)
        .ok_or_else(|| value_error("timestamp out of range"))
}

/// Render with a strftime pattern, rejecting unknown directives instead of
/// failing mid-format.
pub(super) fn format_with<Tz2>(dt: &DateTime<Tz2>, pattern: &str) -> EvalResult<String>
where
    Tz2: TimeZone,
    Tz2::Offset: std::fmt::Display,
{
    let items: Vec<Item<'_>> = StrftimeItems::new(pattern).collect();
    if items.iter().any(|item| matches!(item, Item::Error)) {
        return Err(value_error(format!("invalid format string {pattern:?}")));
    }
    let mut out = String::new();
    write!(out, "{}", dt.format_with_items(items.into_iter()))
        .map_err(|_| value_error(format!("invalid format string {pattern:?}")))?;
    Ok(out)
}

fn fields<Tz2>(dt: &DateTime<Tz2>, tzname: Option<String>) -> Value
where
    Tz2: TimeZone,
{
    let offset = dt.offset().fix().local_minus_utc();
    let timestamp = dt.timestamp() as f64 + f64::from(dt.timestamp_subsec_micros()) / 1e6;
    let mut map = BTreeMap::new();
    map.insert("year".to_string(), Value::Int(i64::from(dt.year())));
    map.insert("month".to_string(), Value::Int(i64::from(dt.month())));
    map.insert("day".to_string(), Value::Int(i64::from(dt.day())));
    map.insert("hour".to_string(), Value::Int(i64::from(dt.hour())));
    map.insert("minute".to_string(), Value::Int(i64::from(dt.minute())));
    map.insert("second".to_string(), Value::Int(i64::from(dt.second())));
    map.insert(
        "microsecond".to_string(),
        Value::Int(i64::from(dt.timestamp_subsec_micros())),
    );
    map.insert("timestamp".to_string(), Value::Float(timestamp));
    map.insert("utcoffset".to_string(), Value::Int(i64::from(offset)));
    map.insert(
        "tzname".to_string(),
        tzname.map_or(Value::Null, Value::str),
    );
    Value::namespace(map)
}

fn zoned(dt: &DateTime<Utc>, zone: Option<&Value>) -> EvalResult {
    match zone {
        None | Some(Value::Null) => {
            let local = dt.with_timezone(&Local);
            let name = local.format("%Z").to_string();
            Ok(fields(&local, Some(name)))
        }
        Some(Value::Str(name)) => {
            let tz = parse_zone(name)?;
            let local = dt.with_timezone(&tz);
            Ok(fields(&local, Some(local.format("%Z").to_string())))
        }
        Some(other) => Err(wrong_arg_type("datetime", "zone name", other.type_name())),
    }
}

/// A datetime argument as an instant with its offset; the second value is
/// false for naive datetimes.
fn instant(func: &str, value: &Value) -> EvalResult<(DateTime<FixedOffset>, bool)> {
    match value {
        Value::Int(_) | Value::Float(_) => {
            let utc = utc_from_timestamp(value.as_float(func)?)?;
            Ok((utc.fixed_offset(), true))
        }
        Value::Namespace(map) => {
            let map = map.borrow();
            let field = |name: &str| {
                map.get(name)
                    .cloned()
                    .ok_or_else(|| value_error(format!("{func}() datetime is missing '{name}'")))
            };
            let timestamp = field("timestamp")?.as_float(func)?;
            let offset = field("utcoffset")?.as_int(func)?;
            let aware = !matches!(field("tzname")?, Value::Null);
            let offset = i32::try_from(offset)
                .ok()
                .and_then(FixedOffset::east_opt)
                .ok_or_else(|| value_error("utcoffset out of range"))?;
            Ok((utc_from_timestamp(timestamp)?.with_timezone(&offset), aware))
        }
        other => Err(wrong_arg_type(func, "datetime or timestamp", other.type_name())),
    }
}

/// `now(tz=null)`: local time, or the time in the named zone.
fn now(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("now", 0, 1)?;
    args.only_named("now", &["tz"])?;
    zoned(&Utc::now(), args.param(0, "tz"))
}

fn utcnow(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("utcnow", 0)?;
    Ok(fields(&Utc::now(), Some("UTC".to_string())))
}

/// `today()`: local midnight.
fn today(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("today", 0)?;
    let now = Local::now();
    let midnight = now
        .date_naive()
        .and_time(NaiveTime::MIN)
        .and_local_timezone(Local)
        .earliest()
        .unwrap_or(now);
    let name = midnight.format("%Z").to_string();
    Ok(fields(&midnight, Some(name)))
}

/// `fromtimestamp(ts, tz=null)`.
fn fromtimestamp(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("fromtimestamp", 1, 2)?;
    args.only_named("fromtimestamp", &["tz"])?;
    let utc = utc_from_timestamp(args.float("fromtimestamp", 0)?)?;
    zoned(&utc, args.param(1, "tz"))
}

/// `strftime(dt, format)`.
fn strftime(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("strftime", 2)?;
    let (dt, _) = instant("strftime", &args.positional[0])?;
    format_with(&dt, args.str("strftime", 1)?).map(Value::str)
}

fn parse_failure(text: &str, pattern: &str) -> EvalError {
    value_error(format!(
        "time data {text:?} does not match format {pattern:?}"
    ))
}

/// `strptime(text, format)`: a naive datetime. Date-only formats give
/// midnight.
fn strptime(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("strptime", 2)?;
    let text = args.str("strptime", 0)?;
    let pattern = args.str("strptime", 1)?;
    if let Ok(aware) = DateTime::parse_from_str(text, pattern) {
        return Ok(fields(&aware, Some(aware.format("%:z").to_string())));
    }
    let naive = NaiveDateTime::parse_from_str(text, pattern)
        .or_else(|_| {
            NaiveDate::parse_from_str(text, pattern).map(|date| date.and_time(NaiveTime::MIN))
        })
        .map_err(|_| parse_failure(text, pattern))?;
    Ok(fields(&naive.and_utc(), None))
}

/// `weekday(dt)`: Monday is 0.
fn weekday(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.exact("weekday", 1)?;
    let (dt, _) = instant("weekday", &args.positional[0])?;
    Ok(Value::Int(i64::from(dt.weekday().num_days_from_monday())))
}

/// `isoformat(dt, sep="T")`.
fn isoformat(_: &Evaluator<'_>, args: Args) -> EvalResult {
    args.between("isoformat", 1, 2)?;
    args.only_named("isoformat", &["sep"])?;
    let sep = match args.param(1, "sep") {
        None => "T".to_string(),
        Some(value) => value.to_str(),
    };
    let (dt, aware) = instant("isoformat", &args.positional[0])?;
    let mut out = format!("{}{sep}{}", dt.format("%Y-%m-%d"), dt.format("%H:%M:%S"));
    if dt.timestamp_subsec_micros() != 0 {
        let _ = write!(out, ".{:06}", dt.timestamp_subsec_micros());
    }
    if aware {
        let _ = write!(out, "{}", dt.format("%:z"));
    }
    Ok(Value::str(out))
}
