//! Datetime Package
//!
//! Timestamps are ISO 8601 strings (see [`casting::parse_date`]); functions
//! that produce one render it as `YYYY-MM-DDTHH:MM:SS.fffZ`.
//!
//! Functions: ticks, addDays, addHours, dayOfMonth, dayOfWeek, year,
//! dateDiffTicks

use alloc::format;
use alloc::string::String;

use chrono::{DateTime, Datelike, TimeDelta, Utc};

use crate::{
    api::Options,
    casting,
    evaluator::apply::{apply_with_error, fixed, verify_string},
    expression::{Expression, kind},
    registry::{FunctionEvaluator, Registry, RegistryError},
    validators,
    values::{ReturnType, Value},
};

fn timestamp(expr: &Expression, value: &Value) -> Result<DateTime<Utc>, String> {
    let Value::Str(text) = value else {
        return Err(format!(
            "{} should contain a timestamp string, found {}",
            expr,
            value.type_name()
        ));
    };
    casting::parse_date(text).map_err(|e| format!("{}: {}", expr, e))
}

fn timestamp_ticks(expr: &Expression, value: &Value) -> Result<i64, String> {
    casting::to_ticks(&timestamp(expr, value)?).map_err(|e| format!("{}: {}", expr, e))
}

fn ticks(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [stamp] = fixed(expr, args)?;
    Ok(Value::Int(timestamp_ticks(expr, stamp)?))
}

/// Builds `add*(timestamp, amount)` shifting by `amount * millis_per_unit`.
fn add_units(
    millis_per_unit: f64,
) -> impl Fn(&Expression, &[Value], &Options) -> Result<Value, String> + Send + Sync + 'static {
    move |expr: &Expression, args: &[Value], _: &Options| {
        let [stamp, amount] = fixed(expr, args)?;
        let start = timestamp(expr, stamp)?;
        let Some(amount) = amount.as_f64() else {
            return Err(format!("{} should contain a number of units", expr));
        };
        let amount = amount * millis_per_unit;
        let shifted = (amount.is_finite() && amount.abs() < i64::MAX as f64)
            .then(|| TimeDelta::try_milliseconds(amount.round() as i64))
            .flatten()
            .and_then(|delta| start.checked_add_signed(delta))
            .filter(casting::in_date_range)
            .ok_or_else(|| format!("{} is out of the supported date range", expr))?;
        Ok(Value::str(casting::format_date(&shifted)))
    }
}

/// Builds a single-timestamp accessor such as `year(timestamp)`.
fn field(
    get: fn(&DateTime<Utc>) -> i64,
) -> impl Fn(&Expression, &[Value], &Options) -> Result<Value, String> + Send + Sync + 'static {
    move |expr: &Expression, args: &[Value], _: &Options| {
        let [stamp] = fixed(expr, args)?;
        Ok(Value::Int(get(&timestamp(expr, stamp)?)))
    }
}

fn day_of_month(dt: &DateTime<Utc>) -> i64 {
    i64::from(dt.day())
}

/// 0 for Sunday through 6 for Saturday.
fn day_of_week(dt: &DateTime<Utc>) -> i64 {
    i64::from(dt.weekday().num_days_from_sunday())
}

fn year(dt: &DateTime<Utc>) -> i64 {
    i64::from(dt.year())
}

/// Ticks from the second timestamp to the first.
fn date_diff_ticks(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [later, earlier] = fixed(expr, args)?;
    let later = timestamp_ticks(expr, later)?;
    let earlier = timestamp_ticks(expr, earlier)?;
    later
        .checked_sub(earlier)
        .map(Value::Int)
        .ok_or_else(|| format!("{} is out of range for ticks", expr))
}

pub fn register_datetime(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(FunctionEvaluator::new(
        kind::TICKS,
        apply_with_error(ticks, Some(verify_string)),
        ReturnType::NUMBER,
        validators::unary_string(),
    ))?;

    for (name, get) in [
        (kind::DAY_OF_MONTH, day_of_month as fn(&DateTime<Utc>) -> i64),
        (kind::DAY_OF_WEEK, day_of_week),
        (kind::YEAR, year),
    ] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_with_error(field(get), Some(verify_string)),
            ReturnType::NUMBER,
            validators::unary_string(),
        ))?;
    }

    for (name, millis) in [(kind::ADD_DAYS, 86_400_000.0), (kind::ADD_HOURS, 3_600_000.0)] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_with_error(add_units(millis), None),
            ReturnType::STRING,
            validators::all([
                validators::binary(),
                validators::positional(&[ReturnType::STRING, ReturnType::NUMBER]),
            ]),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::DATE_DIFF_TICKS,
        apply_with_error(date_diff_ticks, Some(verify_string)),
        ReturnType::NUMBER,
        validators::all([validators::binary(), validators::of_type(ReturnType::STRING)]),
    ))?;

    Ok(())
}

#[cfg(test)]
#[path = "datetime_test.rs"]
mod datetime_test;
