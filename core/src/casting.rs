//! Type coercion utilities.
//!
//! Pure functions that classify and convert [`Value`]s. Each conversion is
//! total over its declared domain and returns a [`CastError`] outside of it;
//! none of them panic on user input.
//!
//! Temporal values travel through expressions as ISO 8601 strings. They are
//! parsed with [`parse_date`] and rendered back with [`format_date`]. Durations
//! use ticks of 100 nanoseconds.

use core::cmp::Ordering;

use alloc::string::{String, ToString};
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

use crate::values::Value;

/// Number of 100-nanosecond ticks in one second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;
pub const TICKS_PER_MINUTE: i64 = 60 * TICKS_PER_SECOND;
pub const TICKS_PER_HOUR: i64 = 60 * TICKS_PER_MINUTE;
pub const TICKS_PER_DAY: i64 = 24 * TICKS_PER_HOUR;

/// Ticks elapsed between 0001-01-01T00:00:00Z and the Unix epoch.
pub const UNIX_EPOCH_TICKS: i64 = 621_355_968_000_000_000;

/// Years a timestamp may fall in. Every instant in this range has a tick
/// count and a four-digit rendering that [`parse_date`] reads back.
pub const MIN_YEAR: i32 = 1;
pub const MAX_YEAR: i32 = 9999;

/// Errors produced by the coercion utilities.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CastError {
    #[error("expected a number, found {found}")]
    NotANumber { found: &'static str },

    #[error("expected an integer, found {found}")]
    NotAnInteger { found: String },

    #[error("'{input}' is not a valid number")]
    InvalidNumber { input: String },

    #[error("'{input}' is not a valid timestamp")]
    InvalidDate { input: String },

    #[error("{value} is out of range for {target}")]
    OutOfRange { value: String, target: &'static str },
}

// ============================================================================
// Numbers
// ============================================================================

pub fn is_number(value: &Value) -> bool {
    value.is_number()
}

/// True iff `value` is numeric with no fractional component.
///
/// Covers both `Int` and finite `Float` values that happen to be whole.
pub fn is_integer(value: &Value) -> bool {
    match value {
        Value::Int(_) => true,
        Value::Float(x) => x.is_finite() && x.fract() == 0.0,
        _ => false,
    }
}

/// Convert any numeric representation to a double.
pub fn to_f64(value: &Value) -> Result<f64, CastError> {
    value.as_f64().ok_or(CastError::NotANumber {
        found: value.type_name(),
    })
}

/// Convert an integral value to `i64`. Fractional numbers are rejected.
pub fn to_i64(value: &Value) -> Result<i64, CastError> {
    match value {
        Value::Int(i) => Ok(*i),
        Value::Float(x) if is_integer(value) => {
            // i64::MAX as f64 rounds up to 2^63, hence the strict bound.
            if *x >= i64::MIN as f64 && *x < i64::MAX as f64 {
                Ok(*x as i64)
            } else {
                Err(CastError::OutOfRange {
                    value: x.to_string(),
                    target: "integer",
                })
            }
        }
        Value::Float(x) => Err(CastError::NotAnInteger {
            found: x.to_string(),
        }),
        other => Err(CastError::NotAnInteger {
            found: other.type_name().to_string(),
        }),
    }
}

/// Decimal separator used by a culture tag such as `de-DE` or `en_US`.
pub fn decimal_separator(locale: Option<&str>) -> char {
    let language = locale
        .and_then(|tag| tag.split(['-', '_']).next())
        .map(|lang| lang.to_ascii_lowercase());
    match language.as_deref() {
        Some(
            "de" | "fr" | "es" | "it" | "pt" | "nl" | "ru" | "pl" | "sv" | "da" | "fi" | "nb"
            | "tr" | "cs" | "uk" | "id",
        ) => ',',
        _ => '.',
    }
}

/// Parse a numeral. Integral text yields `Int`, anything else `Float`.
///
/// In cultures using a decimal comma, `.` is read as a group separator.
pub fn parse_number(input: &str, locale: Option<&str>) -> Result<Value, CastError> {
    let trimmed = input.trim();
    let invalid = || CastError::InvalidNumber {
        input: input.to_string(),
    };
    if trimmed.is_empty() {
        return Err(invalid());
    }

    let normalized: String = if decimal_separator(locale) == ',' {
        trimmed
            .chars()
            .filter(|c| *c != '.')
            .map(|c| if c == ',' { '.' } else { c })
            .collect()
    } else {
        trimmed.to_string()
    };

    if let Ok(i) = normalized.parse::<i64>() {
        return Ok(Value::Int(i));
    }
    match normalized.parse::<f64>() {
        Ok(x) if x.is_finite() => Ok(Value::Float(x)),
        _ => Err(invalid()),
    }
}

/// Render a double with the culture's decimal separator.
pub fn format_number(value: f64, locale: Option<&str>) -> String {
    let text = Value::Float(value).to_string();
    match decimal_separator(locale) {
        '.' => text,
        sep => text.replace('.', &sep.to_string()),
    }
}

/// Numeric equality across `Int`/`Float`, structural equality otherwise.
pub fn loose_equals(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => a == b,
        (a, b) if a.is_number() && b.is_number() => a.as_f64() == b.as_f64(),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| loose_equals(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .zip(b.iter())
                    .all(|((ka, va), (kb, vb))| ka == kb && loose_equals(va, vb))
        }
        (a, b) => a == b,
    }
}

/// Ordering between two numbers or two strings. `None` for anything else.
pub fn compare(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(b)),
        (a, b) if a.is_number() && b.is_number() => a.as_f64()?.partial_cmp(&b.as_f64()?),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => None,
    }
}

/// Logical truth: only `null` and `false` are false.
pub fn is_truthy(value: &Value) -> bool {
    !matches!(value, Value::Null | Value::Bool(false))
}

// ============================================================================
// Dates
// ============================================================================

/// Whether `dt` lies within [`MIN_YEAR`]..=[`MAX_YEAR`].
pub fn in_date_range(dt: &DateTime<Utc>) -> bool {
    (MIN_YEAR..=MAX_YEAR).contains(&dt.year())
}

/// Parse an ISO 8601 timestamp.
///
/// Accepts RFC 3339 with an offset, a local date-time (read as UTC), or a
/// bare `YYYY-MM-DD` date (midnight UTC). Instants outside
/// [`MIN_YEAR`]..=[`MAX_YEAR`] are rejected.
pub fn parse_date(input: &str) -> Result<DateTime<Utc>, CastError> {
    let trimmed = input.trim();
    let parsed = DateTime::parse_from_rfc3339(trimmed)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
        })
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .ok()?
                .and_hms_opt(0, 0, 0)
                .map(|dt| dt.and_utc())
        });

    match parsed {
        Some(dt) if in_date_range(&dt) => Ok(dt),
        Some(_) => Err(CastError::OutOfRange {
            value: input.to_string(),
            target: "a timestamp",
        }),
        None => Err(CastError::InvalidDate {
            input: input.to_string(),
        }),
    }
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS.fffZ`.
pub fn format_date(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Ticks elapsed since 0001-01-01T00:00:00Z.
pub fn to_ticks(dt: &DateTime<Utc>) -> Result<i64, CastError> {
    dt.timestamp()
        .checked_mul(TICKS_PER_SECOND)
        .and_then(|ticks| ticks.checked_add(UNIX_EPOCH_TICKS))
        .and_then(|ticks| ticks.checked_add(i64::from(dt.timestamp_subsec_nanos() / 100)))
        .ok_or_else(|| CastError::OutOfRange {
            value: format_date(dt),
            target: "ticks",
        })
}
