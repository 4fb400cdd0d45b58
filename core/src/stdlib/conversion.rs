//! Conversion Package
//!
//! Casts: int, float, string, bool
//! Durations: ticksToDays, ticksToHours, ticksToMinutes
//!
//! Durations are integer counts of 100-nanosecond ticks. The tick functions
//! accept any integral number (`Int`, or a whole `Float`) and reject anything
//! else at evaluation time.

use alloc::format;
use alloc::string::{String, ToString};

use crate::{
    api::Options,
    casting::{self, TICKS_PER_DAY, TICKS_PER_HOUR, TICKS_PER_MINUTE},
    evaluator::apply::{apply_with_error, fixed, verify_not_null},
    expression::{Expression, kind},
    registry::{FunctionEvaluator, Registry, RegistryError},
    validators,
    values::{ReturnType, Value},
};

/// Builds the logic converting a tick count into units of `ticks_per_unit`.
fn ticks_to(
    ticks_per_unit: i64,
) -> impl Fn(&Expression, &[Value], &Options) -> Result<Value, String> + Send + Sync + 'static {
    move |expr: &Expression, args: &[Value], _: &Options| {
        let [ticks] = fixed(expr, args)?;
        if !casting::is_integer(ticks) {
            return Err(format!("{} should contain an integer of ticks", expr));
        }
        let ticks = casting::to_f64(ticks).map_err(|e| format!("{}: {}", expr, e))?;
        Ok(Value::Float(ticks / ticks_per_unit as f64))
    }
}

fn to_int(expr: &Expression, args: &[Value], options: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    let number = match value {
        Value::Bool(b) => return Ok(Value::Int(i64::from(*b))),
        Value::Str(s) => {
            casting::parse_number(s, options.locale()).map_err(|e| format!("{}: {}", expr, e))?
        }
        other => other.clone(),
    };
    match number {
        Value::Int(i) => Ok(Value::Int(i)),
        Value::Float(x) => casting::to_i64(&Value::Float(x.trunc()))
            .map(Value::Int)
            .map_err(|e| format!("{}: {}", expr, e)),
        other => Err(format!(
            "{} can't convert {} to an integer",
            expr,
            other.type_name()
        )),
    }
}

fn to_float(expr: &Expression, args: &[Value], options: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    let number = match value {
        Value::Str(s) => {
            casting::parse_number(s, options.locale()).map_err(|e| format!("{}: {}", expr, e))?
        }
        other => other.clone(),
    };
    casting::to_f64(&number)
        .map(Value::Float)
        .map_err(|_| format!("{} can't convert {} to a number", expr, number.type_name()))
}

/// Rendering of any value, `null` as the empty string. Numbers use the
/// culture's decimal separator.
fn to_text(expr: &Expression, args: &[Value], options: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    Ok(match value {
        Value::Float(x) => Value::str(casting::format_number(*x, options.locale())),
        value @ Value::Str(_) => value.clone(),
        Value::Null => Value::str(""),
        other => Value::str(other.to_string()),
    })
}

/// `true`/`false` text, non-zero numbers, and truthiness for everything else.
fn to_bool(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    match value {
        Value::Str(s) if s.eq_ignore_ascii_case("true") => Ok(Value::Bool(true)),
        Value::Str(s) if s.eq_ignore_ascii_case("false") => Ok(Value::Bool(false)),
        Value::Str(s) => Err(format!("{} can't read '{}' as a boolean", expr, s)),
        Value::Int(i) => Ok(Value::Bool(*i != 0)),
        Value::Float(x) => Ok(Value::Bool(*x != 0.0)),
        other => Ok(Value::Bool(casting::is_truthy(other))),
    }
}

pub fn register_conversion(registry: &mut Registry) -> Result<(), RegistryError> {
    for (name, per_unit) in [
        (kind::TICKS_TO_DAYS, TICKS_PER_DAY),
        (kind::TICKS_TO_HOURS, TICKS_PER_HOUR),
        (kind::TICKS_TO_MINUTES, TICKS_PER_MINUTE),
    ] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_with_error(ticks_to(per_unit), None),
            ReturnType::NUMBER,
            validators::unary_number(),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::INT,
        apply_with_error(to_int, Some(verify_not_null)),
        ReturnType::NUMBER,
        validators::unary(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::FLOAT,
        apply_with_error(to_float, Some(verify_not_null)),
        ReturnType::NUMBER,
        validators::unary(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::STRING,
        apply_with_error(to_text, None),
        ReturnType::STRING,
        validators::unary(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::BOOL,
        apply_with_error(to_bool, None),
        ReturnType::BOOLEAN,
        validators::unary(),
    ))?;

    Ok(())
}

#[cfg(test)]
#[path = "conversion_test.rs"]
mod conversion_test;
