//! Math Package
//!
//! Arithmetic operators: `+ - * / % ^`
//! Aggregates: min, max, sum, average
//! Rounding: abs, floor, ceiling, round
//!
//! Integer arithmetic stays in `Int` while both operands are integers and
//! reports overflow instead of wrapping. As soon as a `Float` is involved the
//! computation is done in `f64`.

use alloc::format;
use alloc::string::String;

use crate::{
    api::Options,
    casting,
    evaluator::apply::{
        apply, apply_sequence, apply_with_error, fixed, verify_array, verify_number,
        verify_number_or_string,
    },
    expression::{Expression, kind},
    registry::{FunctionEvaluator, Registry, RegistryError},
    validators,
    values::{ReturnType, Value},
};

const DIVIDE_BY_ZERO: &str = "Cannot divide by 0";

fn overflow(op: &str, a: &Value, b: &Value) -> String {
    format!("integer overflow in {} {} {}", a, op, b)
}

/// Numeric payloads of two values already checked to be numbers.
fn floats(a: &Value, b: &Value) -> (f64, f64) {
    (a.as_f64().unwrap_or(f64::NAN), b.as_f64().unwrap_or(f64::NAN))
}

// ============================================================================
// Arithmetic
// ============================================================================

/// Addition; with a string operand the operands are concatenated.
fn add(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x
            .checked_add(*y)
            .map(Value::Int)
            .ok_or_else(|| overflow("+", a, b)),
        (Value::Str(_), _) | (_, Value::Str(_)) => Ok(Value::str(format!("{}{}", a, b))),
        _ => {
            let (x, y) = floats(a, b);
            Ok(Value::Float(x + y))
        }
    }
}

fn subtract(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x
            .checked_sub(*y)
            .map(Value::Int)
            .ok_or_else(|| overflow("-", a, b)),
        _ => {
            let (x, y) = floats(a, b);
            Ok(Value::Float(x - y))
        }
    }
}

fn multiply(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (Value::Int(x), Value::Int(y)) => x
            .checked_mul(*y)
            .map(Value::Int)
            .ok_or_else(|| overflow("*", a, b)),
        _ => {
            let (x, y) = floats(a, b);
            Ok(Value::Float(x * y))
        }
    }
}

/// Division truncates when both operands are integers.
fn divide(a: &Value, b: &Value) -> Result<Value, String> {
    match (a, b) {
        (_, Value::Int(0)) => Err(DIVIDE_BY_ZERO.into()),
        (Value::Int(x), Value::Int(y)) => x
            .checked_div(*y)
            .map(Value::Int)
            .ok_or_else(|| overflow("/", a, b)),
        _ => {
            let (x, y) = floats(a, b);
            if y == 0.0 {
                return Err(DIVIDE_BY_ZERO.into());
            }
            Ok(Value::Float(x / y))
        }
    }
}

fn modulo(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [a, b] = fixed(expr, args)?;
    match (a, b) {
        (_, Value::Int(0)) => Err(DIVIDE_BY_ZERO.into()),
        (Value::Int(x), Value::Int(y)) => x
            .checked_rem(*y)
            .map(Value::Int)
            .ok_or_else(|| overflow("%", a, b)),
        _ => {
            let (x, y) = floats(a, b);
            if y == 0.0 {
                return Err(DIVIDE_BY_ZERO.into());
            }
            Ok(Value::Float(x % y))
        }
    }
}

fn power(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [a, b] = fixed(expr, args)?;
    if let (Value::Int(base), Value::Int(exp)) = (a, b) {
        if let Ok(exp) = u32::try_from(*exp) {
            return base
                .checked_pow(exp)
                .map(Value::Int)
                .ok_or_else(|| overflow("^", a, b));
        }
    }
    let (x, y) = floats(a, b);
    Ok(Value::Float(x.powf(y)))
}

// ============================================================================
// Aggregates
// ============================================================================

fn pick(args: &[Value], keep_first: impl Fn(&Value, &Value) -> bool) -> Value {
    let Some((mut best, rest)) = args.split_first() else {
        return Value::Null;
    };
    for candidate in rest {
        if !keep_first(best, candidate) {
            best = candidate;
        }
    }
    best.clone()
}

fn min(args: &[Value]) -> Value {
    pick(args, |a, b| {
        casting::compare(a, b) != Some(core::cmp::Ordering::Greater)
    })
}

fn max(args: &[Value]) -> Value {
    pick(args, |a, b| casting::compare(a, b) != Some(core::cmp::Ordering::Less))
}

/// The numbers of a single array argument.
fn numbers<'v>(expr: &Expression, args: &'v [Value]) -> Result<&'v [Value], String> {
    let [items] = fixed(expr, args)?;
    let items = items.as_array().unwrap_or_default();
    if items.iter().all(Value::is_number) {
        Ok(items)
    } else {
        Err(format!("{} should contain an array of numbers", expr))
    }
}

fn sum(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    numbers(expr, args)?
        .iter()
        .try_fold(Value::Int(0), |acc, item| add(&acc, item))
}

fn average(expr: &Expression, args: &[Value], options: &Options) -> Result<Value, String> {
    let count = numbers(expr, args)?.len();
    if count == 0 {
        return Err(format!("{} should contain a non-empty array", expr));
    }
    let total = sum(expr, args, options)?;
    Ok(Value::Float(total.as_f64().unwrap_or(f64::NAN) / count as f64))
}

// ============================================================================
// Rounding
// ============================================================================

fn abs(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    match value {
        Value::Int(i) => i
            .checked_abs()
            .map(Value::Int)
            .ok_or_else(|| format!("integer overflow in abs({})", i)),
        other => Ok(Value::Float(other.as_f64().unwrap_or(f64::NAN).abs())),
    }
}

fn floor(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    Ok(match value {
        Value::Float(x) => Value::Float(x.floor()),
        other => other.clone(),
    })
}

fn ceiling(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    Ok(match value {
        Value::Float(x) => Value::Float(x.ceil()),
        other => other.clone(),
    })
}

/// `round(x)` or `round(x, digits)`; halves round away from zero.
fn round(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let (value, digits) = match args {
        [value] => (value, None),
        [value, digits] => (value, Some(digits)),
        _ => {
            return Err(format!(
                "{} should have 1 or 2 arguments, found {}",
                expr,
                args.len()
            ));
        }
    };
    let digits = match digits {
        None => 0,
        Some(d) => match casting::to_i64(d) {
            Ok(d @ 0..=15) => d as i32,
            _ => return Err(format!("{} should round to between 0 and 15 digits", expr)),
        },
    };
    match value {
        Value::Int(i) => Ok(Value::Int(*i)),
        other => {
            let x = other.as_f64().unwrap_or(f64::NAN);
            let scale = 10f64.powi(digits);
            Ok(Value::Float((x * scale).round() / scale))
        }
    }
}

pub fn register_math(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(FunctionEvaluator::new(
        kind::ADD,
        apply_sequence(add, Some(verify_number_or_string)),
        ReturnType::NUMBER | ReturnType::STRING,
        validators::all([
            validators::min_arity(2),
            validators::one_of(&[ReturnType::NUMBER, ReturnType::STRING]),
        ]),
    ))?;

    for (name, op) in [
        (kind::SUBTRACT, subtract as fn(&Value, &Value) -> Result<Value, String>),
        (kind::MULTIPLY, multiply),
        (kind::DIVIDE, divide),
    ] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_sequence(op, Some(verify_number)),
            ReturnType::NUMBER,
            validators::number_sequence(),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::MOD,
        apply_with_error(modulo, Some(verify_number)),
        ReturnType::NUMBER,
        validators::binary_number(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::POWER,
        apply_with_error(power, Some(verify_number)),
        ReturnType::NUMBER,
        validators::binary_number(),
    ))?;

    for (name, op) in [(kind::MIN, min as fn(&[Value]) -> Value), (kind::MAX, max)] {
        registry.register(FunctionEvaluator::new(
            name,
            apply(op, Some(verify_number)),
            ReturnType::NUMBER,
            validators::all([
                validators::min_arity(1),
                validators::of_type(ReturnType::NUMBER),
            ]),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::SUM,
        apply_with_error(sum, Some(verify_array)),
        ReturnType::NUMBER,
        validators::all([validators::unary(), validators::of_type(ReturnType::ARRAY)]),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::AVERAGE,
        apply_with_error(average, Some(verify_array)),
        ReturnType::NUMBER,
        validators::all([validators::unary(), validators::of_type(ReturnType::ARRAY)]),
    ))?;

    registry.register(FunctionEvaluator::new(
        kind::ABS,
        apply_with_error(abs, Some(verify_number)),
        ReturnType::NUMBER,
        validators::unary_number(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::FLOOR,
        apply_with_error(floor, Some(verify_number)),
        ReturnType::NUMBER,
        validators::unary_number(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::CEILING,
        apply_with_error(ceiling, Some(verify_number)),
        ReturnType::NUMBER,
        validators::unary_number(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::ROUND,
        apply_with_error(round, Some(verify_number)),
        ReturnType::NUMBER,
        validators::all([
            validators::arity(1, 2),
            validators::of_type(ReturnType::NUMBER),
        ]),
    ))?;

    Ok(())
}

#[cfg(test)]
#[path = "math_test.rs"]
mod math_test;
