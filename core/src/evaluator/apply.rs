//! Builders for the common shape of function logic.
//!
//! Most built-ins follow the same template: evaluate the children left to
//! right (stopping at the first error), check each value, then compute. The
//! helpers here produce the logic closure for that template so individual
//! functions only supply the computation.

use alloc::format;
use alloc::string::String;

use super::{EvalError, Evaluator};
use crate::api::Options;
use crate::expression::Expression;
use crate::values::Value;

/// Per-argument runtime check. Receives the value and the child that
/// produced it; returns a message naming the child on failure.
pub type Verifier = fn(&Value, &Expression) -> Result<(), String>;

pub fn verify_number(value: &Value, expr: &Expression) -> Result<(), String> {
    if value.is_number() {
        Ok(())
    } else {
        Err(format!("{} is not a number", expr))
    }
}

pub fn verify_integer(value: &Value, expr: &Expression) -> Result<(), String> {
    if crate::casting::is_integer(value) {
        Ok(())
    } else {
        Err(format!("{} is not an integer", expr))
    }
}

pub fn verify_string(value: &Value, expr: &Expression) -> Result<(), String> {
    match value {
        Value::Str(_) => Ok(()),
        _ => Err(format!("{} is not a string", expr)),
    }
}

/// Strings, with `null` read as the empty string by the caller.
pub fn verify_string_or_null(value: &Value, expr: &Expression) -> Result<(), String> {
    match value {
        Value::Str(_) | Value::Null => Ok(()),
        _ => Err(format!("{} is neither a string nor null", expr)),
    }
}

pub fn verify_number_or_string(value: &Value, expr: &Expression) -> Result<(), String> {
    match value {
        Value::Int(_) | Value::Float(_) | Value::Str(_) => Ok(()),
        _ => Err(format!("{} is neither a number nor a string", expr)),
    }
}

pub fn verify_array(value: &Value, expr: &Expression) -> Result<(), String> {
    match value {
        Value::Array(_) => Ok(()),
        _ => Err(format!("{} is not an array", expr)),
    }
}

pub fn verify_not_null(value: &Value, expr: &Expression) -> Result<(), String> {
    if value.is_null() {
        Err(format!("{} is null", expr))
    } else {
        Ok(())
    }
}

/// Message for a node evaluated with the wrong number of arguments.
pub fn arity_error(expr: &Expression, expected: usize, args: &[Value]) -> String {
    format!(
        "{} should have exactly {} {}, found {}",
        expr,
        expected,
        if expected == 1 { "argument" } else { "arguments" },
        args.len()
    )
}

/// The arguments as a fixed-size array.
///
/// Bound trees always have the arity their validator demands; this only
/// fails for trees evaluated without binding.
pub fn fixed<'a, const N: usize>(
    expr: &Expression,
    args: &'a [Value],
) -> Result<&'a [Value; N], String> {
    args.try_into().map_err(|_| arity_error(expr, N, args))
}

/// Strict evaluation with an infallible computation.
pub fn apply<F>(
    f: F,
    verify: Option<Verifier>,
) -> impl Fn(&Expression, &mut Evaluator<'_>) -> Result<Value, EvalError> + Send + Sync + 'static
where
    F: Fn(&[Value]) -> Value + Send + Sync + 'static,
{
    move |expr: &Expression, evaluator: &mut Evaluator<'_>| {
        let args = evaluator.eval_children_verified(expr, verify)?;
        Ok(f(&args))
    }
}

/// Strict evaluation with a computation that may reject its arguments.
pub fn apply_with_error<F>(
    f: F,
    verify: Option<Verifier>,
) -> impl Fn(&Expression, &mut Evaluator<'_>) -> Result<Value, EvalError> + Send + Sync + 'static
where
    F: Fn(&Expression, &[Value], &Options) -> Result<Value, String> + Send + Sync + 'static,
{
    move |expr: &Expression, evaluator: &mut Evaluator<'_>| {
        let args = evaluator.eval_children_verified(expr, verify)?;
        f(expr, &args, evaluator.options()).map_err(EvalError::runtime)
    }
}

/// Strict evaluation folding a binary operation over the arguments,
/// left to right.
pub fn apply_sequence<F>(
    f: F,
    verify: Option<Verifier>,
) -> impl Fn(&Expression, &mut Evaluator<'_>) -> Result<Value, EvalError> + Send + Sync + 'static
where
    F: Fn(&Value, &Value) -> Result<Value, String> + Send + Sync + 'static,
{
    move |expr: &Expression, evaluator: &mut Evaluator<'_>| {
        let args = evaluator.eval_children_verified(expr, verify)?;
        let mut values = args.into_iter();
        let Some(mut acc) = values.next() else {
            return Err(EvalError::runtime(format!("{} has no arguments", expr)));
        };
        for value in values {
            acc = f(&acc, &value).map_err(EvalError::runtime)?;
        }
        Ok(acc)
    }
}
