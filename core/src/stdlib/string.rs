//! String Package
//!
//! Functions: concat, length, toLower, toUpper, trim, substring, startsWith,
//! endsWith, replace
//!
//! A `null` argument reads as the empty string. Lengths and offsets count
//! Unicode scalar values, not bytes.

use alloc::format;
use alloc::string::{String, ToString};

use ecow::{EcoString, EcoVec};

use crate::{
    api::Options,
    casting,
    evaluator::apply::{apply, apply_with_error, fixed, verify_string_or_null},
    expression::{Expression, kind},
    registry::{FunctionEvaluator, Registry, RegistryError},
    validators,
    values::{ReturnType, Value},
};

fn text(value: &Value) -> &str {
    value.as_str().unwrap_or_default()
}

/// Concatenation of arrays when every argument is an array, of the argument
/// renderings otherwise.
fn concat(args: &[Value]) -> Value {
    if args.iter().all(|arg| matches!(arg, Value::Array(_))) {
        let items: EcoVec<Value> = args
            .iter()
            .filter_map(Value::as_array)
            .flat_map(|items| items.iter().cloned())
            .collect();
        return Value::Array(items);
    }
    let mut out = EcoString::new();
    for arg in args {
        if !arg.is_null() {
            out.push_str(&arg.to_string());
        }
    }
    Value::Str(out)
}

fn length(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    let len = match value {
        Value::Null => 0,
        Value::Str(s) => s.chars().count(),
        Value::Array(items) => items.len(),
        other => {
            return Err(format!(
                "{} should contain a string or an array, found {}",
                expr,
                other.type_name()
            ));
        }
    };
    Ok(Value::Int(len as i64))
}

/// Builds a one-string transformation such as `toLower(s)`.
fn map_text(
    f: fn(&str) -> String,
) -> impl Fn(&Expression, &[Value], &Options) -> Result<Value, String> + Send + Sync + 'static {
    move |expr: &Expression, args: &[Value], _: &Options| {
        let [value] = fixed(expr, args)?;
        Ok(Value::str(f(text(value))))
    }
}

fn trim(s: &str) -> String {
    s.trim().to_string()
}

/// `substring(s, start)` or `substring(s, start, length)`.
fn substring(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let (s, start, len) = match args {
        [s, start] => (s, start, None),
        [s, start, len] => (s, start, Some(len)),
        _ => {
            return Err(format!(
                "{} should have 2 or 3 arguments, found {}",
                expr,
                args.len()
            ));
        }
    };
    let s = match s {
        Value::Null => "",
        Value::Str(s) => s.as_str(),
        other => return Err(format!("{} is not a string, found {}", expr, other.type_name())),
    };
    let index = |value: &Value| -> Result<usize, String> {
        casting::to_i64(value)
            .ok()
            .and_then(|i| usize::try_from(i).ok())
            .ok_or_else(|| format!("{} should use non-negative integer bounds", expr))
    };

    let char_count = s.chars().count();
    let start = index(start)?;
    let len = match len {
        Some(value) => index(value)?,
        None => char_count.saturating_sub(start),
    };
    if start.saturating_add(len) > char_count {
        return Err(format!(
            "{} is out of range for a string of length {}",
            expr, char_count
        ));
    }
    Ok(Value::str(
        s.chars().skip(start).take(len).collect::<String>(),
    ))
}

/// Builds a two-string test such as `startsWith(s, prefix)`.
fn test_text(
    f: fn(&str, &str) -> bool,
) -> impl Fn(&Expression, &[Value], &Options) -> Result<Value, String> + Send + Sync + 'static {
    move |expr: &Expression, args: &[Value], _: &Options| {
        let [s, other] = fixed(expr, args)?;
        Ok(Value::Bool(f(text(s), text(other))))
    }
}

fn starts_with(s: &str, prefix: &str) -> bool {
    s.starts_with(prefix)
}

fn ends_with(s: &str, suffix: &str) -> bool {
    s.ends_with(suffix)
}

fn replace(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [s, pattern, replacement] = fixed(expr, args)?;
    let pattern = text(pattern);
    if pattern.is_empty() {
        return Err(format!("{} can't replace an empty string", expr));
    }
    Ok(Value::str(text(s).replace(pattern, text(replacement))))
}

fn unary_text() -> validators::Validator {
    validators::all([validators::unary(), validators::of_type(ReturnType::STRING)])
}

pub fn register_string(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(FunctionEvaluator::new(
        kind::CONCAT,
        apply(concat, None),
        ReturnType::STRING | ReturnType::ARRAY,
        validators::min_arity(1),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::LENGTH,
        apply_with_error(length, None),
        ReturnType::NUMBER,
        validators::all([
            validators::unary(),
            validators::one_of(&[ReturnType::STRING, ReturnType::ARRAY]),
        ]),
    ))?;

    for (name, op) in [
        (kind::TO_LOWER, str::to_lowercase as fn(&str) -> String),
        (kind::TO_UPPER, str::to_uppercase),
        (kind::TRIM, trim),
    ] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_with_error(map_text(op), Some(verify_string_or_null)),
            ReturnType::STRING,
            unary_text(),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::SUBSTRING,
        apply_with_error(substring, None),
        ReturnType::STRING,
        validators::all([
            validators::arity(2, 3),
            validators::positional(&[ReturnType::STRING, ReturnType::NUMBER]),
        ]),
    ))?;

    for (name, op) in [
        (kind::STARTS_WITH, starts_with as fn(&str, &str) -> bool),
        (kind::ENDS_WITH, ends_with),
    ] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_with_error(test_text(op), Some(verify_string_or_null)),
            ReturnType::BOOLEAN,
            validators::all([validators::binary(), validators::of_type(ReturnType::STRING)]),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::REPLACE,
        apply_with_error(replace, Some(verify_string_or_null)),
        ReturnType::STRING,
        validators::all([
            validators::exact_arity(3),
            validators::of_type(ReturnType::STRING),
        ]),
    ))?;

    Ok(())
}

#[cfg(test)]
#[path = "string_test.rs"]
mod string_test;
