//! Logic Package
//!
//! Comparisons: `== != < <= > >=`
//! Connectives: `&& || !`
//! Conditionals: if, exists, coalesce
//!
//! `&&`, `||`, `if` and `coalesce` evaluate their children lazily, left to
//! right, and stop as soon as the result is known. A child that fails still
//! fails the whole node.

use alloc::format;
use alloc::string::String;
use core::cmp::Ordering;

use crate::{
    api::Options,
    casting,
    evaluator::{
        EvalError, Evaluator,
        apply::{apply_with_error, fixed, verify_number_or_string},
    },
    expression::{Expression, kind},
    registry::{FunctionEvaluator, Registry, RegistryError},
    validators,
    values::{ReturnType, Value},
};

// ============================================================================
// Comparisons
// ============================================================================

fn equal(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [a, b] = fixed(expr, args)?;
    Ok(Value::Bool(casting::loose_equals(a, b)))
}

fn not_equal(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [a, b] = fixed(expr, args)?;
    Ok(Value::Bool(!casting::loose_equals(a, b)))
}

/// Builds an ordering comparison accepting the orderings in `accept`.
fn ordering(
    accept: &'static [Ordering],
) -> impl Fn(&Expression, &[Value], &Options) -> Result<Value, String> + Send + Sync + 'static {
    move |expr: &Expression, args: &[Value], _: &Options| {
        let [a, b] = fixed(expr, args)?;
        match casting::compare(a, b) {
            Some(ord) => Ok(Value::Bool(accept.contains(&ord))),
            None => Err(format!(
                "{} can't compare {} with {}",
                expr,
                a.type_name(),
                b.type_name()
            )),
        }
    }
}

// ============================================================================
// Connectives
// ============================================================================

/// `&&` stops at the first falsy child, `||` at the first truthy one.
fn connective(
    stop_on: bool,
) -> impl Fn(&Expression, &mut Evaluator<'_>) -> Result<Value, EvalError> + Send + Sync + 'static {
    move |expr: &Expression, evaluator: &mut Evaluator<'_>| {
        for child in expr.children() {
            let value = evaluator.eval(child)?;
            if casting::is_truthy(&value) == stop_on {
                return Ok(Value::Bool(stop_on));
            }
        }
        Ok(Value::Bool(!stop_on))
    }
}

fn not(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    Ok(Value::Bool(!casting::is_truthy(value)))
}

// ============================================================================
// Conditionals
// ============================================================================

fn if_then_else(expr: &Expression, evaluator: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let [condition, then, otherwise] = expr.children() else {
        return Err(EvalError::runtime(format!(
            "{} should have a condition and two branches",
            expr
        )));
    };
    if casting::is_truthy(&evaluator.eval(condition)?) {
        evaluator.eval(then)
    } else {
        evaluator.eval(otherwise)
    }
}

fn exists(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [value] = fixed(expr, args)?;
    Ok(Value::Bool(!value.is_null()))
}

/// First non-null child, or `null`.
fn coalesce(expr: &Expression, evaluator: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    for child in expr.children() {
        let value = evaluator.eval(child)?;
        if !value.is_null() {
            return Ok(value);
        }
    }
    Ok(Value::Null)
}

pub fn register_logic(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(FunctionEvaluator::new(
        kind::EQUAL,
        apply_with_error(equal, None),
        ReturnType::BOOLEAN,
        validators::binary(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::NOT_EQUAL,
        apply_with_error(not_equal, None),
        ReturnType::BOOLEAN,
        validators::binary(),
    ))?;

    const LESS: &[Ordering] = &[Ordering::Less];
    const LESS_OR_EQUAL: &[Ordering] = &[Ordering::Less, Ordering::Equal];
    const GREATER: &[Ordering] = &[Ordering::Greater];
    const GREATER_OR_EQUAL: &[Ordering] = &[Ordering::Greater, Ordering::Equal];
    for (name, accept) in [
        (kind::LESS_THAN, LESS),
        (kind::LESS_THAN_OR_EQUAL, LESS_OR_EQUAL),
        (kind::GREATER_THAN, GREATER),
        (kind::GREATER_THAN_OR_EQUAL, GREATER_OR_EQUAL),
    ] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_with_error(ordering(accept), Some(verify_number_or_string)),
            ReturnType::BOOLEAN,
            validators::all([
                validators::binary(),
                validators::one_of(&[ReturnType::NUMBER, ReturnType::STRING]),
            ]),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::AND,
        connective(false),
        ReturnType::BOOLEAN,
        validators::min_arity(1),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::OR,
        connective(true),
        ReturnType::BOOLEAN,
        validators::min_arity(1),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::NOT,
        apply_with_error(not, None),
        ReturnType::BOOLEAN,
        validators::unary(),
    ))?;

    registry.register(FunctionEvaluator::new(
        kind::IF,
        if_then_else,
        ReturnType::ANY,
        validators::exact_arity(3),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::EXISTS,
        apply_with_error(exists, None),
        ReturnType::BOOLEAN,
        validators::unary(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::COALESCE,
        coalesce,
        ReturnType::ANY,
        validators::min_arity(1),
    ))?;

    Ok(())
}

#[cfg(test)]
#[path = "logic_test.rs"]
mod logic_test;
