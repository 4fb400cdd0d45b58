//! Memory Access Package
//!
//! The leaves of every tree: literals (`constant`), memory references
//! (`accessor`) and the indexing function `element`.

use alloc::format;

use tracing::trace;

use crate::{
    api::Options,
    evaluator::{EvalError, Evaluator, apply::fixed},
    expression::{Expression, kind},
    memory::MemoryError,
    registry::{FunctionEvaluator, Registry, RegistryError},
    validators,
    values::{ReturnType, Value},
};

fn constant(expr: &Expression, _: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    expr.value()
        .cloned()
        .ok_or_else(|| EvalError::runtime(format!("{} has no value", expr)))
}

/// Value bound to a missing or null path.
fn substitute(path: &str, options: &Options) -> Value {
    options
        .null_substitution
        .as_ref()
        .and_then(|substitution| substitution(path))
        .unwrap_or(Value::Null)
}

fn accessor(expr: &Expression, evaluator: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let Some(path) = expr.path() else {
        return Err(EvalError::runtime(format!("{} has no path", expr)));
    };
    match evaluator.memory().resolve(path) {
        Ok(Value::Null) | Err(MemoryError::NotFound { .. }) => {
            trace!(path, "null path");
            Ok(substitute(path, evaluator.options()))
        }
        Ok(value) => Ok(value),
        Err(err @ MemoryError::InvalidPath { .. }) => Err(EvalError::runtime(err.to_string())),
    }
}

/// `element(collection, key)`: array index or object key, `null` when absent.
fn element(expr: &Expression, evaluator: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let args = evaluator.eval_children(expr)?;
    let [collection, key] = fixed(expr, &args).map_err(EvalError::runtime)?;
    match (collection, key) {
        (Value::Array(items), index) if crate::casting::is_integer(index) => {
            let index = crate::casting::to_i64(index)
                .map_err(|e| EvalError::runtime(format!("{}: {}", expr, e)))?;
            Ok(usize::try_from(index)
                .ok()
                .and_then(|i| items.get(i).cloned())
                .unwrap_or(Value::Null))
        }
        (Value::Object(map), Value::Str(key)) => Ok(map.get(key).cloned().unwrap_or(Value::Null)),
        (Value::Null, _) => Ok(Value::Null),
        (collection, key) => Err(EvalError::runtime(format!(
            "{} can't index {} with {}",
            expr,
            collection.type_name(),
            key.type_name()
        ))),
    }
}

pub fn register_memory_access(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(FunctionEvaluator::new(
        kind::CONSTANT,
        constant,
        ReturnType::ANY,
        validators::constant(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::ACCESSOR,
        accessor,
        ReturnType::ANY,
        validators::accessor(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::ELEMENT,
        element,
        ReturnType::ANY,
        validators::all([
            validators::binary(),
            validators::positional(&[
                ReturnType::ARRAY | ReturnType::OBJECT,
                ReturnType::NUMBER | ReturnType::STRING,
            ]),
        ]),
    ))?;
    Ok(())
}

#[cfg(test)]
#[path = "memory_access_test.rs"]
mod memory_access_test;
