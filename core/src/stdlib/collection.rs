//! Collection Package
//!
//! Functions: createArray, count, contains, first, last, join, getProperty,
//! foreach, where
//!
//! `foreach` and `where` take the collection, an accessor naming the iterator
//! variable, and a body. The body is evaluated once per item against a
//! [`StackedMemory`] that binds the iterator over the caller's memory. Objects
//! iterate as `{key, value}` pairs in key order.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;

use ecow::EcoVec;

use crate::{
    api::Options,
    casting,
    evaluator::{
        EvalError, Evaluator,
        apply::{apply, apply_with_error, fixed},
    },
    expression::{Expression, kind},
    memory::{PathSegment, StackedMemory, parse_path},
    registry::{FunctionEvaluator, Registry, RegistryError},
    validators::{self, ValidationError, Validator},
    values::{ReturnType, Value},
};

fn create_array(args: &[Value]) -> Value {
    Value::array(args.iter().cloned())
}

fn count(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [collection] = fixed(expr, args)?;
    let len = match collection {
        Value::Null => 0,
        Value::Array(items) => items.len(),
        Value::Object(map) => map.len(),
        other => return Err(format!("{} can't count {}", expr, other.type_name())),
    };
    Ok(Value::Int(len as i64))
}

/// Array membership, substring, or object key.
fn contains(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [collection, needle] = fixed(expr, args)?;
    let found = match (collection, needle) {
        (Value::Null, _) => false,
        (Value::Array(items), needle) => items.iter().any(|item| casting::loose_equals(item, needle)),
        (Value::Str(haystack), Value::Str(needle)) => haystack.contains(needle.as_str()),
        (Value::Object(map), Value::Str(key)) => map.contains_key(key),
        (collection, needle) => {
            return Err(format!(
                "{} can't look for {} in {}",
                expr,
                needle.type_name(),
                collection.type_name()
            ));
        }
    };
    Ok(Value::Bool(found))
}

fn first(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [collection] = fixed(expr, args)?;
    Ok(match collection {
        Value::Array(items) => items.first().cloned().unwrap_or_default(),
        Value::Str(s) => s.chars().next().map(|c| Value::str(c.to_string())).unwrap_or_default(),
        _ => Value::Null,
    })
}

fn last(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [collection] = fixed(expr, args)?;
    Ok(match collection {
        Value::Array(items) => items.last().cloned().unwrap_or_default(),
        Value::Str(s) => s.chars().last().map(|c| Value::str(c.to_string())).unwrap_or_default(),
        _ => Value::Null,
    })
}

fn join(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [collection, separator] = fixed(expr, args)?;
    let items = match collection {
        Value::Null => return Ok(Value::str("")),
        Value::Array(items) => items,
        other => return Err(format!("{} can't join {}", expr, other.type_name())),
    };
    let separator = separator.as_str().unwrap_or_default();
    let parts: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .collect();
    Ok(Value::str(parts.join(separator)))
}

fn get_property(expr: &Expression, args: &[Value], _: &Options) -> Result<Value, String> {
    let [object, name] = fixed(expr, args)?;
    match (object, name) {
        (Value::Null, _) => Ok(Value::Null),
        (Value::Object(map), Value::Str(name)) => Ok(map.get(name).cloned().unwrap_or_default()),
        (Value::Object(_), other) => Err(format!(
            "{} should name the property with a string, found {}",
            expr,
            other.type_name()
        )),
        (other, _) => Err(format!("{} has no properties on {}", expr, other.type_name())),
    }
}

// ============================================================================
// Iteration
// ============================================================================

/// The iterator variable name of an iteration node, if well formed.
fn iterator_name(iterator: &Expression) -> Option<&str> {
    let path = iterator.path()?;
    match parse_path(path).ok()?.as_slice() {
        [PathSegment::Key(_)] => Some(path),
        _ => None,
    }
}

fn iteration() -> Validator {
    let iterator: Validator = Arc::new(|expr: &Expression, _: &Registry| {
        match expr.child(1).and_then(iterator_name) {
            Some(_) => Ok(()),
            None => Err(ValidationError::new(
                expr,
                format!(
                    "the second argument of {} should be a plain variable name",
                    expr.kind()
                ),
            )),
        }
    });
    validators::all([validators::exact_arity(3), iterator])
}

fn iteration_items(expr: &Expression, collection: Value) -> Result<Vec<Value>, EvalError> {
    match collection {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => Ok(items.iter().cloned().collect()),
        Value::Object(map) => Ok(map
            .iter()
            .map(|(key, value)| {
                Value::object([("key", Value::Str(key.clone())), ("value", value.clone())])
            })
            .collect()),
        other => Err(EvalError::runtime(format!(
            "{} can't iterate over {}",
            expr,
            other.type_name()
        ))),
    }
}

/// Evaluate the body of an iteration node once per item, handing each item
/// and its body result to `visit`.
fn each(
    expr: &Expression,
    evaluator: &mut Evaluator<'_>,
    mut visit: impl FnMut(Value, Value),
) -> Result<(), EvalError> {
    let [collection, iterator, body] = expr.children() else {
        return Err(EvalError::runtime(format!("{} should have three arguments", expr)));
    };
    let Some(name) = iterator_name(iterator) else {
        return Err(EvalError::runtime(format!("{} has no iterator variable", expr)));
    };

    let items = iteration_items(expr, evaluator.eval(collection)?)?;
    let parent = evaluator.memory();
    for item in items {
        let scope = StackedMemory::new(parent).with(name, item.clone());
        let result = evaluator.with_memory(&scope, |scoped| scoped.eval(body))?;
        visit(item, result);
    }
    Ok(())
}

fn foreach(expr: &Expression, evaluator: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let mut out = EcoVec::new();
    each(expr, evaluator, |_, result| out.push(result))?;
    Ok(Value::Array(out))
}

fn filter(expr: &Expression, evaluator: &mut Evaluator<'_>) -> Result<Value, EvalError> {
    let mut out = EcoVec::new();
    each(expr, evaluator, |item, keep| {
        if casting::is_truthy(&keep) {
            out.push(item);
        }
    })?;
    Ok(Value::Array(out))
}

pub fn register_collection(registry: &mut Registry) -> Result<(), RegistryError> {
    registry.register(FunctionEvaluator::new(
        kind::CREATE_ARRAY,
        apply(create_array, None),
        ReturnType::ARRAY,
        validators::none(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::COUNT,
        apply_with_error(count, None),
        ReturnType::NUMBER,
        validators::all([
            validators::unary(),
            validators::one_of(&[ReturnType::ARRAY, ReturnType::OBJECT]),
        ]),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::CONTAINS,
        apply_with_error(contains, None),
        ReturnType::BOOLEAN,
        validators::all([
            validators::binary(),
            validators::positional(&[
                ReturnType::ARRAY | ReturnType::STRING | ReturnType::OBJECT,
                ReturnType::ANY,
            ]),
        ]),
    ))?;

    for (name, op) in [
        (
            kind::FIRST,
            first as fn(&Expression, &[Value], &Options) -> Result<Value, String>,
        ),
        (kind::LAST, last),
    ] {
        registry.register(FunctionEvaluator::new(
            name,
            apply_with_error(op, None),
            ReturnType::ANY,
            validators::all([
                validators::unary(),
                validators::one_of(&[ReturnType::ARRAY, ReturnType::STRING]),
            ]),
        ))?;
    }

    registry.register(FunctionEvaluator::new(
        kind::JOIN,
        apply_with_error(join, None),
        ReturnType::STRING,
        validators::all([
            validators::binary(),
            validators::positional(&[ReturnType::ARRAY, ReturnType::STRING]),
        ]),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::GET_PROPERTY,
        apply_with_error(get_property, None),
        ReturnType::ANY,
        validators::all([
            validators::binary(),
            validators::positional(&[ReturnType::OBJECT, ReturnType::STRING]),
        ]),
    ))?;

    registry.register(FunctionEvaluator::new(
        kind::FOREACH,
        foreach,
        ReturnType::ARRAY,
        iteration(),
    ))?;
    registry.register(FunctionEvaluator::new(
        kind::WHERE,
        filter,
        ReturnType::ARRAY,
        iteration(),
    ))?;

    Ok(())
}

#[cfg(test)]
#[path = "collection_test.rs"]
mod collection_test;
