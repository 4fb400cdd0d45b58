//! Structural validators.
//!
//! A [`Validator`] checks a node's children count and static types when the
//! node is bound, before any memory is read. Validators are built from a few
//! primitives ([`exact_arity`], [`arity`], [`of_type`], [`one_of`],
//! [`positional`]) combined with [`all`]. Functions with unusual rules supply
//! their own closure.

use alloc::format;
use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use thiserror::Error;

use crate::expression::{Expression, kind};
use crate::memory::parse_path;
use crate::registry::Registry;
use crate::values::{ReturnType, Value};

/// A node failed its structural check.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Rendering of the rejected node.
    pub expression: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(expr: &Expression, message: impl Into<String>) -> Self {
        Self {
            expression: expr.to_string(),
            message: message.into(),
        }
    }
}

pub type Validator =
    Arc<dyn Fn(&Expression, &Registry) -> Result<(), ValidationError> + Send + Sync>;

fn plural(n: usize) -> &'static str {
    if n == 1 { "child" } else { "children" }
}

// ============================================================================
// Primitives
// ============================================================================

/// Accept any node.
pub fn none() -> Validator {
    Arc::new(|_: &Expression, _: &Registry| Ok(()))
}

/// Between `min` and `max` children, inclusive.
pub fn arity(min: usize, max: usize) -> Validator {
    Arc::new(move |expr: &Expression, _: &Registry| {
        let count = expr.children().len();
        if min == max && count != min {
            return Err(ValidationError::new(
                expr,
                format!("{} should have exactly {} {}, found {}", expr, min, plural(min), count),
            ));
        }
        if count < min {
            return Err(ValidationError::new(
                expr,
                format!("{} should have at least {} {}, found {}", expr, min, plural(min), count),
            ));
        }
        if count > max {
            return Err(ValidationError::new(
                expr,
                format!("{} can't have more than {} {}, found {}", expr, max, plural(max), count),
            ));
        }
        Ok(())
    })
}

pub fn exact_arity(n: usize) -> Validator {
    arity(n, n)
}

pub fn min_arity(n: usize) -> Validator {
    arity(n, usize::MAX)
}

fn check_child(
    expr: &Expression,
    child: &Expression,
    expected: ReturnType,
    registry: &Registry,
) -> Result<(), ValidationError> {
    // Unknown children are reported when the child itself is bound.
    let actual = registry.return_type_of(child).unwrap_or(ReturnType::ANY);
    if actual.satisfies(expected) {
        Ok(())
    } else {
        Err(ValidationError::new(
            expr,
            format!("{} in {} should be {}, found {}", child, expr, expected, actual),
        ))
    }
}

/// Every child must produce `expected`.
pub fn of_type(expected: ReturnType) -> Validator {
    Arc::new(move |expr: &Expression, registry: &Registry| {
        expr.children()
            .iter()
            .try_for_each(|child| check_child(expr, child, expected, registry))
    })
}

/// Every child must produce one of `types`.
pub fn one_of(types: &[ReturnType]) -> Validator {
    let union = types
        .iter()
        .fold(ReturnType::empty(), |acc, ty| acc | *ty);
    of_type(union)
}

/// Child `i` must produce `types[i]`; children past the end use the last entry.
pub fn positional(types: &[ReturnType]) -> Validator {
    let types: Vec<ReturnType> = types.to_vec();
    Arc::new(move |expr: &Expression, registry: &Registry| {
        let Some(last) = types.last().copied() else {
            return Ok(());
        };
        expr.children().iter().enumerate().try_for_each(|(i, child)| {
            let expected = types.get(i).copied().unwrap_or(last);
            check_child(expr, child, expected, registry)
        })
    })
}

/// Run each validator in order; the first failure wins.
pub fn all(validators: impl IntoIterator<Item = Validator>) -> Validator {
    let validators: Vec<Validator> = validators.into_iter().collect();
    Arc::new(move |expr: &Expression, registry: &Registry| {
        validators.iter().try_for_each(|v| v(expr, registry))
    })
}

// ============================================================================
// Named validators
// ============================================================================

/// Exactly one numeric child.
pub fn unary_number() -> Validator {
    all([exact_arity(1), of_type(ReturnType::NUMBER)])
}

/// Exactly two numeric children.
pub fn binary_number() -> Validator {
    all([exact_arity(2), of_type(ReturnType::NUMBER)])
}

/// Two or more numeric children.
pub fn number_sequence() -> Validator {
    all([min_arity(2), of_type(ReturnType::NUMBER)])
}

/// Exactly one string child.
pub fn unary_string() -> Validator {
    all([exact_arity(1), of_type(ReturnType::STRING)])
}

pub fn unary() -> Validator {
    exact_arity(1)
}

pub fn binary() -> Validator {
    exact_arity(2)
}

/// A literal: no children and a value.
pub fn constant() -> Validator {
    Arc::new(|expr: &Expression, _: &Registry| {
        if !expr.children().is_empty() {
            return Err(ValidationError::new(expr, "a constant can't have children"));
        }
        if expr.value().is_none() {
            return Err(ValidationError::new(expr, "constant node is missing its value"));
        }
        Ok(())
    })
}

/// A single constant child holding a well-formed path.
pub fn accessor() -> Validator {
    Arc::new(|expr: &Expression, _: &Registry| {
        let path = match expr.children() {
            [child] if child.kind() == kind::CONSTANT => child.value(),
            _ => None,
        };
        match path {
            Some(Value::Str(path)) => parse_path(path)
                .map(|_| ())
                .map_err(|e| ValidationError::new(expr, e.to_string())),
            _ => Err(ValidationError::new(
                expr,
                "an accessor needs exactly one constant string path",
            )),
        }
    })
}
