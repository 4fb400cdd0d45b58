//! Runtime evaluation errors.
//!
//! # Error Categories
//!
//! - **Runtime errors**: a function received a value it cannot work with
//!   (e.g. a fractional tick count). The message names the offending
//!   sub-expression.
//! - **Lookup errors**: the tree names a function the registry does not know.
//!   Binding catches this before evaluation, so seeing one at run time means
//!   an unbound tree was evaluated.
//! - **Resource exceeded errors**: the tree is deeper than the configured
//!   limit.
//!
//! The first error produced anywhere in the tree is returned unchanged by
//! every ancestor.

use alloc::string::String;
use thiserror::Error;

use crate::registry::LookupError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    ResourceExceeded(#[from] ResourceExceededError),
}

impl EvalError {
    /// A runtime error carrying `message` verbatim.
    pub fn runtime(message: impl Into<String>) -> Self {
        EvalError::Runtime(RuntimeError {
            message: message.into(),
        })
    }
}

/// A function rejected the values it was given.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuntimeError {
    pub message: String,
}

/// Resource limits that stop evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResourceExceededError {
    /// Evaluation recursion depth exceeded.
    #[error("evaluation stack overflow: depth {depth} exceeds maximum of {max_depth}")]
    StackOverflow { depth: usize, max_depth: usize },
}
