//! Public error types for the Glint API.
//!
//! Internal errors (bind, evaluation, registry) are converted to this single
//! enum at API boundaries. Each variant keeps the internal error so callers
//! can still match on details.

use thiserror::Error;

use crate::evaluator::{EvalError, ResourceExceededError, RuntimeError};
use crate::expression::TreeError;
use crate::registry::{BindError, LookupError, RegistryError};
use crate::validators::ValidationError;

/// Public error type for all Glint operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A node failed its structural check when the tree was bound.
    #[error("Validation error: {0}")]
    Validation(ValidationError),

    /// A function rejected its runtime arguments.
    #[error("Evaluation error: {0}")]
    Evaluation(RuntimeError),

    /// The tree names an unregistered function.
    #[error("Lookup error: {0}")]
    Lookup(LookupError),

    /// Resource limits exceeded (e.g. evaluation depth).
    #[error("Resource limit exceeded: {0}")]
    ResourceExceeded(ResourceExceededError),

    /// The function set could not be assembled.
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// A JSON tree could not be decoded.
    #[error("Invalid expression tree: {0}")]
    Tree(#[from] TreeError),
}

impl From<EvalError> for Error {
    fn from(err: EvalError) -> Self {
        match err {
            EvalError::Runtime(e) => Error::Evaluation(e),
            EvalError::Lookup(e) => Error::Lookup(e),
            EvalError::ResourceExceeded(e) => Error::ResourceExceeded(e),
        }
    }
}

impl From<BindError> for Error {
    fn from(err: BindError) -> Self {
        match err {
            BindError::Lookup(e) => Error::Lookup(e),
            BindError::Validation(e) => Error::Validation(e),
        }
    }
}
