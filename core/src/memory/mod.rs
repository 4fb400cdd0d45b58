//! Variable state visible to expressions.
//!
//! A [`Memory`] maps a key path such as `user.addresses[0].city` to a
//! [`Value`]. It is the only source of external state during evaluation and
//! the engine never writes through it.
//!
//! Two implementations are provided:
//! - [`SimpleMemory`]: a nested value tree owned by the memory.
//! - [`StackedMemory`]: a local scope layered over a parent memory, used by
//!   iteration functions to bind their iterator variable.

mod path;
mod simple;
mod stacked;


pub use path::{PathSegment, parse_path};
pub use simple::SimpleMemory;
pub use stacked::StackedMemory;

use ecow::EcoString;
use thiserror::Error;

use crate::values::Value;

/// Errors produced while resolving a path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MemoryError {
    #[error("'{path}' was not found in memory")]
    NotFound { path: EcoString },

    #[error("'{path}' is not a valid path: {reason}")]
    InvalidPath { path: EcoString, reason: &'static str },
}

/// Read-only key-path resolver.
///
/// Implementations must be side-effect free from the engine's point of view.
/// The `Send + Sync` bound lets a single memory be shared by evaluations on
/// several threads; any interior synchronization is the implementor's job.
pub trait Memory: Send + Sync {
    /// Resolve `path` to a value, or report that nothing is bound there.
    fn resolve(&self, path: &str) -> Result<Value, MemoryError>;
}

impl<M: Memory + ?Sized> Memory for &M {
    fn resolve(&self, path: &str) -> Result<Value, MemoryError> {
        (**self).resolve(path)
    }
}

impl<M: Memory + ?Sized> Memory for alloc::sync::Arc<M> {
    fn resolve(&self, path: &str) -> Result<Value, MemoryError> {
        (**self).resolve(path)
    }
}

/// Follow `segments` down from `root`.
pub(crate) fn walk(root: &Value, segments: &[PathSegment]) -> Option<Value> {
    let mut current = root;
    for segment in segments {
        current = match (segment, current) {
            (PathSegment::Key(key), Value::Object(map)) => map.get(key)?,
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
            _ => return None,
        };
    }
    Some(current.clone())
}
