use ecow::EcoString;

use super::{Memory, MemoryError, PathSegment, parse_path, walk};
use crate::values::{Object, Value};

/// A local scope layered over a parent memory.
///
/// Lookups consult the local bindings first, keyed by the path's first
/// segment; anything not bound locally falls through to the parent. The
/// parent is only borrowed, so layering is free of copies.
pub struct StackedMemory<'a> {
    locals: Object,
    parent: &'a dyn Memory,
}

impl<'a> StackedMemory<'a> {
    pub fn new(parent: &'a dyn Memory) -> Self {
        Self {
            locals: Object::new(),
            parent,
        }
    }

    /// Bind `name` in the local scope, shadowing the parent.
    pub fn with(mut self, name: impl Into<EcoString>, value: Value) -> Self {
        self.locals.insert(name.into(), value);
        self
    }

    pub fn bind(&mut self, name: impl Into<EcoString>, value: Value) {
        self.locals.insert(name.into(), value);
    }
}

impl Memory for StackedMemory<'_> {
    fn resolve(&self, path: &str) -> Result<Value, MemoryError> {
        let segments = parse_path(path)?;
        if let Some(PathSegment::Key(first)) = segments.first() {
            if let Some(local) = self.locals.get(first) {
                return walk(local, &segments[1..])
                    .ok_or_else(|| MemoryError::NotFound { path: path.into() });
            }
        }
        self.parent.resolve(path)
    }
}
