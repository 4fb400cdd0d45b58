use super::{Memory, MemoryError, parse_path, walk};
use crate::values::Value;

/// Memory backed by a single nested value tree.
///
/// # Example
///
/// ```
/// use glint_core::memory::{Memory, SimpleMemory};
/// use glint_core::values::Value;
///
/// let memory = SimpleMemory::new(Value::object([
///     ("user", Value::object([("name", Value::str("ada"))])),
/// ]));
/// assert_eq!(memory.resolve("user.name").unwrap(), Value::str("ada"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct SimpleMemory {
    root: Value,
}

impl SimpleMemory {
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// A memory with nothing bound.
    pub fn empty() -> Self {
        Self::new(Value::Object(Default::default()))
    }

    pub fn root(&self) -> &Value {
        &self.root
    }
}

impl From<serde_json::Value> for SimpleMemory {
    fn from(json: serde_json::Value) -> Self {
        Self::new(Value::from(json))
    }
}

impl Memory for SimpleMemory {
    fn resolve(&self, path: &str) -> Result<Value, MemoryError> {
        let segments = parse_path(path)?;
        walk(&self.root, &segments).ok_or_else(|| MemoryError::NotFound { path: path.into() })
    }
}
