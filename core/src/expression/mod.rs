//! Expression trees.
//!
//! An [`Expression`] names a function (its `kind`) and holds its ordered child
//! arguments. Literals are zero-arity `constant` nodes carrying a [`Value`];
//! variable references are `accessor` nodes whose single child is the
//! constant path to resolve in memory.
//!
//! Nodes built with the constructors in this module are *unchecked*: they are
//! what a parser produces. Use [`crate::registry::Registry::make`] or
//! [`crate::registry::Registry::validate_tree`] to bind them before evaluation.

mod display;
mod json;
pub mod kind;

pub use json::TreeError;

use alloc::vec::Vec;
use ecow::EcoString;

use crate::values::Value;

#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    kind: EcoString,
    children: Vec<Expression>,
    value: Option<Value>,
}

static_assertions::assert_impl_all!(Expression: Send, Sync);

impl Expression {
    /// A call of `kind` over `children`.
    pub fn new(kind: impl Into<EcoString>, children: impl IntoIterator<Item = Expression>) -> Self {
        Self {
            kind: kind.into(),
            children: children.into_iter().collect(),
            value: None,
        }
    }

    /// A literal.
    pub fn constant(value: impl Into<Value>) -> Self {
        Self {
            kind: kind::CONSTANT.into(),
            children: Vec::new(),
            value: Some(value.into()),
        }
    }

    /// A reference to `path` in memory.
    pub fn accessor(path: impl Into<EcoString>) -> Self {
        Self::new(kind::ACCESSOR, [Self::constant(Value::Str(path.into()))])
    }

    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn children(&self) -> &[Expression] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&Expression> {
        self.children.get(index)
    }

    /// The literal carried by a constant node.
    pub fn value(&self) -> Option<&Value> {
        self.value.as_ref()
    }

    pub fn is_constant(&self) -> bool {
        self.value.is_some()
    }

    /// The path of an accessor node.
    pub fn path(&self) -> Option<&str> {
        if self.kind != kind::ACCESSOR {
            return None;
        }
        self.children.first()?.value()?.as_str()
    }

    /// Number of nodes on the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        let mut deepest = 0;
        let mut pending: Vec<(&Expression, usize)> = alloc::vec![(self, 1)];
        while let Some((node, depth)) = pending.pop() {
            deepest = deepest.max(depth);
            pending.extend(node.children.iter().map(|child| (child, depth + 1)));
        }
        deepest
    }
}

/// Children are detached and dropped one level at a time, so tearing down a
/// deep tree never recurses.
impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = core::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            pending.append(&mut node.children);
        }
    }
}
