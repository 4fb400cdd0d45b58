//! Bound Glint expressions.

use alloc::sync::Arc;

use super::{Error, Options};
use crate::evaluator::Evaluator;
use crate::expression::Expression;
use crate::memory::Memory;
use crate::registry::Registry;
use crate::values::Value;

/// A validated expression ready for execution.
///
/// Compiled expressions own their tree and share the engine's registry, so
/// they can be executed any number of times, against different memories,
/// from any thread.
#[derive(Debug, Clone)]
pub struct CompiledExpression {
    expr: Expression,
    registry: Arc<Registry>,
    options: Options,
}

static_assertions::assert_impl_all!(CompiledExpression: Send, Sync);

impl CompiledExpression {
    /// This is called internally by Engine::bind().
    pub(crate) fn new(expr: Expression, registry: Arc<Registry>, options: Options) -> Self {
        Self {
            expr,
            registry,
            options,
        }
    }

    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    /// Evaluate against `memory` with the engine's default options.
    pub fn run(&self, memory: &dyn Memory) -> Result<Value, Error> {
        self.run_with(memory, &self.options)
    }

    /// Evaluate against `memory` with explicit options.
    pub fn run_with(&self, memory: &dyn Memory, options: &Options) -> Result<Value, Error> {
        Evaluator::new(&self.registry, memory, options)
            .eval(&self.expr)
            .map_err(Error::from)
    }
}
