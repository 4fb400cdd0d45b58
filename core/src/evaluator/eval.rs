//! Core evaluation logic.

use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::{
    api::Options,
    evaluator::{EvalError, ResourceExceededError, Verifier},
    expression::Expression,
    memory::Memory,
    registry::Registry,
    stack::ensure_sufficient_stack,
    values::Value,
};

/// Evaluated arguments of one node. Most functions take four or fewer.
pub type Args = SmallVec<[Value; 4]>;

/// Evaluation context for one run over a tree.
///
/// Holds the registry used to resolve function names, the memory that
/// accessors read from, the options, and the current recursion depth.
pub struct Evaluator<'a> {
    registry: &'a Registry,
    memory: &'a dyn Memory,
    options: &'a Options,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub fn new(registry: &'a Registry, memory: &'a dyn Memory, options: &'a Options) -> Self {
        Self {
            registry,
            memory,
            options,
            depth: 0,
        }
    }

    pub fn registry(&self) -> &'a Registry {
        self.registry
    }

    pub fn memory(&self) -> &'a dyn Memory {
        self.memory
    }

    pub fn options(&self) -> &'a Options {
        self.options
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Evaluate an expression node.
    pub fn eval(&mut self, expr: &Expression) -> Result<Value, EvalError> {
        // Check depth before recursing
        if self.depth >= self.options.max_depth {
            return Err(ResourceExceededError::StackOverflow {
                depth: self.depth,
                max_depth: self.options.max_depth,
            }
            .into());
        }

        self.depth += 1;
        let result = ensure_sufficient_stack(|| self.eval_inner(expr));
        self.depth -= 1;

        result
    }

    /// Inner evaluation logic (no depth tracking).
    fn eval_inner(&mut self, expr: &Expression) -> Result<Value, EvalError> {
        let registry = self.registry;
        let function = match registry.lookup(expr.kind()) {
            Ok(function) => function,
            Err(err) => {
                // Binding should have rejected this tree.
                warn!(kind = expr.kind(), "evaluating unbound function");
                return Err(err.into());
            }
        };
        trace!(kind = expr.kind(), depth = self.depth, "evaluate");
        function.evaluate(expr, self)
    }

    /// Evaluate every child left to right, stopping at the first error.
    pub fn eval_children(&mut self, expr: &Expression) -> Result<Args, EvalError> {
        self.eval_children_verified(expr, None)
    }

    /// Like [`Evaluator::eval_children`], additionally checking each value with
    /// `verify` right after it is produced. A failed check stops evaluation of
    /// the remaining children.
    pub fn eval_children_verified(
        &mut self,
        expr: &Expression,
        verify: Option<Verifier>,
    ) -> Result<Args, EvalError> {
        let mut args = Args::with_capacity(expr.children().len());
        for child in expr.children() {
            let value = self.eval(child)?;
            if let Some(verify) = verify {
                verify(&value, child).map_err(EvalError::runtime)?;
            }
            args.push(value);
        }
        Ok(args)
    }

    /// Run `f` with `memory` in place of the current memory.
    ///
    /// Depth accounting carries over, so nested scopes still count against
    /// the limit.
    pub fn with_memory<R>(
        &self,
        memory: &dyn Memory,
        f: impl FnOnce(&mut Evaluator<'_>) -> R,
    ) -> R {
        let mut scoped = Evaluator {
            registry: self.registry,
            memory,
            options: self.options,
            depth: self.depth,
        };
        f(&mut scoped)
    }
}
