//! Glint core: a small expression evaluation engine.
//!
//! Expressions are trees of named function calls. Each name is bound in a
//! [`registry::Registry`] to a [`registry::FunctionEvaluator`] that knows how to
//! validate the node's shape and compute its value against a
//! [`memory::Memory`]. Evaluation is children-first and errors are plain
//! `Result` values that short-circuit up the tree.

extern crate alloc;

pub mod api;
pub mod casting;
pub mod evaluator;
pub mod expression;
pub mod memory;
pub mod registry;
mod stack;
pub mod stdlib;
pub mod validators;
pub mod values;

pub use api::{CompiledExpression, Engine, EngineOptions, Error, Options};
pub use expression::Expression;
pub use memory::{Memory, SimpleMemory, StackedMemory};
pub use registry::{FunctionEvaluator, Registry};
pub use values::{ReturnType, Value};

/// Test utilities for enabling logging in tests
#[cfg(test)]
pub mod test_utils {
    /// Initialize tracing subscriber for tests with DEBUG level
    /// Call this at the start of tests where you want to see logging output
    ///
    /// # Example
    /// ```ignore
    /// #[test]
    /// fn test_ticks_to_days() {
    ///     test_utils::init_test_logging();
    ///     // ... your test code
    /// }
    /// ```
    pub fn init_test_logging() {
        use tracing_subscriber::{EnvFilter, fmt};

        // Try to initialize, ignore error if already initialized
        let _ = fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
            )
            .with_test_writer()
            .try_init();
    }
}
