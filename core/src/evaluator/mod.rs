//! Tree-walking evaluator for Glint expressions.
//!
//! Evaluation is children-first: a node's function resolves its arguments by
//! evaluating its children left to right, then computes its own value.
//!
//! ## Design Principles
//!
//! - **Errors are values**: every failure is an `Err` returned up the tree; the
//!   first child error short-circuits its remaining siblings and every ancestor
//! - **Stack-safe**: depth tracking prevents stack overflow from deeply nested expressions
//! - **Read-only memory**: evaluation never writes state, so repeating it with
//!   the same inputs gives the same result
//!
//! ## Example
//!
//! ```
//! use glint_core::{api::Options, evaluator, expression::{Expression, kind}};
//! use glint_core::{memory::SimpleMemory, registry::Registry, values::Value};
//!
//! let registry = Registry::with_builtins().unwrap();
//! let expr = registry
//!     .make(kind::TICKS_TO_DAYS, [Expression::constant(864_000_000_000_i64)])
//!     .unwrap();
//!
//! let result = evaluator::eval(&registry, &expr, &SimpleMemory::empty(), &Options::default());
//! assert_eq!(result, Ok(Value::Float(1.0)));
//! ```

pub mod apply;
mod error;
mod eval;


pub use apply::Verifier;
pub use error::{EvalError, ResourceExceededError, RuntimeError};
pub use eval::{Args, Evaluator};

use crate::{api::Options, expression::Expression, memory::Memory, registry::Registry, values::Value};

/// Evaluate `expr` against `memory`.
///
/// The tree is expected to be bound (see [`Registry::validate_tree`]). An
/// unbound tree still fails cleanly: an unknown function name surfaces as
/// [`EvalError::Lookup`] and a node with the wrong number of children as
/// [`EvalError::Runtime`].
pub fn eval(
    registry: &Registry,
    expr: &Expression,
    memory: &dyn Memory,
    options: &Options,
) -> Result<Value, EvalError> {
    Evaluator::new(registry, memory, options).eval(expr)
}
