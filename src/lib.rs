//! Glint - An embeddable expression evaluation engine
//!
//! # Overview
//!
//! Glint evaluates trees of named function calls against host-supplied
//! state. A parser (or the JSON tree decoder) produces an [`Expression`];
//! the [`Engine`] validates it once against its function registry; the
//! resulting [`CompiledExpression`] can then be run any number of times
//! against different [`Memory`] instances. Common use cases include:
//!
//! - Bot and workflow conditions
//! - Template and message computations
//! - Data transformations over JSON documents
//!
//! # Quick Start
//!
//! ```
//! use glint::{Engine, EngineOptions, Expression, SimpleMemory, Value};
//! use glint::expression::kind;
//!
//! let engine = Engine::new(EngineOptions::default(), |_| Ok(())).unwrap();
//!
//! let expr = engine
//!     .bind(Expression::new(kind::TICKS_TO_DAYS, [Expression::accessor("elapsed")]))
//!     .unwrap();
//!
//! let memory = SimpleMemory::from(serde_json::json!({"elapsed": 864_000_000_000_i64}));
//! assert_eq!(expr.run(&memory).unwrap(), Value::Float(1.0));
//! ```
//!
//! # Host Functions
//!
//! Register additional functions while building the engine. Each one is a
//! [`FunctionEvaluator`]: the logic, the declared [`ReturnType`], and a
//! validator checking the node's shape at bind time.
//!
//! ```
//! use glint::{Engine, EngineOptions, FunctionEvaluator, ReturnType, SimpleMemory, Value};
//! use glint::evaluator::apply::{apply, verify_string};
//! use glint::validators;
//!
//! let engine = Engine::new(EngineOptions::default(), |registry| {
//!     registry.register(FunctionEvaluator::new(
//!         "shout",
//!         apply(
//!             |args| Value::str(format!("{}!", args[0])),
//!             Some(verify_string),
//!         ),
//!         ReturnType::STRING,
//!         validators::unary_string(),
//!     ))
//! })
//! .unwrap();
//!
//! let expr = engine
//!     .bind_json(&serde_json::json!({"call": "shout", "args": ["hey"]}))
//!     .unwrap();
//! assert_eq!(expr.run(&SimpleMemory::empty()).unwrap(), Value::str("hey!"));
//! ```

// Re-export public API from glint_core
pub use glint_core::api::{
    CompiledExpression, Engine, EngineOptions, Error, NullSubstitution, Options,
};

// Re-export the building blocks hosts extend the engine with
pub use glint_core::expression::{self, Expression, TreeError};
pub use glint_core::memory::{self, Memory, MemoryError, SimpleMemory, StackedMemory};
pub use glint_core::registry::{FunctionEvaluator, Registry, RegistryError};
pub use glint_core::values::{ReturnType, Value};
pub use glint_core::{casting, evaluator, stdlib, validators};

// Re-export errors
pub use glint_core::evaluator::EvalError;
