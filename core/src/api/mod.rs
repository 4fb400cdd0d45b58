//! Public API for the Glint expression engine.
//!
//! The host builds (or decodes) an expression tree, binds it with an
//! [`Engine`], and runs the resulting [`CompiledExpression`] against a memory:
//!
//! ```
//! use glint_core::api::{Engine, EngineOptions};
//! use glint_core::memory::SimpleMemory;
//! use glint_core::values::Value;
//! use serde_json::json;
//!
//! let engine = Engine::new(EngineOptions::default(), |_| Ok(())).unwrap();
//! let expr = engine
//!     .bind_json(&json!({"call": "ticksToDays", "args": [{"path": "elapsed"}]}))
//!     .unwrap();
//!
//! let memory = SimpleMemory::from(json!({"elapsed": 1_728_000_000_000_i64}));
//! assert_eq!(expr.run(&memory).unwrap(), Value::Float(2.0));
//! ```

pub mod engine;
pub mod error;
pub mod expression;
pub mod options;

pub use engine::Engine;
pub use error::Error;
pub use expression::CompiledExpression;
pub use options::{EngineOptions, NullSubstitution, Options};
