//! The Glint engine.

use alloc::sync::Arc;

use tracing::debug;

use super::{CompiledExpression, EngineOptions, Error};
use crate::expression::Expression;
use crate::registry::{Registry, RegistryError};

/// The Glint binding and execution engine.
///
/// The engine manages:
/// - The function registry (built-ins plus host functions)
/// - Runtime configuration (EngineOptions)
///
/// The registry is frozen once the engine is built and shared with every
/// compiled expression, so an engine can be used from several threads.
///
/// # Example
///
/// ```
/// use glint_core::api::{Engine, EngineOptions};
/// use glint_core::evaluator::apply::{apply, verify_number};
/// use glint_core::expression::Expression;
/// use glint_core::memory::SimpleMemory;
/// use glint_core::registry::FunctionEvaluator;
/// use glint_core::values::{ReturnType, Value};
/// use glint_core::validators;
///
/// let engine = Engine::new(EngineOptions::default(), |registry| {
///     registry.register(FunctionEvaluator::new(
///         "double",
///         apply(|args| Value::Float(args[0].as_f64().unwrap_or_default() * 2.0), Some(verify_number)),
///         ReturnType::NUMBER,
///         validators::unary_number(),
///     ))
/// })
/// .unwrap();
///
/// let expr = engine
///     .bind(Expression::new("double", [Expression::accessor("x")]))
///     .unwrap();
/// let memory = SimpleMemory::from(serde_json::json!({"x": 21}));
/// assert_eq!(expr.run(&memory).unwrap(), Value::Float(42.0));
/// ```
pub struct Engine {
    registry: Arc<Registry>,
    options: EngineOptions,
}

impl Engine {
    /// Create an engine with every built-in function plus whatever `init`
    /// registers.
    pub fn new(
        options: EngineOptions,
        init: impl FnOnce(&mut Registry) -> Result<(), RegistryError>,
    ) -> Result<Self, Error> {
        let mut registry = Registry::with_builtins()?;
        init(&mut registry)?;
        debug!(functions = registry.len(), "engine ready");
        Ok(Self::from_registry(options, Arc::new(registry)))
    }

    /// Create an engine over an existing registry.
    pub fn from_registry(options: EngineOptions, registry: Arc<Registry>) -> Self {
        Self { registry, options }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Access the engine options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Validate every node of `expr` and prepare it for execution.
    ///
    /// This is the only place validators run; executing the result never
    /// re-validates.
    pub fn bind(&self, expr: Expression) -> Result<CompiledExpression, Error> {
        self.registry.validate_tree(&expr)?;
        debug!(expression = %expr, depth = expr.depth(), "bound expression");
        Ok(CompiledExpression::new(
            expr,
            Arc::clone(&self.registry),
            self.options.default_options.clone(),
        ))
    }

    /// Decode a JSON tree and bind it.
    pub fn bind_json(&self, json: &serde_json::Value) -> Result<CompiledExpression, Error> {
        self.bind(Expression::from_json(json)?)
    }
}
