//! Function evaluators and the registry that binds them to names.
//!
//! A [`FunctionEvaluator`] is a plain record: the evaluation logic, the
//! declared [`ReturnType`], and a [`Validator`] that checks a node's shape
//! once, before it is ever evaluated. The [`Registry`] maps names to these
//! records; it is filled once and only read afterwards, so a single registry
//! can serve evaluations on any number of threads.

use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use ecow::EcoString;
use hashbrown::HashMap;
use thiserror::Error;
use tracing::debug;

use crate::evaluator::{EvalError, Evaluator};
use crate::expression::Expression;
use crate::stack::ensure_sufficient_stack;
use crate::validators::{ValidationError, Validator};
use crate::values::{ReturnType, Value};

/// Evaluation logic bound to a function name.
///
/// Receives the node being evaluated and the evaluation context, which gives
/// access to memory, options, and child evaluation.
pub type EvaluatorFn =
    Arc<dyn Fn(&Expression, &mut Evaluator<'_>) -> Result<Value, EvalError> + Send + Sync>;

/// A name that is not bound in the registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{name}' is not a registered function")]
pub struct LookupError {
    pub name: EcoString,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("function '{name}' is already registered")]
    Duplicate { name: EcoString },
}

/// Failure to bind a tree against a registry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum BindError {
    #[error(transparent)]
    Lookup(#[from] LookupError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// The unit of extensibility: logic + return type + validator.
#[derive(Clone)]
pub struct FunctionEvaluator {
    name: EcoString,
    logic: EvaluatorFn,
    return_type: ReturnType,
    validator: Validator,
}

impl FunctionEvaluator {
    pub fn new<F>(
        name: impl Into<EcoString>,
        logic: F,
        return_type: ReturnType,
        validator: Validator,
    ) -> Self
    where
        F: Fn(&Expression, &mut Evaluator<'_>) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            logic: Arc::new(logic),
            return_type,
            validator,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn return_type(&self) -> ReturnType {
        self.return_type
    }

    /// Check the structure of `expr` against this function's validator.
    pub fn validate(&self, expr: &Expression, registry: &Registry) -> Result<(), ValidationError> {
        (self.validator)(expr, registry)
    }

    /// Run the evaluation logic for `expr`.
    pub fn evaluate(
        &self,
        expr: &Expression,
        evaluator: &mut Evaluator<'_>,
    ) -> Result<Value, EvalError> {
        (self.logic)(expr, evaluator)
    }
}

impl fmt::Debug for FunctionEvaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionEvaluator")
            .field("name", &self.name)
            .field("return_type", &self.return_type)
            .finish()
    }
}

/// Name → [`FunctionEvaluator`] mapping.
///
/// # Example
///
/// ```
/// use glint_core::expression::{Expression, kind};
/// use glint_core::registry::Registry;
///
/// let registry = Registry::with_builtins().unwrap();
/// let expr = registry
///     .make(kind::TICKS_TO_DAYS, [Expression::constant(864_000_000_000_i64)])
///     .unwrap();
/// assert_eq!(expr.kind(), "ticksToDays");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Registry {
    functions: HashMap<EcoString, Arc<FunctionEvaluator>>,
}

static_assertions::assert_impl_all!(Registry: Send, Sync);

impl Registry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in function.
    pub fn with_builtins() -> Result<Self, RegistryError> {
        let mut registry = Self::new();
        crate::stdlib::register_builtins(&mut registry)?;
        Ok(registry)
    }

    /// Bind `function` under its name. Names are never rebound.
    pub fn register(&mut self, function: FunctionEvaluator) -> Result<(), RegistryError> {
        if self.functions.contains_key(&function.name) {
            return Err(RegistryError::Duplicate {
                name: function.name.clone(),
            });
        }
        debug!(name = %function.name, return_type = %function.return_type, "registered function");
        self.functions
            .insert(function.name.clone(), Arc::new(function));
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> Result<&Arc<FunctionEvaluator>, LookupError> {
        self.functions.get(name).ok_or_else(|| LookupError {
            name: name.into(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// Registered names in lexical order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(EcoString::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Static type of `expr`: a constant's own type, otherwise the declared
    /// return type of the function it calls.
    pub fn return_type_of(&self, expr: &Expression) -> Result<ReturnType, LookupError> {
        match expr.value() {
            Some(value) => Ok(value.return_type()),
            None => Ok(self.lookup(expr.kind())?.return_type()),
        }
    }

    /// Build a node and validate it. Children are assumed already bound.
    pub fn make(
        &self,
        kind: impl Into<EcoString>,
        children: impl IntoIterator<Item = Expression>,
    ) -> Result<Expression, BindError> {
        let expr = Expression::new(kind, children);
        self.validate(&expr)?;
        Ok(expr)
    }

    /// Validate a single node (not its children).
    pub fn validate(&self, expr: &Expression) -> Result<(), BindError> {
        let function = self.lookup(expr.kind())?;
        function.validate(expr, self)?;
        Ok(())
    }

    /// Validate an externally built tree, children before parents.
    pub fn validate_tree(&self, expr: &Expression) -> Result<(), BindError> {
        ensure_sufficient_stack(|| {
            for child in expr.children() {
                self.validate_tree(child)?;
            }
            self.validate(expr)
        })
    }

    /// Short description of every function, for listings.
    pub fn describe(&self) -> Vec<(String, ReturnType)> {
        self.names()
            .into_iter()
            .filter_map(|name| {
                let function = self.functions.get(name)?;
                Some((String::from(name), function.return_type()))
            })
            .collect()
    }
}
