//! Configuration options for the Glint engine.

use alloc::sync::Arc;
use core::fmt;

use ecow::EcoString;

use crate::values::Value;

/// Replacement hook for accessor paths that resolve to nothing.
///
/// Called with the path; returning `Some` substitutes the value, `None`
/// keeps the `null`.
pub type NullSubstitution = Arc<dyn Fn(&str) -> Option<Value> + Send + Sync>;

/// Configuration options for expression evaluation.
///
/// Options are immutable during a run and shared by every node.
///
/// # Example
///
/// ```
/// use glint_core::api::Options;
///
/// let options = Options {
///     max_depth: 500,
///     ..Options::default()
/// }
/// .with_locale("de-DE");
/// ```
#[derive(Clone)]
pub struct Options {
    /// Maximum evaluation stack depth (for recursion protection).
    ///
    /// Default: 1000
    pub max_depth: usize,

    /// Culture tag (e.g. `en-US`, `de-DE`) used when numbers are parsed from
    /// or rendered to strings.
    ///
    /// Default: None (invariant culture)
    pub locale: Option<EcoString>,

    /// Null-propagation mode for accessors. With `None`, a missing or null
    /// path evaluates to `null`.
    ///
    /// Default: None
    pub null_substitution: Option<NullSubstitution>,
}

impl Options {
    pub fn with_locale(mut self, locale: impl Into<EcoString>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_null_substitution(
        mut self,
        substitution: impl Fn(&str) -> Option<Value> + Send + Sync + 'static,
    ) -> Self {
        self.null_substitution = Some(Arc::new(substitution));
        self
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_depth: 1000,
            locale: None,
            null_substitution: None,
        }
    }
}

impl fmt::Debug for Options {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Options")
            .field("max_depth", &self.max_depth)
            .field("locale", &self.locale)
            .field("null_substitution", &self.null_substitution.is_some())
            .finish()
    }
}

/// Configuration options for the Glint engine.
///
/// Holds the options every compiled expression runs with unless the caller
/// passes its own to [`super::CompiledExpression::run_with`].
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Default options for evaluation.
    pub default_options: Options,
}
