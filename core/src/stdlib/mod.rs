//! Glint Standard Library
//!
//! The built-in functions every registry starts from, grouped in packages:
//! - Memory access: constants, accessors, element lookup
//! - Math: arithmetic, aggregates, rounding
//! - Logic: comparisons, boolean connectives, conditionals
//! - String: text manipulation
//! - Conversion: casts between value kinds, tick durations
//! - Datetime: ISO 8601 timestamps and tick arithmetic
//! - Collection: arrays, objects, iteration
//!
//! Each package exposes a `register_*` function that binds its evaluators in
//! a [`Registry`]. Hosts normally get all of them at once through
//! [`register_builtins`] or [`Registry::with_builtins`].

use once_cell::sync::Lazy;

use crate::registry::{Registry, RegistryError};

pub mod collection;
pub mod conversion;
pub mod datetime;
pub mod logic;
pub mod math;
pub mod memory_access;
pub mod string;

pub use collection::register_collection;
pub use conversion::register_conversion;
pub use datetime::register_datetime;
pub use logic::register_logic;
pub use math::register_math;
pub use memory_access::register_memory_access;
pub use string::register_string;

/// Register every standard library package in `registry`.
///
/// # Example
///
/// ```
/// use glint_core::registry::Registry;
/// use glint_core::stdlib::register_builtins;
///
/// let mut registry = Registry::new();
/// register_builtins(&mut registry).unwrap();
/// assert!(registry.contains("ticksToDays"));
/// ```
///
/// If you want more control over which packages to include, register them
/// individually with `register_math()`, `register_string()`, etc. Every
/// registry needs [`register_memory_access`] for literals and accessors.
pub fn register_builtins(registry: &mut Registry) -> Result<(), RegistryError> {
    register_memory_access(registry)?;
    register_math(registry)?;
    register_logic(registry)?;
    register_string(registry)?;
    register_conversion(registry)?;
    register_datetime(registry)?;
    register_collection(registry)?;
    Ok(())
}

static BUILTINS: Lazy<Registry> = Lazy::new(|| {
    Registry::with_builtins().expect("built-in function names are unique")
});

/// Process-wide registry of the built-in functions, initialized on first use.
pub fn builtins() -> &'static Registry {
    &BUILTINS
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_builtins_twice_is_rejected() {
        let mut registry = Registry::new();
        register_builtins(&mut registry).unwrap();
        assert!(matches!(
            register_builtins(&mut registry),
            Err(RegistryError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_builtins_cover_every_kind() {
        use crate::expression::kind;

        let registry = builtins();
        for name in [
            kind::CONSTANT,
            kind::ACCESSOR,
            kind::ELEMENT,
            kind::ADD,
            kind::POWER,
            kind::AVERAGE,
            kind::AND,
            kind::COALESCE,
            kind::REPLACE,
            kind::TICKS_TO_DAYS,
            kind::TICKS_TO_HOURS,
            kind::TICKS_TO_MINUTES,
            kind::DATE_DIFF_TICKS,
            kind::FOREACH,
            kind::WHERE,
        ] {
            assert!(registry.contains(name), "missing built-in {name}");
        }
    }

    #[test]
    fn test_builtins_is_shared() {
        assert!(core::ptr::eq(builtins(), builtins()));
    }
}
