//! Runtime values and their static type tags.
//!
//! Every expression evaluates to a [`Value`], a dynamically typed union.
//! Functions declare the shape of what they produce with a [`ReturnType`],
//! which validators use to reject ill-typed trees before evaluation.

mod return_type;
mod value;


pub use return_type::ReturnType;
pub use value::{Object, Value};
