//! JSON encoding of expression trees.
//!
//! ```json
//! {"call": "ticksToDays", "args": [{"path": "session.duration"}]}
//! ```
//!
//! - `{"call": name, "args": [...]}` is a function node (`args` may be omitted);
//! - `{"path": "a.b[0]"}` is an accessor;
//! - `{"value": any}` or any non-object JSON value is a constant.

use alloc::string::{String, ToString};
use alloc::vec::Vec;
use thiserror::Error;

use super::Expression;
use crate::stack::ensure_sufficient_stack;
use crate::values::Value;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("'call' must be a string, found {found}")]
    InvalidCall { found: String },

    #[error("'args' of '{call}' must be an array")]
    InvalidArgs { call: String },

    #[error("'path' must be a string, found {found}")]
    InvalidPath { found: String },

    #[error("object node must have one of 'call', 'path' or 'value': {node}")]
    UnknownShape { node: String },
}

impl Expression {
    /// Decode a tree from its JSON encoding.
    pub fn from_json(json: &serde_json::Value) -> Result<Expression, TreeError> {
        ensure_sufficient_stack(|| Self::decode(json))
    }

    fn decode(json: &serde_json::Value) -> Result<Expression, TreeError> {
        let serde_json::Value::Object(node) = json else {
            return Ok(Expression::constant(Value::from(json.clone())));
        };

        if let Some(call) = node.get("call") {
            let name = call.as_str().ok_or_else(|| TreeError::InvalidCall {
                found: call.to_string(),
            })?;
            let args = match node.get("args") {
                None => Vec::new(),
                Some(serde_json::Value::Array(args)) => args
                    .iter()
                    .map(Expression::from_json)
                    .collect::<Result<Vec<_>, _>>()?,
                Some(_) => {
                    return Err(TreeError::InvalidArgs {
                        call: name.to_string(),
                    });
                }
            };
            return Ok(Expression::new(name, args));
        }

        if let Some(path) = node.get("path") {
            let path = path.as_str().ok_or_else(|| TreeError::InvalidPath {
                found: path.to_string(),
            })?;
            return Ok(Expression::accessor(path));
        }

        if let Some(value) = node.get("value") {
            return Ok(Expression::constant(Value::from(value.clone())));
        }

        Err(TreeError::UnknownShape {
            node: json.to_string(),
        })
    }
}
