use core::fmt;

use super::{Expression, kind};
use crate::stack::ensure_sufficient_stack;
use crate::values::Value;

fn write_literal(f: &mut fmt::Formatter<'_>, value: &Value) -> fmt::Result {
    match value {
        Value::Str(s) => {
            write!(f, "'")?;
            for c in s.chars() {
                match c {
                    '\'' => write!(f, "\\'")?,
                    '\\' => write!(f, "\\\\")?,
                    '\n' => write!(f, "\\n")?,
                    c => write!(f, "{}", c)?,
                }
            }
            write!(f, "'")
        }
        other => write!(f, "{}", other),
    }
}

/// Source-like rendering used in error messages, e.g. `ticksToDays(x)`.
impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        ensure_sufficient_stack(|| self.render(f))
    }
}

impl Expression {
    fn render(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(value) = &self.value {
            return write_literal(f, value);
        }
        if let Some(path) = self.path() {
            return write!(f, "{}", path);
        }

        let kind = self.kind.as_str();
        if kind::is_infix(kind) && self.children.len() >= 2 {
            write!(f, "(")?;
            for (i, child) in self.children.iter().enumerate() {
                if i > 0 {
                    write!(f, " {} ", kind)?;
                }
                write!(f, "{}", child)?;
            }
            return write!(f, ")");
        }
        if kind == kind::NOT && self.children.len() == 1 {
            return write!(f, "!{}", self.children[0]);
        }

        write!(f, "{}(", kind)?;
        for (i, child) in self.children.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", child)?;
        }
        write!(f, ")")
    }
}
