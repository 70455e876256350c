use crate::event::{Event, FieldPath};
use std::fmt;

/// Marks an operand as a reference to another field of the same event.
pub const REFERENCE_MARKER: char = '$';

/// Right-hand side of a comparison.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operand {
    /// Fixed string, taken verbatim. `"50"` stays the two-character string.
    Literal(String),
    /// Another field of the event under test.
    FieldRef(FieldPath),
}

impl Operand {
    /// Classify a raw operand token.
    pub fn resolve(token: &str) -> Self {
        match token.strip_prefix(REFERENCE_MARKER) {
            Some(path) => Operand::FieldRef(FieldPath::new(path)),
            None => Operand::Literal(token.to_string()),
        }
    }

    /// Concrete value for `event`, or `None` when a referenced field is absent.
    pub fn value_in<'a>(&'a self, event: &'a Event) -> Option<&'a str> {
        match self {
            Operand::Literal(v) => Some(v),
            Operand::FieldRef(path) => event.get(path),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Literal(v) => write!(f, "literal {:?}", v),
            Operand::FieldRef(p) => write!(f, "reference {}", p),
        }
    }
}
