//! Build-time errors.
//!
//! Only compile-time failures live here. A run-time "field not found" is a
//! normal filtering outcome and is never reported as an error.

use thiserror::Error;

pub type BuildResult<T> = Result<T, BuildError>;

#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{opcode}: expected {expected} operand(s), found {found}")]
    ArityMismatch {
        opcode: String,
        expected: usize,
        found: usize,
    },

    #[error("malformed filter: {0}")]
    Malformed(String),

    #[error("unknown operator {found:?} (builder handles {expected:?})")]
    UnknownOperator {
        expected: &'static str,
        found: String,
    },

    #[error("expression grammar: {0}")]
    Regex(#[from] regex::Error),
}

impl BuildError {
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}
