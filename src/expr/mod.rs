//! Expression layer: `"+<opcode>/<operand>"` strings and their operands.

pub mod operand;
pub mod parse;

pub use operand::{Operand, REFERENCE_MARKER};
pub use parse::{FilterSpec, parse_expression, parse_unary};
