use crate::error::{BuildError, BuildResult};
use crate::event::FieldPath;
use regex::Regex;
use serde_json::Value;

/// Separates operands after the opcode.
pub const ARG_DELIMITER: char = '/';

/// Immutable description of one filter condition as written in an asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    pub target: FieldPath,
    pub opcode: String,
    pub args: Vec<String>,
}

impl FilterSpec {
    /// Parse a declarative node of the form `{"<field>": "+<opcode>/<args>"}`.
    pub fn from_node(node: &Value) -> BuildResult<Self> {
        let obj = node
            .as_object()
            .ok_or_else(|| BuildError::malformed(format!("expected an object, got {}", node)))?;

        let mut members = obj.iter();
        let (field, expr) = match (members.next(), members.next()) {
            (Some(member), None) => member,
            _ => {
                return Err(BuildError::malformed(format!(
                    "expected exactly one field, got {}",
                    obj.len()
                )));
            }
        };

        let raw = expr.as_str().ok_or_else(|| {
            BuildError::malformed(format!("expression for {:?} must be a string", field))
        })?;

        Self::from_parts(field, raw)
    }

    /// Parse a target field name and its raw expression.
    pub fn from_parts(field: &str, raw: &str) -> BuildResult<Self> {
        let (opcode, args) = parse_expression(raw)?;
        Ok(Self {
            target: FieldPath::new(field),
            opcode,
            args,
        })
    }

    /// The single operand of a unary comparator.
    ///
    /// Fails with `ArityMismatch` for zero or several operands.
    pub fn unary_operand(&self) -> BuildResult<&str> {
        match self.args.as_slice() {
            [only] => Ok(only.as_str()),
            other => Err(BuildError::ArityMismatch {
                opcode: self.opcode.clone(),
                expected: 1,
                found: other.len(),
            }),
        }
    }
}

/// Split `+<opcode>/<arg>/<arg>...` into the opcode and its raw arguments.
///
/// An absent or empty argument segment yields no arguments. Argument content
/// is not inspected.
///
/// Example:
/// +s_lt/ABCD      =>  ("s_lt", ["ABCD"])
/// +s_lt/a/b       =>  ("s_lt", ["a", "b"])
/// +s_lt           =>  ("s_lt", [])
pub fn parse_expression(raw: &str) -> BuildResult<(String, Vec<String>)> {
    // Capture:
    // 1) opcode: identifier after the '+' prefix
    // 2) args: everything after the first delimiter (optional)
    const EXPR_RE: &str = r#"(?s)^\+([A-Za-z_][A-Za-z0-9_]*)(?:/(.*))?$"#;
    let re = Regex::new(EXPR_RE)?;

    let caps = re.captures(raw).ok_or_else(|| {
        BuildError::malformed(format!(
            "expression {:?} is not of the form +<opcode>/<operand>",
            raw
        ))
    })?;

    let opcode = caps
        .get(1)
        .ok_or_else(|| BuildError::malformed(format!("missing opcode in {:?}", raw)))?
        .as_str()
        .to_string();

    let args = match caps.get(2).map(|m| m.as_str()) {
        None | Some("") => Vec::new(),
        Some(rest) => rest.split(ARG_DELIMITER).map(str::to_string).collect(),
    };

    Ok((opcode, args))
}

/// Parse a unary expression, returning the opcode and its only operand token.
pub fn parse_unary(raw: &str) -> BuildResult<(String, String)> {
    let (opcode, args) = parse_expression(raw)?;
    let found = args.len();
    match <[String; 1]>::try_from(args) {
        Ok([token]) => Ok((opcode, token)),
        Err(_) => Err(BuildError::ArityMismatch {
            opcode,
            expected: 1,
            found,
        }),
    }
}
