//! Helper functions for operator implementations

use crate::error::Error;
use crate::types::{DataType, Value};

/// Whether a static type may hold values of `expected`.
pub fn admits(datatype: &DataType, expected: DataType) -> bool {
    matches!(datatype, DataType::Unknown) || *datatype == expected
}

/// Type mismatch for an operator applied to the given operand types.
pub fn type_mismatch(operator: &str, expected: &str, found: impl std::fmt::Display) -> Error {
    Error::TypeMismatch {
        expected: format!("{} operands for {}", expected, operator),
        found: found.to_string(),
    }
}

/// Type names of a pair of values, for error messages.
pub fn pair_type_names(left: &Value, right: &Value) -> String {
    format!("{} and {}", left.type_name(), right.type_name())
}
