//! Value types for relq
//!
//! Scalar values carried in records, and the data types describing columns.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A scalar value.
///
/// The variant order is significant: the derived `Ord` compares the tag first
/// (Bool < Int < Null) and the payload second, which gives records a total
/// order usable as grouping and map keys.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Null,
}

impl Value {
    /// True only for `Bool(true)`. Null and false are both "not true", which
    /// is what row filters need.
    pub fn is_true(&self) -> bool {
        matches!(self, Value::Bool(true))
    }

    /// Get the intrinsic data type of this value. Null has no type of its own.
    pub fn data_type(&self) -> DataType {
        match self {
            Value::Bool(_) => DataType::Bool,
            Value::Int(_) => DataType::Int,
            Value::Null => DataType::Unknown,
        }
    }

    /// Get the type name of this value, for error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Null => "null",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{}", b),
            Value::Int(i) => write!(f, "{}", i),
            Value::Null => write!(f, "NULL"),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

/// Column data types.
///
/// `Unknown` is the type of an expression whose type cannot be determined
/// yet, e.g. a bare NULL literal or a reference to a column outside any known
/// header.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int,
    Unknown,
}

impl DataType {
    /// Whether a value may be stored in a column of this type. Null fits any
    /// column, and an Unknown column takes anything.
    pub fn accepts(&self, value: &Value) -> bool {
        match (self, value) {
            (_, Value::Null) | (DataType::Unknown, _) => true,
            (DataType::Bool, Value::Bool(_)) | (DataType::Int, Value::Int(_)) => true,
            (DataType::Bool, Value::Int(_)) | (DataType::Int, Value::Bool(_)) => false,
        }
    }

    /// Whether two types can meet in a comparison or a set operation. Unknown
    /// is compatible with everything.
    pub fn is_compatible(&self, other: &DataType) -> bool {
        matches!((self, other), (DataType::Unknown, _) | (_, DataType::Unknown)) || self == other
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataType::Bool => write!(f, "BOOL"),
            DataType::Int => write!(f, "INT"),
            DataType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_total_order() {
        let mut values = vec![
            Value::Null,
            Value::Int(3),
            Value::Bool(true),
            Value::Int(-1),
            Value::Bool(false),
        ];
        values.sort();
        assert_eq!(
            values,
            vec![
                Value::Bool(false),
                Value::Bool(true),
                Value::Int(-1),
                Value::Int(3),
                Value::Null,
            ]
        );
    }

    #[test]
    fn test_records_order_lexicographically() {
        let a = vec![Value::Bool(true), Value::Int(1)];
        let b = vec![Value::Bool(true), Value::Null];
        let c = vec![Value::Int(0)];
        assert!(a < b);
        assert!(b < c);
    }

    #[test]
    fn test_data_type_accepts() {
        assert!(DataType::Bool.accepts(&Value::Bool(true)));
        assert!(DataType::Bool.accepts(&Value::Null));
        assert!(!DataType::Bool.accepts(&Value::Int(1)));
        assert!(DataType::Unknown.accepts(&Value::Int(1)));
        assert_eq!(Value::Null.data_type(), DataType::Unknown);
    }

    #[test]
    fn test_is_true() {
        assert!(Value::Bool(true).is_true());
        assert!(!Value::Bool(false).is_true());
        assert!(!Value::Null.is_true());
        assert!(!Value::Int(1).is_true());
    }

    #[test]
    fn test_display() {
        assert_eq!(Value::Bool(false).to_string(), "false");
        assert_eq!(Value::Int(-12).to_string(), "-12");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(DataType::Int.to_string(), "INT");
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_string(&vec![Value::Bool(true), Value::Int(2), Value::Null])
            .unwrap();
        assert_eq!(json, r#"[{"Bool":true},{"Int":2},"Null"]"#);
        let back: Vec<Value> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![Value::Bool(true), Value::Int(2), Value::Null]);
    }
}
