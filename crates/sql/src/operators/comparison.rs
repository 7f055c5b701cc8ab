//! Comparison operators: = <> < <= > >=
//!
//! Operands must share a type. Comparing with NULL yields NULL.

use std::cmp::Ordering;

use super::helpers::{pair_type_names, type_mismatch};
use super::traits::BinaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};

/// A comparison, defined by which orderings of its operands make it true.
pub struct ComparisonOperator {
    name: &'static str,
    symbol: &'static str,
    holds: fn(Ordering) -> bool,
}

pub static EQUAL: ComparisonOperator = ComparisonOperator {
    name: "equality",
    symbol: "=",
    holds: Ordering::is_eq,
};

pub static NOT_EQUAL: ComparisonOperator = ComparisonOperator {
    name: "inequality",
    symbol: "<>",
    holds: Ordering::is_ne,
};

pub static LESS_THAN: ComparisonOperator = ComparisonOperator {
    name: "less than",
    symbol: "<",
    holds: Ordering::is_lt,
};

pub static LESS_THAN_OR_EQUAL: ComparisonOperator = ComparisonOperator {
    name: "less than or equal",
    symbol: "<=",
    holds: Ordering::is_le,
};

pub static GREATER_THAN: ComparisonOperator = ComparisonOperator {
    name: "greater than",
    symbol: ">",
    holds: Ordering::is_gt,
};

pub static GREATER_THAN_OR_EQUAL: ComparisonOperator = ComparisonOperator {
    name: "greater than or equal",
    symbol: ">=",
    holds: Ordering::is_ge,
};

impl BinaryOperator for ComparisonOperator {
    fn name(&self) -> &'static str {
        self.name
    }

    fn symbol(&self) -> &'static str {
        self.symbol
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        if left.is_compatible(right) {
            Ok(DataType::Bool)
        } else {
            Err(type_mismatch(
                self.name,
                "matching",
                format!("{} and {}", left, right),
            ))
        }
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        let ordering = match (left, right) {
            (Value::Null, _) | (_, Value::Null) => return Ok(Value::Null),
            (Value::Bool(l), Value::Bool(r)) => l.cmp(r),
            (Value::Int(l), Value::Int(r)) => l.cmp(r),
            (Value::Bool(_), Value::Int(_)) | (Value::Int(_), Value::Bool(_)) => {
                return Err(type_mismatch(
                    self.name,
                    "matching",
                    pair_type_names(left, right),
                ));
            }
        };
        Ok(Value::Bool((self.holds)(ordering)))
    }
}
