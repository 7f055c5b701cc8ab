//! Integer arithmetic operators: + - * /
//!
//! Arithmetic is checked. Overflow and division by zero are runtime errors,
//! and a NULL operand yields NULL.

use super::helpers::{admits, pair_type_names, type_mismatch};
use super::traits::BinaryOperator;
use crate::error::{Error, Result};
use crate::types::{DataType, Value};

pub struct AddOperator;
pub struct SubtractOperator;
pub struct MultiplyOperator;
pub struct DivideOperator;

/// Shared validation: both operands must be (possibly unknown) integers.
fn validate_ints(op: &dyn BinaryOperator, left: &DataType, right: &DataType) -> Result<DataType> {
    if admits(left, DataType::Int) && admits(right, DataType::Int) {
        Ok(DataType::Int)
    } else {
        Err(type_mismatch(op.name(), "INT", format!("{} and {}", left, right)))
    }
}

/// Shared execution: applies a checked integer function, propagating NULL.
fn execute_ints(
    op: &dyn BinaryOperator,
    left: &Value,
    right: &Value,
    f: impl Fn(i64, i64) -> Result<i64>,
) -> Result<Value> {
    match (left, right) {
        (Value::Int(l), Value::Int(r)) => f(*l, *r).map(Value::Int),
        (Value::Int(_) | Value::Null, Value::Int(_) | Value::Null) => Ok(Value::Null),
        _ => Err(type_mismatch(op.name(), "INT", pair_type_names(left, right))),
    }
}

fn overflow(op: &dyn BinaryOperator, l: i64, r: i64) -> Error {
    Error::InvalidValue(format!("integer overflow in {} {} {}", l, op.symbol(), r))
}

impl BinaryOperator for AddOperator {
    fn name(&self) -> &'static str {
        "addition"
    }

    fn symbol(&self) -> &'static str {
        "+"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_ints(self, left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        execute_ints(self, left, right, |l, r| {
            l.checked_add(r).ok_or_else(|| overflow(self, l, r))
        })
    }
}

impl BinaryOperator for SubtractOperator {
    fn name(&self) -> &'static str {
        "subtraction"
    }

    fn symbol(&self) -> &'static str {
        "-"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_ints(self, left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        execute_ints(self, left, right, |l, r| {
            l.checked_sub(r).ok_or_else(|| overflow(self, l, r))
        })
    }
}

impl BinaryOperator for MultiplyOperator {
    fn name(&self) -> &'static str {
        "multiplication"
    }

    fn symbol(&self) -> &'static str {
        "*"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_ints(self, left, right)
    }

    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        execute_ints(self, left, right, |l, r| {
            l.checked_mul(r).ok_or_else(|| overflow(self, l, r))
        })
    }
}

impl BinaryOperator for DivideOperator {
    fn name(&self) -> &'static str {
        "division"
    }

    fn symbol(&self) -> &'static str {
        "/"
    }

    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType> {
        validate_ints(self, left, right)
    }

    /// Integer division, truncating toward zero.
    fn execute(&self, left: &Value, right: &Value) -> Result<Value> {
        execute_ints(self, left, right, |l, r| {
            if r == 0 {
                return Err(Error::InvalidValue("division by zero".into()));
            }
            l.checked_div(r).ok_or_else(|| overflow(self, l, r))
        })
    }
}
