//! NOT logical operator implementation

use super::helpers::{admits, type_mismatch};
use super::traits::UnaryOperator;
use crate::error::Result;
use crate::types::{DataType, Value};

pub struct NotOperator;

impl UnaryOperator for NotOperator {
    fn name(&self) -> &'static str {
        "logical NOT"
    }

    fn symbol(&self) -> &'static str {
        "NOT"
    }

    fn validate(&self, operand: &DataType) -> Result<DataType> {
        if admits(operand, DataType::Bool) {
            Ok(DataType::Bool)
        } else {
            Err(type_mismatch(self.name(), "BOOL", operand))
        }
    }

    fn execute(&self, operand: &Value) -> Result<Value> {
        // NOT NULL = NULL
        match operand {
            Value::Bool(b) => Ok(Value::Bool(!b)),
            Value::Null => Ok(Value::Null),
            Value::Int(_) => Err(type_mismatch(self.name(), "BOOL", operand.type_name())),
        }
    }
}
