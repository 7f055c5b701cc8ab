//! Core traits for operators

use crate::error::Result;
use crate::types::{DataType, Value};

/// Trait for binary operators (two operands)
pub trait BinaryOperator: Send + Sync {
    /// Get operator name for error messages
    fn name(&self) -> &'static str;

    /// Get operator symbol for display
    fn symbol(&self) -> &'static str;

    /// Validate operand types and return result type. `Unknown` operands are
    /// accepted; the result type is still the operator's own.
    fn validate(&self, left: &DataType, right: &DataType) -> Result<DataType>;

    /// Execute the operation
    fn execute(&self, left: &Value, right: &Value) -> Result<Value>;
}

/// Trait for unary operators (one operand)
pub trait UnaryOperator: Send + Sync {
    /// Get operator name for error messages
    fn name(&self) -> &'static str;

    /// Get operator symbol for display
    fn symbol(&self) -> &'static str;

    /// Validate operand type and return result type
    fn validate(&self, operand: &DataType) -> Result<DataType>;

    /// Execute the operation
    fn execute(&self, operand: &Value) -> Result<Value>;
}
