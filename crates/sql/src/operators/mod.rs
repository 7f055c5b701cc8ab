//! Operator implementations
//!
//! Each operator owns both its type rule (`validate`) and its value rule
//! (`execute`), so header inference and evaluation never disagree.

pub mod helpers;
pub mod traits;

mod arithmetic;
mod comparison;
mod not;

pub use traits::{BinaryOperator, UnaryOperator};

use crate::parsing::ast;

/// Returns the implementation of a prefix operator.
pub fn unary(op: ast::UnaryOperator) -> &'static dyn UnaryOperator {
    match op {
        ast::UnaryOperator::Not => {
            static OP: not::NotOperator = not::NotOperator;
            &OP
        }
    }
}

/// Returns the implementation of an infix operator.
pub fn binary(op: ast::BinaryOperator) -> &'static dyn BinaryOperator {
    use ast::BinaryOperator::*;

    match op {
        Add => {
            static OP: arithmetic::AddOperator = arithmetic::AddOperator;
            &OP
        }
        Subtract => {
            static OP: arithmetic::SubtractOperator = arithmetic::SubtractOperator;
            &OP
        }
        Multiply => {
            static OP: arithmetic::MultiplyOperator = arithmetic::MultiplyOperator;
            &OP
        }
        Divide => {
            static OP: arithmetic::DivideOperator = arithmetic::DivideOperator;
            &OP
        }
        Equal => &comparison::EQUAL,
        NotEqual => &comparison::NOT_EQUAL,
        LessThan => &comparison::LESS_THAN,
        LessThanOrEqual => &comparison::LESS_THAN_OR_EQUAL,
        GreaterThan => &comparison::GREATER_THAN,
        GreaterThanOrEqual => &comparison::GREATER_THAN_OR_EQUAL,
    }
}
