//! Expression evaluation and header inference
//!
//! Expressions are evaluated row-wise against a [`BindingContext`]. Aggregate
//! calls are never folded here: the interpreter folds them per group and
//! passes the finalized values in, and each call evaluates to its value.

use super::binding::BindingContext;
use crate::error::{Error, Result};
use crate::operators;
use crate::parsing::ast::{AggregateKind, Expression, Literal};
use crate::types::{AggregateFunction, Column, DataType, Value};

/// An aggregate call, as function and argument, with the value it finalized
/// to in the current group.
pub type FinalizedAggregate<'a> = (AggregateKind, &'a Expression, Value);

/// Returns the aggregate function implementing an aggregate call.
pub fn aggregate_function(kind: AggregateKind) -> Result<&'static AggregateFunction> {
    AggregateFunction::lookup(kind.name())
        .ok_or_else(|| Error::InvalidValue(format!("unknown aggregate function {}", kind.name())))
}

/// The value of a literal.
pub fn literal_value(literal: &Literal) -> Value {
    match literal {
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Integer(i) => Value::Int(*i),
        Literal::Null => Value::Null,
    }
}

/// Evaluates an expression against one row. Aggregate calls are an error.
pub fn evaluate(expr: &Expression, context: &BindingContext) -> Result<Value> {
    evaluate_with(expr, context, &[])
}

/// Evaluates an expression against one row, with aggregate calls standing
/// for the given finalized values.
pub fn evaluate_with(
    expr: &Expression,
    context: &BindingContext,
    aggregates: &[FinalizedAggregate<'_>],
) -> Result<Value> {
    Ok(match expr {
        Expression::Literal(literal) => literal_value(literal),
        Expression::Rename(expr, _) => evaluate_with(expr, context, aggregates)?,
        Expression::Variable(name) => context.lookup(name)?.clone(),

        Expression::Unary(op, operand) => {
            let operand = evaluate_with(operand, context, aggregates)?;
            operators::unary(*op).execute(&operand)?
        }

        Expression::Binary(op, lhs, rhs) => {
            let lhs = evaluate_with(lhs, context, aggregates)?;
            let rhs = evaluate_with(rhs, context, aggregates)?;
            operators::binary(*op).execute(&lhs, &rhs)?
        }

        Expression::Case {
            branches,
            else_branch,
        } => {
            for (condition, result) in branches {
                let condition = evaluate_with(condition, context, aggregates)?;
                if is_satisfied(&condition, "CASE condition")? {
                    return evaluate_with(result, context, aggregates);
                }
            }
            match else_branch {
                Some(expr) => evaluate_with(expr, context, aggregates)?,
                None => Value::Null,
            }
        }

        Expression::Aggregate(kind, argument) => aggregates
            .iter()
            .find(|(k, a, _)| k == kind && *a == argument.as_ref())
            .map(|(_, _, value)| value.clone())
            .ok_or_else(|| {
                Error::InvalidValue(format!(
                    "aggregate function {} is not allowed here",
                    kind.name()
                ))
            })?,
    })
}

/// Whether a condition value lets a row through. Only true does; false and
/// NULL do not.
pub fn is_satisfied(value: &Value, what: &str) -> Result<bool> {
    if !DataType::Bool.accepts(value) {
        return Err(Error::TypeMismatch {
            expected: format!("BOOL {}", what),
            found: value.type_name().into(),
        });
    }
    Ok(value.is_true())
}

/// The header name of a projected expression.
pub fn column_name(expr: &Expression) -> String {
    match expr {
        Expression::Rename(_, name) => name.clone(),
        Expression::Literal(_) => "literal".into(),
        Expression::Variable(name) => name.clone(),
        Expression::Aggregate(kind, _) => kind.name().into(),
        Expression::Case { .. } => "case".into(),
        Expression::Unary(_, _) | Expression::Binary(_, _, _) => "expression".into(),
    }
}

/// The header column of a projected expression, typed against the header of
/// the rows it reads.
pub fn infer_column(expr: &Expression, source: &[Column], strict: bool) -> Result<Column> {
    Ok(Column::new(
        column_name(expr),
        infer_type(expr, source, strict)?,
    ))
}

/// Infers the static type of an expression. Variables take their column's
/// type, or Unknown if the column is not in `source`. When `strict`, operand
/// types an operator rejects are an error; otherwise the operator's result
/// type is used regardless.
pub fn infer_type(expr: &Expression, source: &[Column], strict: bool) -> Result<DataType> {
    Ok(match expr {
        Expression::Literal(literal) => literal_value(literal).data_type(),
        Expression::Rename(expr, _) => infer_type(expr, source, strict)?,
        Expression::Variable(name) => source
            .iter()
            .find(|column| &column.name == name)
            .map_or(DataType::Unknown, |column| column.datatype),

        Expression::Unary(op, operand) => {
            let op = operators::unary(*op);
            let operand = infer_type(operand, source, strict)?;
            resolve(op.validate(&operand), strict, || {
                op.validate(&DataType::Unknown)
            })?
        }

        Expression::Binary(op, lhs, rhs) => {
            let op = operators::binary(*op);
            let lhs = infer_type(lhs, source, strict)?;
            let rhs = infer_type(rhs, source, strict)?;
            resolve(op.validate(&lhs, &rhs), strict, || {
                op.validate(&DataType::Unknown, &DataType::Unknown)
            })?
        }

        Expression::Case {
            branches,
            else_branch,
        } => {
            let mut result = DataType::Unknown;
            for (condition, branch) in branches {
                let condition = infer_type(condition, source, strict)?;
                if strict && !condition.is_compatible(&DataType::Bool) {
                    return Err(Error::TypeMismatch {
                        expected: "BOOL CASE condition".into(),
                        found: condition.to_string(),
                    });
                }
                result = merge_branch(result, infer_type(branch, source, strict)?, strict)?;
            }
            if let Some(expr) = else_branch {
                result = merge_branch(result, infer_type(expr, source, strict)?, strict)?;
            }
            result
        }

        Expression::Aggregate(kind, argument) => {
            let function = aggregate_function(*kind)?;
            let argument = infer_type(argument, source, strict)?;
            if strict && !argument.is_compatible(&function.argument_type) {
                return Err(Error::TypeMismatch {
                    expected: format!("{} argument to {}", function.argument_type, function.name),
                    found: argument.to_string(),
                });
            }
            function.result_type
        }
    })
}

/// Keeps a checked type, falls back to the unchecked one unless strict.
fn resolve(
    checked: Result<DataType>,
    strict: bool,
    unchecked: impl FnOnce() -> Result<DataType>,
) -> Result<DataType> {
    match checked {
        Ok(datatype) => Ok(datatype),
        Err(err) if strict => Err(err),
        Err(_) => unchecked(),
    }
}

/// The type of a CASE is that of its first typed branch. When strict, all
/// typed branches must agree.
fn merge_branch(current: DataType, branch: DataType, strict: bool) -> Result<DataType> {
    if current == DataType::Unknown {
        return Ok(branch);
    }
    if strict && !current.is_compatible(&branch) {
        return Err(Error::TypeMismatch {
            expected: format!("{} CASE branch", current),
            found: branch.to_string(),
        });
    }
    Ok(current)
}
