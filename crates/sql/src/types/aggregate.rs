//! Aggregate functions and the accumulator shapes used to fold them.

use super::{DataType, Record, Value};
use crate::error::{Error, Result};
use std::collections::BTreeMap;

/// The evaluated GROUP BY expressions identifying one aggregation bucket.
pub type PrimaryKey = Record;

/// Running states of every aggregate for one group, in projection order.
pub type AggregateRow = Vec<Value>;

/// Groups whose aggregates are still being folded.
pub type PendingSummarization = BTreeMap<PrimaryKey, AggregateRow>;

/// Groups whose aggregates have been finalized into output records.
pub type Summarization = BTreeMap<PrimaryKey, Record>;

/// An aggregate function: a fold from a column of input values to one value.
#[derive(Debug)]
pub struct AggregateFunction {
    /// Function name as written in statements
    pub name: &'static str,
    /// Type of the values folded in
    pub argument_type: DataType,
    /// Type of the finalized value
    pub result_type: DataType,
    /// State before any input has been folded
    pub initial_state: Value,
    /// Folds one input value into the running state
    pub accumulate: fn(&Value, Value) -> Result<Value>,
    /// Turns the final state into the output value
    pub finalize: fn(Value) -> Value,
}

impl AggregateFunction {
    /// Returns a fresh state.
    pub fn initialize(&self) -> Value {
        self.initial_state.clone()
    }

    /// Folds `value` into `state`.
    pub fn step(&self, value: &Value, state: Value) -> Result<Value> {
        (self.accumulate)(value, state)
    }

    /// Finalizes a state into the output value.
    pub fn finish(&self, state: Value) -> Value {
        (self.finalize)(state)
    }

    /// Looks up a built-in aggregate by name (case-insensitive).
    pub fn lookup(name: &str) -> Option<&'static AggregateFunction> {
        BUILTINS
            .iter()
            .copied()
            .find(|f| f.name.eq_ignore_ascii_case(name))
    }
}

/// `bool_or`: true if any input is true. NULL inputs are ignored.
pub static BOOL_OR: AggregateFunction = AggregateFunction {
    name: "bool_or",
    argument_type: DataType::Bool,
    result_type: DataType::Bool,
    initial_state: Value::Bool(false),
    accumulate: bool_or_accumulate,
    finalize: identity,
};

/// `sum`: integer sum of the inputs. NULL inputs are ignored.
pub static SUM: AggregateFunction = AggregateFunction {
    name: "sum",
    argument_type: DataType::Int,
    result_type: DataType::Int,
    initial_state: Value::Int(0),
    accumulate: sum_accumulate,
    finalize: identity,
};

static BUILTINS: [&AggregateFunction; 2] = [&BOOL_OR, &SUM];

fn bool_or_accumulate(value: &Value, state: Value) -> Result<Value> {
    match (value, state) {
        (Value::Null, state) => Ok(state),
        (Value::Bool(v), Value::Bool(s)) => Ok(Value::Bool(s || *v)),
        (value, _) => Err(Error::TypeMismatch {
            expected: "bool argument to bool_or".into(),
            found: value.type_name().into(),
        }),
    }
}

fn sum_accumulate(value: &Value, state: Value) -> Result<Value> {
    match (value, state) {
        (Value::Null, state) => Ok(state),
        (Value::Int(v), Value::Int(s)) => s
            .checked_add(*v)
            .map(Value::Int)
            .ok_or_else(|| Error::InvalidValue("integer overflow in sum".into())),
        (value, _) => Err(Error::TypeMismatch {
            expected: "int argument to sum".into(),
            found: value.type_name().into(),
        }),
    }
}

fn identity(state: Value) -> Value {
    state
}
