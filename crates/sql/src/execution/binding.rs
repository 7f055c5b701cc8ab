//! Per-row variable bindings

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::types::{Column, Record, Value};

/// One row's name to value bindings, visible while evaluating that row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BindingContext {
    bindings: HashMap<String, Value>,
}

impl BindingContext {
    /// An empty context, for queries without a FROM clause.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds each column name of a header to the record's value at the same
    /// position. If a name repeats, the first column wins.
    pub fn from_record(header: &[Column], record: &Record) -> Self {
        let mut context = Self::new();
        for (column, value) in header.iter().zip(record) {
            context
                .bindings
                .entry(column.name.clone())
                .or_insert_with(|| value.clone());
        }
        context
    }

    /// Binds every column name of a header to NULL.
    pub fn nulls(header: &[Column]) -> Self {
        let mut context = Self::new();
        for column in header {
            context
                .bindings
                .entry(column.name.clone())
                .or_insert(Value::Null);
        }
        context
    }

    /// Binds a name, replacing any existing binding.
    pub fn bind(&mut self, name: impl Into<String>, value: Value) {
        self.bindings.insert(name.into(), value);
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    /// Looks up a name, failing if it is unbound.
    pub fn lookup(&self, name: &str) -> Result<&Value> {
        self.get(name)
            .ok_or_else(|| Error::UnresolvedVariable(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
