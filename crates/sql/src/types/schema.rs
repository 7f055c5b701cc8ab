//! Schema types (columns and table specs)
//!
//! A table spec only describes a table's shape. Where the table's data lives
//! is up to the environment that registers it.

use super::{DataType, Value};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A named, typed position in a stream header.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Column {
    /// Column name.
    pub name: String,
    /// Column datatype.
    pub datatype: DataType,
}

impl Column {
    /// Creates a new column.
    pub fn new(name: impl Into<String>, datatype: DataType) -> Self {
        Column {
            name: name.into(),
            datatype,
        }
    }

    /// Returns a copy of this column under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Column::new(name, self.datatype)
    }

    /// Checks that a value fits this column.
    pub fn check_value(&self, value: &Value) -> Result<()> {
        if self.datatype.accepts(value) {
            return Ok(());
        }
        Err(Error::TypeMismatch {
            expected: format!("{} for column {}", self.datatype, self.name),
            found: value.type_name().into(),
        })
    }
}

impl Display for Column {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.name, self.datatype)
    }
}

/// The declared schema of a table: an ordered list of columns.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct TableSpec {
    pub columns: Vec<Column>,
}

impl TableSpec {
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Validates the column list itself: names must be non-empty and unique.
    pub fn validate(&self) -> Result<()> {
        for (i, column) in self.columns.iter().enumerate() {
            if column.name.is_empty() {
                return Err(Error::InvalidValue("Column name cannot be empty".into()));
            }
            if self.columns[..i].iter().any(|c| c.name == column.name) {
                return Err(Error::InvalidValue(format!(
                    "Duplicate column name: {}",
                    column.name
                )));
            }
        }
        Ok(())
    }
}
