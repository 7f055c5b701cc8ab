//! Streams: a header of columns plus an ordered collection of records.
//!
//! Every intermediate and final result in the engine is a stream. Streams are
//! built once and never mutated in place afterwards.

use super::{Column, TableSpec, Value};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// One positional tuple of values, with arity matching its stream's header.
pub type Record = Vec<Value>;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub header: Vec<Column>,
    pub records: Vec<Record>,
}

impl Stream {
    /// Creates a stream without checking the records against the header.
    pub fn new(header: Vec<Column>, records: Vec<Record>) -> Self {
        Self { header, records }
    }

    /// Creates a stream, checking every record's arity and value types
    /// against the header.
    pub fn try_new(header: Vec<Column>, records: Vec<Record>) -> Result<Self> {
        let stream = Self::new(header, records);
        stream.validate()?;
        Ok(stream)
    }

    /// The stream with no columns and no records.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A stream with the given header and no records, e.g. a freshly created
    /// table.
    pub fn from_spec(spec: &TableSpec) -> Self {
        Self::new(spec.columns.clone(), Vec::new())
    }

    /// Checks the header/record invariant: every record has the header's
    /// arity and every value fits its column's type.
    pub fn validate(&self) -> Result<()> {
        for record in &self.records {
            if record.len() != self.header.len() {
                return Err(Error::ArityMismatch {
                    expected: self.header.len(),
                    found: record.len(),
                });
            }
            for (column, value) in self.header.iter().zip(record) {
                column.check_value(value)?;
            }
        }
        Ok(())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
