//! The host-supplied table capability
//!
//! The interpreter never stores table data itself. Table lookups and CREATE
//! TABLE registrations go through an [`Environment`] supplied by the embedder.

use std::collections::BTreeMap;

use crate::error::{Error, Result};
use crate::types::{Record, Stream, TableSpec};

/// Resolves table names to data and registers new table schemas.
///
/// Both methods default to [`Error::Unsupported`], so a host only implements
/// the capabilities it actually has.
pub trait Environment {
    /// Returns the schema and current data of a table.
    fn lookup_table(&self, name: &str) -> Result<Stream> {
        Err(Error::Unsupported(format!("table lookup of {}", name)))
    }

    /// Registers the schema of a new table.
    fn register_table(&mut self, name: &str, _spec: TableSpec) -> Result<()> {
        Err(Error::Unsupported(format!("table registration of {}", name)))
    }
}

/// An environment with no tables and no catalog. Queries without table
/// references still run against it.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmptyEnvironment;

impl Environment for EmptyEnvironment {}

/// An in-memory catalog mapping table names to streams.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalog {
    tables: BTreeMap<String, Stream>,
}

impl MemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends records to a registered table, checking each against the
    /// table's columns. Nothing is inserted if any record is rejected.
    pub fn insert(&mut self, name: &str, records: Vec<Record>) -> Result<()> {
        let table = self
            .tables
            .get_mut(name)
            .ok_or_else(|| Error::TableNotFound(name.to_string()))?;
        let checked = Stream::try_new(table.header.clone(), records)?;
        table.records.extend(checked.records);
        tracing::debug!("Inserted into table {}, now {} rows", name, table.len());
        Ok(())
    }

    /// Returns a registered table.
    pub fn get(&self, name: &str) -> Option<&Stream> {
        self.tables.get(name)
    }

    /// Names of all registered tables, in order.
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }
}

impl Environment for MemoryCatalog {
    fn lookup_table(&self, name: &str) -> Result<Stream> {
        self.tables
            .get(name)
            .cloned()
            .ok_or_else(|| Error::TableNotFound(name.to_string()))
    }

    fn register_table(&mut self, name: &str, spec: TableSpec) -> Result<()> {
        if self.tables.contains_key(name) {
            return Err(Error::DuplicateTable(name.to_string()));
        }
        spec.validate()?;
        self.tables.insert(name.to_string(), Stream::from_spec(&spec));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Column, DataType, Value};

    fn spec() -> TableSpec {
        TableSpec::new(vec![
            Column::new("id", DataType::Int),
            Column::new("flag", DataType::Bool),
        ])
    }

    #[test]
    fn test_empty_environment_is_unsupported() {
        let mut env = EmptyEnvironment;
        assert!(matches!(env.lookup_table("t"), Err(Error::Unsupported(_))));
        assert!(matches!(
            env.register_table("t", spec()),
            Err(Error::Unsupported(_))
        ));
    }

    #[test]
    fn test_register_and_lookup() {
        let mut catalog = MemoryCatalog::new();
        catalog.register_table("t", spec()).unwrap();
        let stream = catalog.lookup_table("t").unwrap();
        assert_eq!(stream.header, spec().columns);
        assert!(stream.is_empty());
        assert_eq!(catalog.table_names(), vec!["t"]);

        assert_eq!(
            catalog.register_table("t", spec()),
            Err(Error::DuplicateTable("t".into()))
        );
        assert_eq!(
            catalog.lookup_table("missing"),
            Err(Error::TableNotFound("missing".into()))
        );
    }

    #[test]
    fn test_insert_checks_records() {
        let mut catalog = MemoryCatalog::new();
        catalog.register_table("t", spec()).unwrap();
        catalog
            .insert("t", vec![vec![Value::Int(1), Value::Bool(true)]])
            .unwrap();

        let bad = vec![
            vec![Value::Int(2), Value::Null],
            vec![Value::Bool(false), Value::Int(3)],
        ];
        assert!(matches!(
            catalog.insert("t", bad),
            Err(Error::TypeMismatch { .. })
        ));
        assert_eq!(catalog.get("t").map(Stream::len), Some(1));
    }
}
