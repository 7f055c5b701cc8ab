//! Common test utilities for integration tests
#![allow(dead_code)]

use relq_sql::{Engine, EngineConfig, Error, MemoryCatalog, Record, Stream, Value};
use std::collections::HashMap;

/// Test context that owns an engine over an in-memory catalog
pub struct TestContext {
    pub engine: Engine<MemoryCatalog>,
}

impl TestContext {
    /// Create a new test context with every check enabled
    pub fn new() -> Self {
        Self::with_config(EngineConfig::for_testing())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: Engine::with_config(MemoryCatalog::new(), config),
        }
    }

    /// Execute a statement, panicking on error
    pub fn exec(&mut self, sql: &str) -> Stream {
        match self.engine.execute(sql) {
            Ok(stream) => stream,
            Err(e) => panic!("Statement failed: {}\n  {}", e, sql),
        }
    }

    /// Execute a query and return rows as column name to value maps
    pub fn query(&mut self, sql: &str) -> Vec<HashMap<String, Value>> {
        let stream = self.exec(sql);
        stream
            .records
            .iter()
            .map(|record| {
                stream
                    .header
                    .iter()
                    .zip(record)
                    .map(|(column, value)| (column.name.clone(), value.clone()))
                    .collect()
            })
            .collect()
    }

    /// Execute a query and return its records in order
    pub fn records(&mut self, sql: &str) -> Vec<Record> {
        self.exec(sql).records
    }

    /// Execute a statement expected to fail, returning the error
    pub fn exec_error(&mut self, sql: &str) -> Error {
        match self.engine.execute(sql) {
            Ok(stream) => panic!("Expected error, got {} rows\n  {}", stream.len(), sql),
            Err(e) => e,
        }
    }

    pub fn assert_row_count(&mut self, sql: &str, expected: usize) {
        let stream = self.exec(sql);
        assert_eq!(
            stream.len(),
            expected,
            "Expected {} rows, got {}\n  {}",
            expected,
            stream.len(),
            sql
        );
    }

    /// Assert a single-row query yields `expected` in `column`
    pub fn assert_query_value(&mut self, sql: &str, column: &str, expected: Value) {
        let rows = self.query(sql);
        assert_eq!(rows.len(), 1, "Expected one row\n  {}", sql);
        assert_eq!(rows[0].get(column), Some(&expected), "Column {}\n  {}", column, sql);
    }

    pub fn assert_error_contains(&mut self, sql: &str, expected: &str) {
        let message = self.exec_error(sql).to_string();
        assert!(
            message.contains(expected),
            "Expected error containing {:?}, got {:?}",
            expected,
            message
        );
    }

    /// Append records to a created table
    pub fn insert(&mut self, table: &str, records: Vec<Record>) {
        if let Err(e) = self.engine.env_mut().insert(table, records) {
            panic!("Insert into {} failed: {}", table, e);
        }
    }
}

/// Helper to build a test table
pub struct TableBuilder<'a> {
    ctx: &'a mut TestContext,
    table_name: String,
}

impl<'a> TableBuilder<'a> {
    pub fn new(ctx: &'a mut TestContext, table_name: &str) -> Self {
        Self {
            ctx,
            table_name: table_name.to_string(),
        }
    }

    /// Create the table from a column list such as "a INT, b BOOL"
    pub fn create_simple(&mut self, columns: &str) -> &mut Self {
        self.ctx
            .exec(&format!("CREATE TABLE {} ({});", self.table_name, columns));
        self
    }

    pub fn insert_rows(&mut self, records: Vec<Record>) -> &mut Self {
        self.ctx.insert(&self.table_name, records);
        self
    }
}

/// Helper to create a test context with standard setup
pub fn setup_test() -> TestContext {
    TestContext::new()
}

/// Shorthands for record values
pub fn int(i: i64) -> Value {
    Value::Int(i)
}

pub fn boolean(b: bool) -> Value {
    Value::Bool(b)
}

pub const NULL: Value = Value::Null;

/// The query `select x from ({true, false, null})`, as a source for filters
pub const TRI_STATE: &str =
    "(select true as x union all select false as x union all select null as x)";
