//! Abstract Syntax Tree (AST) for statements
//!
//! The variant sets are closed: consumers match every variant explicitly, so
//! adding one is a compile error everywhere it needs handling.

pub mod common;
pub mod expressions;
pub mod query;

pub use common::{Direction, ProductOperator, SumOperator};
pub use expressions::{AggregateKind, BinaryOperator, Expression, Literal, UnaryOperator};
pub use query::{Query, SingleQuery};

use crate::types::TableSpec;

/// Statements represented as an Abstract Syntax Tree (AST).
/// The statement is the root node of this tree. Built from raw text by the
/// parser, executed by the interpreter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Statement {
    /// A query producing a stream.
    Query(Query),

    /// CREATE TABLE: declares a table schema.
    CreateTable {
        /// The table name.
        name: String,
        /// The declared columns.
        spec: TableSpec,
    },
}

impl Statement {
    /// Creates a CreateTable statement
    pub fn create_table(name: impl Into<String>, spec: TableSpec) -> Self {
        Statement::CreateTable {
            name: name.into(),
            spec,
        }
    }
}
