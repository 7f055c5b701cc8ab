//! The engine's data model: schemas, records, streams, and aggregate functions.

pub mod aggregate;
pub mod schema;
pub mod stream;

pub use aggregate::{
    AggregateFunction, AggregateRow, PendingSummarization, PrimaryKey, Summarization,
};
pub use relq_value::{DataType, Value};
pub use schema::{Column, TableSpec};
pub use stream::{Record, Stream};
