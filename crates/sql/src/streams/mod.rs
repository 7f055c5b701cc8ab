//! Relational algebra over streams: set sums, products and aggregation.

mod aggregator;
mod join;
mod union;

pub use aggregator::{Aggregator, summarize_stream};
pub use join::{cross_join_records, cross_join_streams, joined_column_name};
pub use union::sum_streams;

use crate::parsing::ast::ProductOperator;
use crate::types::Stream;

/// Combines streams side by side.
pub fn multiply_streams(op: ProductOperator, streams: &[Stream]) -> Stream {
    match op {
        ProductOperator::CrossJoin => cross_join_streams(streams),
    }
}
