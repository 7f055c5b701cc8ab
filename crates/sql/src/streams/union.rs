//! Set sums of streams.

use crate::error::{Error, Result};
use crate::parsing::ast::SumOperator;
use crate::types::Stream;

/// Combines streams of the same shape. The first stream's header wins. With
/// no input streams the result is the empty stream.
pub fn sum_streams(op: SumOperator, streams: Vec<Stream>) -> Result<Stream> {
    match op {
        SumOperator::UnionAll => union_all(streams),
    }
}

/// Concatenates all records in input order, keeping duplicates. Every input
/// must have the first stream's arity.
fn union_all(streams: Vec<Stream>) -> Result<Stream> {
    let mut streams = streams.into_iter();
    let Some(mut result) = streams.next() else {
        return Ok(Stream::empty());
    };

    for stream in streams {
        if stream.header.len() != result.header.len() {
            return Err(Error::ArityMismatch {
                expected: result.header.len(),
                found: stream.header.len(),
            });
        }
        result.records.extend(stream.records);
    }
    Ok(result)
}
