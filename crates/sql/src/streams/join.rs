//! Cross join: the Cartesian product of streams.

use crate::types::{Column, Record, Stream, Value};

/// Concatenates records in order. The result's arity is the sum of the input
/// arities.
pub fn cross_join_records<R: AsRef<[Value]>>(records: &[R]) -> Record {
    let arity = records.iter().map(|r| r.as_ref().len()).sum();
    let mut joined = Vec::with_capacity(arity);
    for record in records {
        joined.extend_from_slice(record.as_ref());
    }
    joined
}

/// The name a column takes in a cross join's output: `$<index>.<name>`, with
/// `index` the 0-based position of its stream among the inputs.
pub fn joined_column_name(index: usize, name: &str) -> String {
    format!("${}.{}", index, name)
}

/// Cross joins streams. Records are enumerated by nested iteration with the
/// first stream outermost, so the last stream varies fastest. With no input
/// streams the result is a single empty record under an empty header.
pub fn cross_join_streams(streams: &[Stream]) -> Stream {
    let header: Vec<Column> = streams
        .iter()
        .enumerate()
        .flat_map(|(index, stream)| {
            stream
                .header
                .iter()
                .map(move |column| column.renamed(joined_column_name(index, &column.name)))
        })
        .collect();

    let mut combinations: Vec<Vec<&Record>> = vec![Vec::new()];
    for stream in streams {
        combinations = combinations
            .into_iter()
            .flat_map(|prefix| {
                stream.records.iter().map(move |record| {
                    let mut combination = prefix.clone();
                    combination.push(record);
                    combination
                })
            })
            .collect();
    }

    let records = combinations
        .iter()
        .map(|combination| cross_join_records(combination))
        .collect();
    Stream::new(header, records)
}
