//! Grouped aggregation over pending summarizations.

use crate::error::{Error, Result};
use crate::types::{
    AggregateFunction, PendingSummarization, PrimaryKey, Record, Stream, Summarization, Value,
};

/// Folds values into per-group aggregate states, keyed by group key.
///
/// Aggregate `i` folds the `i`-th value of every row added to a group.
/// Groups are kept in key order.
pub struct Aggregator<'a> {
    /// The aggregate functions to compute
    functions: Vec<&'a AggregateFunction>,
    /// Running states for each group key
    groups: PendingSummarization,
}

impl<'a> Aggregator<'a> {
    /// Create a new aggregator
    pub fn new(functions: Vec<&'a AggregateFunction>) -> Self {
        Self {
            functions,
            groups: PendingSummarization::new(),
        }
    }

    /// Folds one row's values into the group identified by `key`.
    pub fn add(&mut self, key: PrimaryKey, values: &[Value]) -> Result<()> {
        if values.len() != self.functions.len() {
            return Err(Error::ArityMismatch {
                expected: self.functions.len(),
                found: values.len(),
            });
        }

        let functions = &self.functions;
        let states = self
            .groups
            .entry(key)
            .or_insert_with(|| functions.iter().map(|f| f.initialize()).collect());

        for ((function, state), value) in functions.iter().zip(states.iter_mut()).zip(values) {
            let current = std::mem::replace(state, Value::Null);
            *state = function.step(value, current)?;
        }
        Ok(())
    }

    /// Number of groups seen so far
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Finalizes every group. No rows means no groups.
    pub fn finalize(self) -> Summarization {
        let functions = self.functions;
        self.groups
            .into_iter()
            .map(|(key, states)| {
                let record = functions
                    .iter()
                    .zip(states)
                    .map(|(function, state)| function.finish(state))
                    .collect();
                (key, record)
            })
            .collect()
    }

    /// Finalizes the rows as a single implicit group under the empty key.
    /// No rows still yields one group holding the initial states.
    pub fn finalize_implicit(mut self) -> Summarization {
        if self.groups.is_empty() {
            let initial = self.functions.iter().map(|f| f.initialize()).collect();
            self.groups.insert(PrimaryKey::new(), initial);
        }
        self.finalize()
    }
}

/// Folds every record of a stream through the aggregates in lockstep,
/// aggregate `i` reading column `i`, and returns the finalized values.
pub fn summarize_stream(stream: &Stream, aggregates: &[&AggregateFunction]) -> Result<Record> {
    let mut aggregator = Aggregator::new(aggregates.to_vec());
    for record in &stream.records {
        let values = record
            .get(..aggregates.len())
            .ok_or(Error::ArityMismatch {
                expected: aggregates.len(),
                found: record.len(),
            })?;
        aggregator.add(PrimaryKey::new(), values)?;
    }
    Ok(aggregator
        .finalize_implicit()
        .into_values()
        .next()
        .unwrap_or_default())
}
