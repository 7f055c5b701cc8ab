//! Statement interpreter
//!
//! Binds queries against an [`Environment`], resolves one binding per input
//! row, filters, groups and projects them, and assembles the result stream.
//! Evaluation is synchronous and holds no state between calls.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::binding::BindingContext;
use super::environment::Environment;
use super::expression::{
    FinalizedAggregate, aggregate_function, evaluate, evaluate_with, infer_column, infer_type,
    is_satisfied,
};
use crate::config::EngineConfig;
use crate::error::{Error, Result};
use crate::parsing::ast::{AggregateKind, Direction, Expression, Query, SingleQuery, Statement};
use crate::streams::{Aggregator, multiply_streams, sum_streams};
use crate::types::{Column, DataType, PrimaryKey, Record, Stream, Value};

/// One output row: its record, and its sort keys if the query is ordered.
type OutputRow = (Record, Vec<Value>);

/// Executes statements against an environment.
#[derive(Debug, Clone, Default)]
pub struct Interpreter {
    config: EngineConfig,
}

impl Interpreter {
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// Executes a statement. CREATE TABLE registers the table and returns an
    /// empty acknowledgement stream.
    pub fn execute(&self, env: &mut dyn Environment, statement: &Statement) -> Result<Stream> {
        match statement {
            Statement::CreateTable { name, spec } => {
                spec.validate()?;
                env.register_table(name, spec.clone())?;
                tracing::debug!("Registered table {} with {} columns", name, spec.columns.len());
                Ok(Stream::empty())
            }
            Statement::Query(query) => self.evaluate_query(&*env, query),
        }
    }

    /// Evaluates a query to a stream.
    pub fn evaluate_query(&self, env: &dyn Environment, query: &Query) -> Result<Stream> {
        match query {
            Query::Single(query) => self.evaluate_single(env, query),
            Query::Sum { op, queries } => {
                let streams = queries
                    .iter()
                    .map(|query| self.evaluate_query(env, query))
                    .collect::<Result<Vec<_>>>()?;
                sum_streams(*op, streams)
            }
            Query::Product { op, queries } => {
                let streams = queries
                    .iter()
                    .map(|query| self.evaluate_query(env, query))
                    .collect::<Result<Vec<_>>>()?;
                Ok(multiply_streams(*op, &streams))
            }
            Query::Table(name) => {
                let stream = env.lookup_table(name)?;
                if self.config.validate_sources {
                    stream.validate()?;
                }
                tracing::trace!("Looked up table {} with {} rows", name, stream.len());
                Ok(stream)
            }
        }
    }

    /// Resolves a query's source into its header and one binding per input
    /// row. Without a source there is exactly one empty binding.
    pub fn resolve_query_bindings(
        &self,
        env: &dyn Environment,
        source: Option<&Query>,
    ) -> Result<(Vec<Column>, Vec<BindingContext>)> {
        let Some(source) = source else {
            return Ok((Vec::new(), vec![BindingContext::new()]));
        };
        let stream = self.evaluate_query(env, source)?;
        let bindings = stream
            .records
            .iter()
            .map(|record| BindingContext::from_record(&stream.header, record))
            .collect();
        Ok((stream.header, bindings))
    }

    fn evaluate_single(&self, env: &dyn Environment, query: &SingleQuery) -> Result<Stream> {
        let (source, bindings) = self.resolve_query_bindings(env, query.source.as_ref())?;

        let strict = self.config.static_type_check;
        let header = query
            .project
            .iter()
            .map(|expr| infer_column(expr, &source, strict))
            .collect::<Result<Vec<_>>>()?;
        if strict {
            self.check_clauses(query, &source)?;
        }

        let bindings = match &query.r#where {
            Some(predicate) => filter(bindings, predicate)?,
            None => bindings,
        };

        let grouped = query.group_by.is_some()
            || query.project.iter().any(Expression::contains_aggregate);
        let mut rows = if grouped {
            self.project_groups(query, &source, &header, bindings)?
        } else {
            bindings
                .iter()
                .map(|binding| project_row(query, &header, binding, &[]))
                .collect::<Result<Vec<_>>>()?
        };

        if let Some(order_by) = &query.order_by {
            let directions: Vec<Direction> = order_by.iter().map(|(_, d)| *d).collect();
            // sort_by is stable, so ties keep their prior order.
            rows.sort_by(|(_, a), (_, b)| compare_keys(a, b, &directions));
        }

        let records: Vec<Record> = rows.into_iter().map(|(record, _)| record).collect();
        tracing::debug!("Query produced {} rows", records.len());
        Ok(Stream::new(header, records))
    }

    /// Folds the bindings into groups and projects one row per group. Without
    /// GROUP BY the rows form one implicit group, even when there are none.
    fn project_groups(
        &self,
        query: &SingleQuery,
        source: &[Column],
        header: &[Column],
        bindings: Vec<BindingContext>,
    ) -> Result<Vec<OutputRow>> {
        let mut calls: Vec<(AggregateKind, &Expression)> = Vec::new();
        for expr in &query.project {
            expr.collect_aggregates(&mut calls);
        }
        for (expr, _) in query.order_by.iter().flatten() {
            expr.collect_aggregates(&mut calls);
        }
        let functions = calls
            .iter()
            .map(|(kind, _)| aggregate_function(*kind))
            .collect::<Result<Vec<_>>>()?;

        let group_by = query.group_by.as_deref().unwrap_or_default();
        let mut aggregator = Aggregator::new(functions);
        let mut first_bindings: BTreeMap<PrimaryKey, BindingContext> = BTreeMap::new();
        for binding in bindings {
            let key = group_by
                .iter()
                .map(|expr| evaluate(expr, &binding))
                .collect::<Result<PrimaryKey>>()?;
            let arguments = calls
                .iter()
                .map(|(_, argument)| evaluate(argument, &binding))
                .collect::<Result<Vec<_>>>()?;
            aggregator.add(key.clone(), &arguments)?;
            first_bindings.entry(key).or_insert(binding);
        }
        tracing::trace!("Folded rows into {} groups", aggregator.group_count());

        let summary = if query.group_by.is_some() {
            aggregator.finalize()
        } else {
            aggregator.finalize_implicit()
        };

        summary
            .into_iter()
            .map(|(key, values)| {
                // The implicit group of an empty input has no rows to read
                // from; its plain columns read as NULL.
                let binding = first_bindings
                    .remove(&key)
                    .unwrap_or_else(|| BindingContext::nulls(source));
                let finalized: Vec<FinalizedAggregate<'_>> = calls
                    .iter()
                    .zip(values)
                    .map(|((kind, argument), value)| (*kind, *argument, value))
                    .collect();
                project_row(query, header, &binding, &finalized)
            })
            .collect()
    }

    /// Type-checks the non-projected clauses.
    fn check_clauses(&self, query: &SingleQuery, source: &[Column]) -> Result<()> {
        if let Some(predicate) = &query.r#where {
            let datatype = infer_type(predicate, source, true)?;
            if !datatype.is_compatible(&DataType::Bool) {
                return Err(Error::TypeMismatch {
                    expected: "BOOL WHERE predicate".into(),
                    found: datatype.to_string(),
                });
            }
        }
        for expr in query.group_by.iter().flatten() {
            infer_type(expr, source, true)?;
        }
        for (expr, _) in query.order_by.iter().flatten() {
            infer_type(expr, source, true)?;
        }
        Ok(())
    }
}

/// Keeps the bindings for which the predicate is true.
fn filter(bindings: Vec<BindingContext>, predicate: &Expression) -> Result<Vec<BindingContext>> {
    let mut kept = Vec::with_capacity(bindings.len());
    for binding in bindings {
        if is_satisfied(&evaluate(predicate, &binding)?, "WHERE predicate")? {
            kept.push(binding);
        }
    }
    Ok(kept)
}

/// Projects one output row, and computes its sort keys if ordered. Sort keys
/// see the row's bindings plus the projection's output aliases.
fn project_row(
    query: &SingleQuery,
    header: &[Column],
    binding: &BindingContext,
    aggregates: &[FinalizedAggregate<'_>],
) -> Result<OutputRow> {
    let record = query
        .project
        .iter()
        .map(|expr| evaluate_with(expr, binding, aggregates))
        .collect::<Result<Record>>()?;

    let Some(order_by) = &query.order_by else {
        return Ok((record, Vec::new()));
    };
    let mut scope = binding.clone();
    for ((expr, column), value) in query.project.iter().zip(header).zip(&record) {
        if let Expression::Rename(_, _) = expr {
            scope.bind(column.name.clone(), value.clone());
        }
    }
    let keys = order_by
        .iter()
        .map(|(expr, _)| evaluate_with(expr, &scope, aggregates))
        .collect::<Result<Vec<_>>>()?;
    Ok((record, keys))
}

/// Compares sort keys in priority order, honoring each key's direction.
fn compare_keys(a: &[Value], b: &[Value], directions: &[Direction]) -> Ordering {
    for ((a, b), direction) in a.iter().zip(b).zip(directions) {
        let ordering = match direction {
            Direction::Ascending => a.cmp(b),
            Direction::Descending => b.cmp(a),
        };
        if ordering != Ordering::Equal {
            return ordering;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::execution::environment::{EmptyEnvironment, MemoryCatalog};
    use crate::parsing::parse_sql;
    use crate::types::TableSpec;

    fn run(env: &mut dyn Environment, sql: &str) -> Result<Stream> {
        let statement = parse_sql(sql)?;
        Interpreter::new(EngineConfig::for_testing()).execute(env, &statement)
    }

    #[test]
    fn test_select_bool_literal() {
        for b in [true, false] {
            let stream = run(&mut EmptyEnvironment, &format!("select {};", b)).unwrap();
            assert_eq!(stream.header, vec![Column::new("literal", DataType::Bool)]);
            assert_eq!(stream.records, vec![vec![Value::Bool(b)]]);
        }
    }

    #[test]
    fn test_create_table_acknowledges_with_empty_stream() {
        let mut catalog = MemoryCatalog::new();
        let stream = run(&mut catalog, "create table t (a int, b bool);").unwrap();
        assert_eq!(stream, Stream::empty());
        assert_eq!(
            catalog.lookup_table("t").unwrap().header,
            TableSpec::new(vec![
                Column::new("a", DataType::Int),
                Column::new("b", DataType::Bool)
            ])
            .columns
        );
    }

    #[test]
    fn test_create_table_rejects_duplicate_columns() {
        let mut catalog = MemoryCatalog::new();
        assert!(matches!(
            run(&mut catalog, "create table t (a int, a bool);"),
            Err(Error::InvalidValue(_))
        ));
        assert!(catalog.table_names().is_empty());
    }

    #[test]
    fn test_resolve_bindings_without_source() {
        let interpreter = Interpreter::default();
        let (header, bindings) = interpreter
            .resolve_query_bindings(&EmptyEnvironment, None)
            .unwrap();
        assert!(header.is_empty());
        assert_eq!(bindings, vec![BindingContext::new()]);
    }

    #[test]
    fn test_compare_keys() {
        let asc = [Direction::Ascending, Direction::Descending];
        let a = [Value::Int(1), Value::Int(5)];
        let b = [Value::Int(1), Value::Int(7)];
        assert_eq!(compare_keys(&a, &b, &asc), Ordering::Greater);
        assert_eq!(compare_keys(&a, &a, &asc), Ordering::Equal);
        assert_eq!(
            compare_keys(&[Value::Null], &[Value::Int(1)], &[Direction::Ascending]),
            Ordering::Greater
        );
    }

    #[test]
    fn test_static_type_check() {
        let statement = parse_sql("select 1 + true from (select 1 as x) where false;").unwrap();
        let strict = Interpreter::new(EngineConfig::for_testing());
        assert!(matches!(
            strict.execute(&mut EmptyEnvironment, &statement),
            Err(Error::TypeMismatch { .. })
        ));

        // No row reaches the operator, so the dynamic check never fires.
        let lenient = Interpreter::new(EngineConfig::default());
        let stream = lenient
            .execute(&mut EmptyEnvironment, &statement)
            .unwrap();
        assert!(stream.is_empty());
        assert_eq!(stream.header, vec![Column::new("expression", DataType::Int)]);
    }
}
