//! Queries: single SELECTs, set sums, and cross products

use super::common::{Direction, ProductOperator, SumOperator};
use super::expressions::Expression;

/// A query producing a stream.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Query {
    /// SELECT ... [FROM ...] [WHERE ...] [GROUP BY ...] [ORDER BY ...]
    Single(Box<SingleQuery>),
    /// Queries of identical shape combined by a set operator (UNION ALL).
    Sum {
        op: SumOperator,
        queries: Vec<Query>,
    },
    /// Queries combined side by side (a comma-separated FROM list).
    Product {
        op: ProductOperator,
        queries: Vec<Query>,
    },
    /// A table named in a FROM clause, resolved through the environment.
    Table(String),
}

/// A single SELECT. Absent clauses are None, so "no WHERE" stays distinct
/// from "WHERE true" and "no GROUP BY" from an empty grouping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SingleQuery {
    /// Expressions to project, each optionally wrapped in a Rename.
    pub project: Vec<Expression>,
    /// FROM: the query to read rows from.
    pub source: Option<Query>,
    /// WHERE: optional condition to filter rows.
    pub r#where: Option<Expression>,
    /// GROUP BY: expressions to group and aggregate by.
    pub group_by: Option<Vec<Expression>>,
    /// ORDER BY: expressions to sort by, with direction.
    pub order_by: Option<Vec<(Expression, Direction)>>,
}

impl SingleQuery {
    /// A bare projection without any clauses.
    pub fn projection(project: Vec<Expression>) -> Self {
        Self {
            project,
            source: None,
            r#where: None,
            group_by: None,
            order_by: None,
        }
    }
}

impl From<SingleQuery> for Query {
    fn from(query: SingleQuery) -> Self {
        Query::Single(Box::new(query))
    }
}

impl Query {
    /// Wraps one or more queries in a union. A single query is returned as is.
    pub fn union_all(mut queries: Vec<Query>) -> Query {
        if queries.len() == 1 {
            if let Some(query) = queries.pop() {
                return query;
            }
        }
        Query::Sum {
            op: SumOperator::UnionAll,
            queries,
        }
    }

    /// Wraps one or more queries in a cross join. A single query is returned
    /// as is.
    pub fn cross_join(mut queries: Vec<Query>) -> Query {
        if queries.len() == 1 {
            if let Some(query) = queries.pop() {
                return query;
            }
        }
        Query::Product {
            op: ProductOperator::CrossJoin,
            queries,
        }
    }
}
