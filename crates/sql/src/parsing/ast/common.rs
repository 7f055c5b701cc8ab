//! Small enums shared across AST modules

/// Sort direction for ORDER BY
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

/// Set operations combining queries of identical shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SumOperator {
    /// Concatenate all records, keeping duplicates
    UnionAll,
}

/// Operations combining queries side by side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProductOperator {
    /// Cartesian product
    CrossJoin,
}
