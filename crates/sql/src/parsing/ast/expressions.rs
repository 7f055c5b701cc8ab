//! Expressions and operators

/// Expressions, e.g. `x + 7 > y`. Can be nested.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Expression {
    /// A literal value.
    Literal(Literal),
    /// An expression given an output name (`expr AS name`). Only affects the
    /// result header, never the value.
    Rename(Box<Expression>, String),
    /// A reference to a bound name.
    Variable(String),
    /// A prefix operator applied to an operand.
    Unary(UnaryOperator, Box<Expression>),
    /// An infix operator applied to two operands.
    Binary(BinaryOperator, Box<Expression>, Box<Expression>),
    /// CASE WHEN expression
    Case {
        /// WHEN conditions and their results, tried in order
        branches: Vec<(Expression, Expression)>,
        /// Optional ELSE result
        else_branch: Option<Box<Expression>>,
    },
    /// An aggregate function folded over the rows of a group.
    Aggregate(AggregateKind, Box<Expression>),
}

/// Expression literal values.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Literal {
    Bool(bool),
    Integer(i64),
    Null,
}

/// Prefix operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum UnaryOperator {
    Not, // NOT a
}

/// Infix operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BinaryOperator {
    Multiply,           // a * b
    Divide,             // a / b
    Add,                // a + b
    Subtract,           // a - b
    GreaterThanOrEqual, // a >= b
    GreaterThan,        // a > b
    LessThan,           // a < b
    LessThanOrEqual,    // a <= b
    Equal,              // a = b
    NotEqual,           // a <> b
}

/// The built-in aggregate functions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AggregateKind {
    BoolOr,
    Sum,
}

impl AggregateKind {
    /// Resolves a function name as written in a call expression.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "bool_or" => Some(Self::BoolOr),
            "sum" => Some(Self::Sum),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::BoolOr => "bool_or",
            Self::Sum => "sum",
        }
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

impl Expression {
    /// Builds a binary operator expression.
    pub fn binary(op: BinaryOperator, lhs: Expression, rhs: Expression) -> Self {
        Expression::Binary(op, Box::new(lhs), Box::new(rhs))
    }

    /// Builds a variable reference.
    pub fn variable(name: impl Into<String>) -> Self {
        Expression::Variable(name.into())
    }

    /// Walks the expression tree depth-first, calling a closure for every node.
    /// Halts and returns false if the closure returns false.
    pub fn walk(&self, visitor: &mut impl FnMut(&Expression) -> bool) -> bool {
        if !visitor(self) {
            return false;
        }

        match self {
            Self::Literal(_) | Self::Variable(_) => true,
            Self::Rename(expr, _) | Self::Unary(_, expr) | Self::Aggregate(_, expr) => {
                expr.walk(visitor)
            }
            Self::Binary(_, lhs, rhs) => lhs.walk(visitor) && rhs.walk(visitor),
            Self::Case {
                branches,
                else_branch,
            } => {
                for (condition, result) in branches {
                    if !condition.walk(visitor) || !result.walk(visitor) {
                        return false;
                    }
                }
                match else_branch {
                    Some(expr) => expr.walk(visitor),
                    None => true,
                }
            }
        }
    }

    /// Returns whether the expression contains an aggregate function anywhere.
    pub fn contains_aggregate(&self) -> bool {
        !self.walk(&mut |expr| !matches!(expr, Self::Aggregate(_, _)))
    }

    /// Collects every outermost aggregate call as its function and argument,
    /// in depth-first order, without duplicates. Arguments are not searched.
    pub fn collect_aggregates<'a>(&'a self, into: &mut Vec<(AggregateKind, &'a Expression)>) {
        match self {
            Self::Literal(_) | Self::Variable(_) => {}
            Self::Aggregate(kind, argument) => {
                let call = (*kind, argument.as_ref());
                if !into.contains(&call) {
                    into.push(call);
                }
            }
            Self::Rename(expr, _) | Self::Unary(_, expr) => expr.collect_aggregates(into),
            Self::Binary(_, lhs, rhs) => {
                lhs.collect_aggregates(into);
                rhs.collect_aggregates(into);
            }
            Self::Case {
                branches,
                else_branch,
            } => {
                for (condition, result) in branches {
                    condition.collect_aggregates(into);
                    result.collect_aggregates(into);
                }
                if let Some(expr) = else_branch {
                    expr.collect_aggregates(into);
                }
            }
        }
    }
}
