//! Expression parser module
//!
//! Handles parsing of expressions: operators, literals, variables, aggregate
//! function calls and CASE.

use std::ops::Add;

use super::super::{Keyword, Token};
use super::token_helper::TokenHelper;
use crate::error::{Error, Position, Result};
use crate::parsing::ast::{AggregateKind, BinaryOperator, Expression, Literal, UnaryOperator};

/// Operator precedence.
pub type Precedence = u8;

/// Operator associativity.
pub enum Associativity {
    Left,
    Right,
}

impl Add<Associativity> for Precedence {
    type Output = Self;

    fn add(self, rhs: Associativity) -> Self {
        // Left-associative operators have increased precedence, so they bind
        // tighter to their left-hand side.
        self + match rhs {
            Associativity::Left => 1,
            Associativity::Right => 0,
        }
    }
}

/// Prefix operators.
pub enum PrefixOperator {
    Not, // NOT a
}

impl PrefixOperator {
    /// The operator precedence.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Not => 4,
        }
    }

    // The operator associativity. Prefix operators are right-associative by
    // definition.
    pub fn associativity(&self) -> Associativity {
        Associativity::Right
    }

    /// Builds an AST expression for the operator.
    pub fn into_expression(self, rhs: Expression) -> Expression {
        match self {
            Self::Not => Expression::Unary(UnaryOperator::Not, Box::new(rhs)),
        }
    }
}

/// Infix operators.
pub enum InfixOperator {
    Add,                // a + b
    Divide,             // a / b
    Equal,              // a = b
    GreaterThan,        // a > b
    GreaterThanOrEqual, // a >= b
    LessThan,           // a < b
    LessThanOrEqual,    // a <= b
    Multiply,           // a * b
    NotEqual,           // a <> b
    Subtract,           // a - b
}

impl InfixOperator {
    /// The operator precedence. All comparisons share the lowest level.
    pub fn precedence(&self) -> Precedence {
        match self {
            Self::Equal
            | Self::NotEqual
            | Self::GreaterThan
            | Self::GreaterThanOrEqual
            | Self::LessThan
            | Self::LessThanOrEqual => 1,
            Self::Add | Self::Subtract => 2,
            Self::Multiply | Self::Divide => 3,
        }
    }

    /// The operator associativity.
    pub fn associativity(&self) -> Associativity {
        Associativity::Left
    }

    /// Builds an AST expression for the infix operator.
    pub fn into_expression(self, lhs: Expression, rhs: Expression) -> Expression {
        let op = match self {
            Self::Add => BinaryOperator::Add,
            Self::Divide => BinaryOperator::Divide,
            Self::Equal => BinaryOperator::Equal,
            Self::GreaterThan => BinaryOperator::GreaterThan,
            Self::GreaterThanOrEqual => BinaryOperator::GreaterThanOrEqual,
            Self::LessThan => BinaryOperator::LessThan,
            Self::LessThanOrEqual => BinaryOperator::LessThanOrEqual,
            Self::Multiply => BinaryOperator::Multiply,
            Self::NotEqual => BinaryOperator::NotEqual,
            Self::Subtract => BinaryOperator::Subtract,
        };
        Expression::binary(op, lhs, rhs)
    }
}

/// Parser trait for expressions
pub trait ExpressionParser: TokenHelper {
    /// Parses an expression.
    fn parse_expression(&mut self) -> Result<Expression> {
        self.parse_expression_at(0)
    }

    /// Parses an expression at the given minimum precedence, using precedence
    /// climbing. Each call is one nesting level.
    fn parse_expression_at(&mut self, min_precedence: Precedence) -> Result<Expression> {
        self.enter_nested()?;
        let expr = self.parse_climbing(min_precedence);
        self.leave_nested();
        expr
    }

    /// The precedence climbing loop of parse_expression_at.
    fn parse_climbing(&mut self, min_precedence: Precedence) -> Result<Expression> {
        // If the left-hand side is a prefix operator, recursively parse it and
        // its operand. Otherwise, parse the left-hand side as an atom.
        let mut lhs = if let Some(prefix) = self.parse_prefix_operator_at(min_precedence) {
            let next_precedence = prefix.precedence() + prefix.associativity();
            let rhs = self.parse_expression_at(next_precedence)?;
            prefix.into_expression(rhs)
        } else {
            self.parse_expression_atom()?
        };

        // Repeatedly apply any infix operators to the left-hand side as long as
        // their precedence is greater than or equal to the current minimum
        // precedence (i.e. that of the upstack operator).
        while let Some(infix) = self.parse_infix_operator_at(min_precedence) {
            let next_precedence = infix.precedence() + infix.associativity();
            let rhs = self.parse_expression_at(next_precedence)?;
            lhs = infix.into_expression(lhs, rhs);
        }

        Ok(lhs)
    }

    /// Parses an expression atom. This is either:
    ///
    /// * A literal value.
    /// * A CASE expression.
    /// * An aggregate function call.
    /// * A variable.
    /// * A parenthesized expression.
    fn parse_expression_atom(&mut self) -> Result<Expression> {
        let (position, token) = self.next_for("expression")?;
        Ok(match token {
            Token::Number(n) => match n.parse::<i64>() {
                Ok(value) => Literal::Integer(value).into(),
                Err(_) => {
                    return Err(Error::Parse {
                        position,
                        expected: "integer within 64-bit range".into(),
                        found: n,
                    });
                }
            },
            Token::Keyword(Keyword::True) => Literal::Bool(true).into(),
            Token::Keyword(Keyword::False) => Literal::Bool(false).into(),
            Token::Keyword(Keyword::Null) => Literal::Null.into(),
            Token::Keyword(Keyword::Case) => self.parse_case()?,

            // Function call or variable.
            Token::Ident(name) => {
                if self.next_is(Token::OpenParen) {
                    self.parse_function_call(position, name)?
                } else {
                    Expression::Variable(name)
                }
            }

            // Parenthesized expression.
            Token::OpenParen => {
                let expr = self.parse_expression()?;
                self.expect(Token::CloseParen)?;
                expr
            }

            token => {
                return Err(Error::Parse {
                    position,
                    expected: "expression".into(),
                    found: token.to_string(),
                });
            }
        })
    }

    /// Parses the argument of a function call, after the opening parenthesis.
    /// Only the aggregate functions are known; any other name is rejected
    /// at the position of the name.
    fn parse_function_call(&mut self, position: Position, name: String) -> Result<Expression> {
        let Some(kind) = AggregateKind::from_name(&name) else {
            return Err(Error::UnknownFunction { position, name });
        };
        let argument = self.parse_expression()?;
        self.expect(Token::CloseParen)?;
        Ok(Expression::Aggregate(kind, Box::new(argument)))
    }

    /// Parses a CASE expression, after the CASE keyword.
    fn parse_case(&mut self) -> Result<Expression> {
        let mut branches = Vec::new();
        while self.next_is(Keyword::When.into()) {
            let condition = self.parse_expression()?;
            self.expect(Keyword::Then.into())?;
            branches.push((condition, self.parse_expression()?));
        }

        let else_branch = if self.next_is(Keyword::Else.into()) {
            Some(Box::new(self.parse_expression()?))
        } else {
            None
        };

        self.expect(Keyword::End.into())?;
        Ok(Expression::Case {
            branches,
            else_branch,
        })
    }

    /// Parses a prefix operator, if there is one and its precedence is at
    /// least min_precedence.
    fn parse_prefix_operator_at(&mut self, min_precedence: Precedence) -> Option<PrefixOperator> {
        self.next_if_map(|token| {
            let operator = match token {
                Token::Keyword(Keyword::Not) => PrefixOperator::Not,
                _ => return None,
            };
            Some(operator).filter(|op| op.precedence() >= min_precedence)
        })
    }

    /// Parses an infix operator, if there is one and its precedence is at least
    /// min_precedence.
    fn parse_infix_operator_at(&mut self, min_precedence: Precedence) -> Option<InfixOperator> {
        self.next_if_map(|token| {
            let operator = match token {
                Token::Asterisk => InfixOperator::Multiply,
                Token::Equal => InfixOperator::Equal,
                Token::GreaterThan => InfixOperator::GreaterThan,
                Token::GreaterThanOrEqual => InfixOperator::GreaterThanOrEqual,
                Token::LessThan => InfixOperator::LessThan,
                Token::LessThanOrEqual => InfixOperator::LessThanOrEqual,
                Token::Minus => InfixOperator::Subtract,
                Token::NotEqual => InfixOperator::NotEqual,
                Token::Plus => InfixOperator::Add,
                Token::Slash => InfixOperator::Divide,
                _ => return None,
            };
            Some(operator).filter(|op| op.precedence() >= min_precedence)
        })
    }
}
