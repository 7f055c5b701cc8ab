//! Query parser module
//!
//! Handles parsing of SELECT queries, UNION ALL chains and FROM products.
//! Optional clauses are recognized by their leading keyword, which is only
//! consumed once the clause is known to be present.

use super::super::{Keyword, Token};
use super::expr_parser::ExpressionParser;
use crate::error::Result;
use crate::parsing::ast::{Direction, Expression, Query, SingleQuery};

/// Parser trait for queries
pub trait QueryParser: ExpressionParser {
    /// Parses a query: one or more single queries joined by UNION ALL.
    fn parse_query(&mut self) -> Result<Query> {
        let mut queries = vec![self.parse_single_query()?];
        while self.next_is(Keyword::Union.into()) {
            self.expect(Keyword::All.into())?;
            queries.push(self.parse_single_query()?);
        }
        Ok(Query::union_all(queries))
    }

    /// Parses a single SELECT with its optional clauses.
    fn parse_single_query(&mut self) -> Result<Query> {
        Ok(SingleQuery {
            project: self.parse_select_clause()?,
            source: self.parse_from_clause()?,
            r#where: self.parse_where_clause()?,
            group_by: self.parse_group_by_clause()?,
            order_by: self.parse_order_by_clause()?,
        }
        .into())
    }

    /// Parses a SELECT clause.
    fn parse_select_clause(&mut self) -> Result<Vec<Expression>> {
        self.expect(Keyword::Select.into())?;
        let mut project = Vec::new();
        loop {
            let expr = self.parse_expression()?;
            if self.next_is(Keyword::As.into()) {
                project.push(Expression::Rename(Box::new(expr), self.next_ident()?));
            } else {
                project.push(expr);
            }
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(project)
    }

    /// Parses a FROM clause, if present. Several comma-separated items form a
    /// cross join.
    fn parse_from_clause(&mut self) -> Result<Option<Query>> {
        if !self.next_is(Keyword::From.into()) {
            return Ok(None);
        }
        let mut queries = Vec::new();
        loop {
            queries.push(self.parse_subquery()?);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(Some(Query::cross_join(queries)))
    }

    /// Parses one FROM item: a parenthesized query or a table name.
    fn parse_subquery(&mut self) -> Result<Query> {
        if self.next_is(Token::OpenParen) {
            self.enter_nested()?;
            let query = self.parse_query();
            self.leave_nested();
            let query = query?;
            self.expect(Token::CloseParen)?;
            return Ok(query);
        }
        if matches!(self.peek()?, Some(Token::Ident(_))) {
            return Ok(Query::Table(self.next_ident()?));
        }
        self.unexpected("subquery or table name")
    }

    /// Parses a WHERE clause, if present.
    fn parse_where_clause(&mut self) -> Result<Option<Expression>> {
        if !self.next_is(Keyword::Where.into()) {
            return Ok(None);
        }
        Ok(Some(self.parse_expression()?))
    }

    /// Parses a GROUP BY clause, if present.
    fn parse_group_by_clause(&mut self) -> Result<Option<Vec<Expression>>> {
        if !self.next_is(Keyword::Group.into()) {
            return Ok(None);
        }
        self.expect(Keyword::By.into())?;
        let mut group_by = Vec::new();
        loop {
            group_by.push(self.parse_expression()?);
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(Some(group_by))
    }

    /// Parses an ORDER BY clause, if present.
    fn parse_order_by_clause(&mut self) -> Result<Option<Vec<(Expression, Direction)>>> {
        if !self.next_is(Keyword::Order.into()) {
            return Ok(None);
        }
        self.expect(Keyword::By.into())?;
        let mut order_by = Vec::new();
        loop {
            let expr = self.parse_expression()?;
            let direction = self
                .next_if_map(|token| match token {
                    Token::Keyword(Keyword::Asc | Keyword::Ascending) => Some(Direction::Ascending),
                    Token::Keyword(Keyword::Desc | Keyword::Descending) => {
                        Some(Direction::Descending)
                    }
                    _ => None,
                })
                .unwrap_or_default();
            order_by.push((expr, direction));
            if !self.next_is(Token::Comma) {
                break;
            }
        }
        Ok(Some(order_by))
    }
}
