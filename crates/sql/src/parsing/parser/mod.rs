//! Modular statement parser implementation
//!
//! The parser is split into several modules:
//! - expr_parser: Expression parsing with operator precedence
//! - query_parser: SELECT, UNION ALL and FROM parsing
//! - ddl_parser: CREATE TABLE parsing
//! - token_helper: Base trait for token navigation

pub mod ddl_parser;
pub mod expr_parser;
pub mod query_parser;
pub mod token_helper;

use std::iter::Peekable;

use self::ddl_parser::DdlParser;
use self::expr_parser::ExpressionParser;
use self::query_parser::QueryParser;
use self::token_helper::TokenHelper;
use super::ast::Statement;
use super::{Keyword, Lexer, Token};
use crate::error::{Position, Result};

/// The parser takes tokens from the lexer and parses the statement syntax
/// into an Abstract Syntax Tree (AST).
///
/// The AST represents the syntactic structure of a statement (e.g. the SELECT
/// and FROM clauses, values, arithmetic expressions, etc.). However, it only
/// ensures the syntax is well-formed, and does not know whether e.g. a given
/// table or variable exists -- that is the job of the interpreter.
pub struct Parser<'a> {
    pub lexer: Peekable<Lexer<'a>>,
    /// Position just past the last character of the input
    end: Position,
    /// Current nesting of expressions and subqueries
    depth: usize,
}

impl Parser<'_> {
    /// Parses the input string into a statement AST. The entire string must
    /// be a single statement terminated by a semicolon. Parsing is atomic:
    /// any failure yields one error and no partial tree.
    pub fn parse(statement: &str) -> Result<Statement> {
        let mut parser = Self::new(statement);
        let statement = parser.parse_statement()?;
        parser.expect(Token::Semicolon)?;
        if parser.peek()?.is_some() {
            return parser.unexpected("end of input");
        }
        Ok(statement)
    }

    /// Creates a new parser for the given string.
    pub fn new(input: &str) -> Parser<'_> {
        let line = input.matches('\n').count() + 1;
        let column = input
            .rsplit('\n')
            .next()
            .map_or(0, |last| last.chars().count())
            + 1;
        Parser {
            lexer: Lexer::new(input).peekable(),
            end: Position::new(input.len(), line, column),
            depth: 0,
        }
    }

    /// Parses a statement, without the terminating semicolon.
    pub fn parse_statement(&mut self) -> Result<Statement> {
        match self.peek()?.cloned() {
            Some(Token::Keyword(Keyword::Create)) => self.parse_create_table(),
            Some(Token::Keyword(Keyword::Select)) => Ok(Statement::Query(self.parse_query()?)),
            _ => self.unexpected("statement"),
        }
    }
}

impl TokenHelper for Parser<'_> {
    fn next_token(&mut self) -> Option<Result<(Position, Token)>> {
        self.lexer.next()
    }

    fn peek(&mut self) -> Result<Option<&Token>> {
        match self.lexer.peek() {
            Some(Ok((_, token))) => Ok(Some(token)),
            Some(Err(err)) => Err(err.clone()),
            None => Ok(None),
        }
    }

    fn position(&mut self) -> Position {
        match self.lexer.peek() {
            Some(Ok((position, _))) => *position,
            Some(Err(err)) => err.position().unwrap_or(self.end),
            None => self.end,
        }
    }

    fn depth_mut(&mut self) -> &mut usize {
        &mut self.depth
    }
}

impl ExpressionParser for Parser<'_> {}

impl QueryParser for Parser<'_> {}

impl DdlParser for Parser<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parsing::ast::{
        AggregateKind, BinaryOperator, Direction, Expression, Literal, Query, SingleQuery,
        UnaryOperator,
    };
    use crate::types::{Column, DataType, TableSpec};
    use super::token_helper::MAX_NESTING_DEPTH;

    fn parse_query(sql: &str) -> Query {
        match Parser::parse(sql) {
            Ok(Statement::Query(query)) => query,
            other => panic!("expected query, got {:?}", other),
        }
    }

    fn single(sql: &str) -> SingleQuery {
        match parse_query(sql) {
            Query::Single(query) => *query,
            other => panic!("expected single query, got {:?}", other),
        }
    }

    fn var(name: &str) -> Expression {
        Expression::variable(name)
    }

    fn int(value: i64) -> Expression {
        Literal::Integer(value).into()
    }

    #[test]
    fn test_select_literal() {
        for b in [true, false] {
            let sql = format!("select {};", b);
            assert_eq!(
                parse_query(&sql),
                SingleQuery::projection(vec![Literal::Bool(b).into()]).into()
            );
        }
    }

    #[test]
    fn test_absent_clauses_are_none() {
        let query = single("select x from (select true as x);");
        assert!(query.source.is_some());
        assert_eq!(query.r#where, None);
        assert_eq!(query.group_by, None);
        assert_eq!(query.order_by, None);
    }

    #[test]
    fn test_rename() {
        let query = single("select true as flag, 1 as one;");
        assert_eq!(
            query.project,
            vec![
                Expression::Rename(Box::new(Literal::Bool(true).into()), "flag".into()),
                Expression::Rename(Box::new(int(1)), "one".into()),
            ]
        );
    }

    #[test]
    fn test_precedence() {
        // 1 + 2 * 3 = 7
        let query = single("select 1 + 2 * 3 = 7;");
        let expected = Expression::binary(
            BinaryOperator::Equal,
            Expression::binary(
                BinaryOperator::Add,
                int(1),
                Expression::binary(BinaryOperator::Multiply, int(2), int(3)),
            ),
            int(7),
        );
        assert_eq!(query.project, vec![expected]);
    }

    #[test]
    fn test_left_associativity() {
        let query = single("select 8 - 4 - 2;");
        let expected = Expression::binary(
            BinaryOperator::Subtract,
            Expression::binary(BinaryOperator::Subtract, int(8), int(4)),
            int(2),
        );
        assert_eq!(query.project, vec![expected]);
    }

    #[test]
    fn test_not_binds_tightest() {
        let query = single("select not x = y;");
        let expected = Expression::binary(
            BinaryOperator::Equal,
            Expression::Unary(UnaryOperator::Not, Box::new(var("x"))),
            var("y"),
        );
        assert_eq!(query.project, vec![expected]);

        let query = single("select not (x = y);");
        let expected = Expression::Unary(
            UnaryOperator::Not,
            Box::new(Expression::binary(BinaryOperator::Equal, var("x"), var("y"))),
        );
        assert_eq!(query.project, vec![expected]);
    }

    #[test]
    fn test_case() {
        let query = single("select case when x then 1 when y then 2 else 3 end;");
        assert_eq!(
            query.project,
            vec![Expression::Case {
                branches: vec![(var("x"), int(1)), (var("y"), int(2))],
                else_branch: Some(Box::new(int(3))),
            }]
        );

        let query = single("select case end;");
        assert_eq!(
            query.project,
            vec![Expression::Case {
                branches: vec![],
                else_branch: None,
            }]
        );
    }

    #[test]
    fn test_aggregate_call() {
        let query = single("select BOOL_OR(x), sum(y + 1);");
        assert_eq!(
            query.project,
            vec![
                Expression::Aggregate(AggregateKind::BoolOr, Box::new(var("x"))),
                Expression::Aggregate(
                    AggregateKind::Sum,
                    Box::new(Expression::binary(BinaryOperator::Add, var("y"), int(1)))
                ),
            ]
        );
    }

    #[test]
    fn test_unknown_function() {
        let err = Parser::parse("select count(x);").unwrap_err();
        assert_eq!(
            err,
            Error::UnknownFunction {
                position: Position::new(7, 1, 8),
                name: "count".into(),
            }
        );
        assert_eq!(
            err.to_string(),
            "Parse error at line 1, column 8: Unknown function count"
        );
    }

    #[test]
    fn test_union_all() {
        let query = parse_query("select true union all select false union all select null;");
        assert_eq!(
            query,
            Query::union_all(vec![
                SingleQuery::projection(vec![Literal::Bool(true).into()]).into(),
                SingleQuery::projection(vec![Literal::Bool(false).into()]).into(),
                SingleQuery::projection(vec![Literal::Null.into()]).into(),
            ])
        );
    }

    #[test]
    fn test_from_product_and_table() {
        let query = single("select $0.x, $1.y from (select true as x), t;");
        assert_eq!(query.project, vec![var("$0.x"), var("$1.y")]);
        assert_eq!(
            query.source,
            Some(Query::cross_join(vec![
                SingleQuery::projection(vec![Expression::Rename(
                    Box::new(Literal::Bool(true).into()),
                    "x".into()
                )])
                .into(),
                Query::Table("t".into()),
            ]))
        );
    }

    #[test]
    fn test_where_group_order() {
        let query = single(
            "select k, sum(v) from t where v > 0 group by k order by k desc, v, k ascending;",
        );
        assert_eq!(
            query.r#where,
            Some(Expression::binary(BinaryOperator::GreaterThan, var("v"), int(0)))
        );
        assert_eq!(query.group_by, Some(vec![var("k")]));
        assert_eq!(
            query.order_by,
            Some(vec![
                (var("k"), Direction::Descending),
                (var("v"), Direction::Ascending),
                (var("k"), Direction::Ascending),
            ])
        );
    }

    #[test]
    fn test_create_table() {
        assert_eq!(
            Parser::parse("CREATE TABLE t (a int, b BOOL);").unwrap(),
            Statement::create_table(
                "t",
                TableSpec::new(vec![
                    Column::new("a", DataType::Int),
                    Column::new("b", DataType::Bool),
                ])
            )
        );
        assert_eq!(
            Parser::parse("create table empty ();").unwrap(),
            Statement::create_table("empty", TableSpec::default())
        );
    }

    #[test]
    fn test_missing_semicolon() {
        let err = Parser::parse("select true").unwrap_err();
        assert_eq!(
            err,
            Error::Parse {
                position: Position::new(11, 1, 12),
                expected: ";".into(),
                found: "end of input".into(),
            }
        );
    }

    #[test]
    fn test_trailing_input() {
        let err = Parser::parse("select true; select false;").unwrap_err();
        assert!(matches!(err, Error::Parse { ref expected, .. } if expected == "end of input"));
    }

    #[test]
    fn test_error_reports_expected_production() {
        let err = Parser::parse("select true from;").unwrap_err();
        assert_eq!(
            err,
            Error::Parse {
                position: Position::new(16, 1, 17),
                expected: "subquery or table name".into(),
                found: ";".into(),
            }
        );

        let err = Parser::parse("select\n  1 +;").unwrap_err();
        assert_eq!(err.position(), Some(Position::new(12, 2, 6)));

        let err = Parser::parse("create table t (a text);").unwrap_err();
        assert!(matches!(err, Error::Parse { ref found, .. } if found == "text"));
    }

    #[test]
    fn test_integer_out_of_range() {
        let err = Parser::parse("select 99999999999999999999;").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    fn assert_too_deep(sql: &str) {
        match Parser::parse(sql) {
            Err(Error::Parse { expected, .. }) => {
                assert_eq!(expected, "expression nesting within limit")
            }
            other => panic!("expected nesting error, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_limit() {
        let n = 10_000;
        assert_too_deep(&format!("select {}1{};", "(".repeat(n), ")".repeat(n)));
        assert_too_deep(&format!("select {}true;", "not ".repeat(n)));
        assert_too_deep(&format!(
            "select {}1{};",
            "case when true then ".repeat(n),
            " end".repeat(n)
        ));
        assert_too_deep(&format!(
            "select 1 from {}t{};",
            "(select 1 from ".repeat(n),
            ")".repeat(n)
        ));
    }

    #[test]
    fn test_nesting_below_limit() {
        let n = MAX_NESTING_DEPTH / 2;
        let sql = format!("select {}1{} as x;", "(".repeat(n), ")".repeat(n));
        assert_eq!(
            single(&sql).project,
            vec![Expression::Rename(Box::new(int(1)), "x".into())]
        );

        // The depth is released after each nested expression.
        let sql = format!("select {};", vec!["(((1)))"; 200].join(" + "));
        assert!(Parser::parse(&sql).is_ok());
    }

    #[test]
    fn test_deterministic() {
        let sql = "select case when x then sum(y) end as s from (select 1 as x, 2 as y) group by x;";
        assert_eq!(Parser::parse(sql), Parser::parse(sql));
    }
}
