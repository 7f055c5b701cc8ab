//! DDL (Data Definition Language) statement parser module
//!
//! Handles parsing of CREATE TABLE statements.

use super::super::{Keyword, Token};
use super::token_helper::TokenHelper;
use crate::error::Result;
use crate::parsing::ast::Statement;
use crate::types::{Column, DataType, TableSpec};

/// Parser trait for DDL statements
pub trait DdlParser: TokenHelper {
    /// Parses a CREATE TABLE statement.
    fn parse_create_table(&mut self) -> Result<Statement> {
        self.expect(Keyword::Create.into())?;
        self.expect(Keyword::Table.into())?;
        let name = self.next_ident()?;

        self.expect(Token::OpenParen)?;
        let mut columns = Vec::new();
        // An empty column list is allowed.
        if !self.next_is(Token::CloseParen) {
            loop {
                columns.push(self.parse_column_decl()?);
                if !self.next_is(Token::Comma) {
                    break;
                }
            }
            self.expect(Token::CloseParen)?;
        }

        Ok(Statement::create_table(name, TableSpec::new(columns)))
    }

    /// Parses a column declaration: a name followed by its type.
    fn parse_column_decl(&mut self) -> Result<Column> {
        let name = self.next_ident()?;
        let datatype = self.parse_column_type()?;
        Ok(Column::new(name, datatype))
    }

    /// Parses a column type.
    fn parse_column_type(&mut self) -> Result<DataType> {
        match self.next_if_map(|token| match token {
            Token::Keyword(Keyword::Int) => Some(DataType::Int),
            Token::Keyword(Keyword::Bool) => Some(DataType::Bool),
            _ => None,
        }) {
            Some(datatype) => Ok(datatype),
            None => self.unexpected("column type INT or BOOL"),
        }
    }
}
