//! Statement parsing, adapted from toydb's parser
//!
//! This module parses raw statement text into a structured Abstract Syntax
//! Tree (AST). The parser drives its own [`Lexer`]; the standalone
//! [`tokenizer`] covers only the core vocabulary.

pub mod ast;
pub mod caching_parser;
mod lexer;
mod parser;
pub mod tokenizer;

use crate::error::Result;

pub use caching_parser::CachingParser;
pub use lexer::{Keyword, Lexer, Token};
pub use parser::Parser;

pub use ast::Statement;

/// Parse a statement string into an AST
pub fn parse_sql(sql: &str) -> Result<Statement> {
    Parser::parse(sql)
}
