//! A small embeddable relational query engine
//!
//! This crate parses SQL-like statements and evaluates them over in-memory
//! streams of records:
//! - A tokenizer and lexer turn text into tokens with source positions
//! - A recursive-descent parser builds a statement AST
//! - An interpreter binds the AST against a host-supplied environment
//! - A small stream algebra implements union, cross join and aggregation

mod config;
mod engine;
mod error;
pub mod execution;
pub mod operators;
pub mod parsing;
pub mod streams;
pub mod types;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, ErrorKind, Position, Result};
pub use execution::{
    BindingContext, EmptyEnvironment, Environment, Interpreter, MemoryCatalog, evaluate_query,
    execute,
};
pub use parsing::{CachingParser, Parser, Statement, parse_sql};
pub use types::{Column, DataType, Record, Stream, TableSpec, Value};
