//! Query execution
//!
//! This module contains the interpreter that evaluates statement ASTs against
//! an [`Environment`], along with per-row bindings and expression evaluation.
//!
//! Note: evaluation is eager. Every intermediate stream is materialized
//! before the next operator reads it.

mod binding;
mod environment;
pub mod expression;
mod interpreter;

pub use binding::BindingContext;
pub use environment::{EmptyEnvironment, Environment, MemoryCatalog};
pub use interpreter::Interpreter;

use crate::error::Result;
use crate::parsing::ast::{Query, Statement};
use crate::types::Stream;

/// Executes a statement with the default configuration.
pub fn execute(env: &mut dyn Environment, statement: &Statement) -> Result<Stream> {
    Interpreter::default().execute(env, statement)
}

/// Evaluates a query with the default configuration.
pub fn evaluate_query(env: &dyn Environment, query: &Query) -> Result<Stream> {
    Interpreter::default().evaluate_query(env, query)
}
