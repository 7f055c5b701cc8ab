//! Query engine facade
//!
//! Ties the caching parser to the interpreter over one owned environment.
//! The engine is synchronous and does no locking; callers that share it
//! across threads wrap it themselves.

use std::sync::Arc;

use crate::config::EngineConfig;
use crate::error::Result;
use crate::execution::{Environment, Interpreter, MemoryCatalog};
use crate::parsing::ast::Statement;
use crate::parsing::CachingParser;
use crate::types::Stream;

/// Parses and executes statements against an environment
pub struct Engine<E: Environment> {
    /// Tables visible to queries
    env: E,

    /// Evaluates parsed statements
    interpreter: Interpreter,

    /// Caching parser for statements
    parser: CachingParser,

    config: EngineConfig,
}

impl<E: Environment> Engine<E> {
    /// Create an engine over `env` with the default config
    pub fn new(env: E) -> Self {
        Self::with_config(env, EngineConfig::default())
    }

    pub fn with_config(env: E, config: EngineConfig) -> Self {
        Self {
            env,
            interpreter: Interpreter::new(config.clone()),
            parser: CachingParser::with_capacity(config.parser_cache_capacity),
            config,
        }
    }

    /// Parse (through the cache) and execute one statement
    pub fn execute(&mut self, sql: &str) -> Result<Stream> {
        let statement = self.parse(sql)?;
        self.execute_statement(&statement)
    }

    /// Parse one statement, reusing a cached tree for repeated text
    pub fn parse(&mut self, sql: &str) -> Result<Arc<Statement>> {
        self.parser.parse(sql)
    }

    /// Execute an already parsed statement
    pub fn execute_statement(&mut self, statement: &Statement) -> Result<Stream> {
        match statement {
            Statement::Query(_) => tracing::debug!("Executing query"),
            Statement::CreateTable { name, .. } => tracing::debug!("Executing CREATE TABLE {}", name),
        }
        let result = self.interpreter.execute(&mut self.env, statement);
        if let Err(err) = &result {
            tracing::debug!("Statement failed: {}", err);
        }
        result
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    /// Consume the engine, returning its environment
    pub fn into_env(self) -> E {
        self.env
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Number of statements currently held in the parse cache
    pub fn cached_statements(&self) -> usize {
        self.parser.len()
    }
}

impl Default for Engine<MemoryCatalog> {
    fn default() -> Self {
        Self::new(MemoryCatalog::new())
    }
}
