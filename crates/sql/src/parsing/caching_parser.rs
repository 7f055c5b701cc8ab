//! Caching parser for statements
//!
//! This module provides a caching wrapper around the parser that maintains
//! an LRU cache of parsed statements to avoid redundant parsing.

use super::{Parser, Statement};
use crate::error::Result;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Default capacity for the parse cache
const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// A caching wrapper around the parser
pub struct CachingParser {
    /// LRU cache for parsed statements
    cache: LruCache<String, Arc<Statement>>,
}

impl CachingParser {
    /// Create a new caching parser with default capacity
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CACHE_CAPACITY)
    }

    /// Create a new caching parser with specified capacity. A zero capacity
    /// is bumped to one.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cache: LruCache::new(NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN)),
        }
    }

    /// Parse a statement with caching. Failed parses are not cached.
    pub fn parse(&mut self, sql: &str) -> Result<Arc<Statement>> {
        // Normalize for better cache hits (trim whitespace)
        let normalized = normalize_sql(sql);

        if let Some(statement) = self.cache.get(&normalized) {
            tracing::trace!("Parse cache hit for {}", normalized);
            return Ok(statement.clone());
        }

        let statement = Arc::new(Parser::parse(sql)?);
        self.cache.put(normalized, statement.clone());
        Ok(statement)
    }

    /// Number of cached statements
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for CachingParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Normalize statement text for consistent caching
#[inline]
fn normalize_sql(sql: &str) -> String {
    sql.trim().to_string()
}
