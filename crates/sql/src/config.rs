//! Engine configuration

/// Default capacity for the parse cache
const DEFAULT_PARSER_CACHE_CAPACITY: usize = 1000;

/// Query engine configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Number of parsed statements kept in the LRU parse cache
    pub parser_cache_capacity: usize,

    /// Reject operator type mismatches while computing the result header,
    /// before any row is evaluated. When off, mismatches surface only when a
    /// row actually reaches the offending operator.
    pub static_type_check: bool,

    /// Type-check every stream returned by the environment's table lookup
    /// against its own header before binding rows from it.
    pub validate_sources: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            parser_cache_capacity: DEFAULT_PARSER_CACHE_CAPACITY,
            static_type_check: false,
            validate_sources: true,
        }
    }
}

impl EngineConfig {
    /// Create config suited to tests: a tiny parse cache and every check on
    pub fn for_testing() -> Self {
        Self {
            parser_cache_capacity: 16,
            static_type_check: true,
            validate_sources: true,
        }
    }

    pub fn with_parser_cache_capacity(mut self, capacity: usize) -> Self {
        self.parser_cache_capacity = capacity;
        self
    }

    pub fn with_static_type_check(mut self, enabled: bool) -> Self {
        self.static_type_check = enabled;
        self
    }

    pub fn with_validate_sources(mut self, enabled: bool) -> Self {
        self.validate_sources = enabled;
        self
    }
}
