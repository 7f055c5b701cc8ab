//! Error types for the query engine

use std::fmt;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// A location in statement text. Lines and columns are 1-based, the offset is
/// a 0-based byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Position {
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(offset: usize, line: usize, column: usize) -> Self {
        Self {
            offset,
            line,
            column,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

/// The two error families. Both abort the statement that raised them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The text did not match the grammar; nothing was executed.
    Parse,
    /// Evaluation failed part way; no partial result is returned.
    Runtime,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    // Lexing and parsing errors
    #[error("Lex error at {position}: unexpected character {found:?}")]
    Lex { position: Position, found: char },

    #[error("Parse error at {position}: expected {expected}, found {found}")]
    Parse {
        position: Position,
        expected: String,
        found: String,
    },

    #[error("Parse error at {position}: Unknown function {name}")]
    UnknownFunction { position: Position, name: String },

    // Catalog errors
    #[error("Table not found: {0}")]
    TableNotFound(String),

    #[error("Table already exists: {0}")]
    DuplicateTable(String),

    #[error("Environment does not support {0}")]
    Unsupported(String),

    // Evaluation errors
    #[error("Unresolved variable: {0}")]
    UnresolvedVariable(String),

    #[error("Type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },

    #[error("Arity mismatch: expected {expected} values, found {found}")]
    ArityMismatch { expected: usize, found: usize },

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl Error {
    /// Which family the error belongs to
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Lex { .. } | Error::Parse { .. } | Error::UnknownFunction { .. } => {
                ErrorKind::Parse
            }
            Error::TableNotFound(_)
            | Error::DuplicateTable(_)
            | Error::Unsupported(_)
            | Error::UnresolvedVariable(_)
            | Error::TypeMismatch { .. }
            | Error::ArityMismatch { .. }
            | Error::InvalidValue(_) => ErrorKind::Runtime,
        }
    }

    /// The source position, for errors raised while reading text
    pub fn position(&self) -> Option<Position> {
        match self {
            Error::Lex { position, .. }
            | Error::Parse { position, .. }
            | Error::UnknownFunction { position, .. } => Some(*position),
            _ => None,
        }
    }
}
