//! Error types for sqlight.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`SqlightError`] enum.
//!
//! # Examples
//!
//! ```
//! use sqlight::error::{Result, SqlightError};
//!
//! fn example_operation() -> Result<()> {
//!     Err(SqlightError::parse("unterminated phrase", 4))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for sqlight operations.
#[derive(Error, Debug)]
pub enum SqlightError {
    /// The query string does not conform to the query grammar.
    #[error("Parse error at position {position}: {message}")]
    Parse {
        /// What went wrong.
        message: String,
        /// Character position in the query where parsing stopped.
        position: usize,
    },

    /// An expression tree carries a node tag the evaluator does not know.
    #[error("Unknown node kind: {0}")]
    UnknownNodeKind(String),

    /// An expression tree violates the non-empty node invariants.
    #[error("Invalid expression: {0}")]
    InvalidExpression(String),

    /// Configuration errors
    #[error("Config error: {0}")]
    Config(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with SqlightError.
pub type Result<T> = std::result::Result<T, SqlightError>;

impl SqlightError {
    /// Create a new parse error at the given character position.
    pub fn parse<S: Into<String>>(msg: S, position: usize) -> Self {
        SqlightError::Parse {
            message: msg.into(),
            position,
        }
    }

    /// Create a new unknown node kind error.
    pub fn unknown_node_kind<S: Into<String>>(kind: S) -> Self {
        SqlightError::UnknownNodeKind(kind.into())
    }

    /// Create a new invalid expression error.
    pub fn invalid_expression<S: Into<String>>(msg: S) -> Self {
        SqlightError::InvalidExpression(msg.into())
    }

    /// Create a new config error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        SqlightError::Config(msg.into())
    }

    /// Whether this error means the query could not be parsed.
    pub fn is_parse_error(&self) -> bool {
        matches!(self, SqlightError::Parse { .. })
    }
}
