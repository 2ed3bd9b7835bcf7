use std::fmt;

use thiserror::Error;

/// Errors raised by the corpus, the full-text cache and the persistence layer.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// An empty keyword or pattern would match at every position.
    #[error("search pattern must not be empty")]
    EmptyPattern,

    #[error("unparsable date {0:?}")]
    InvalidDate(String),

    #[error("missing required column {0:?}")]
    MissingColumn(&'static str),

    #[error("separator {0:?} is a word character")]
    InvalidSeparator(char),

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// A data row of a corpus file that could not be turned into a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowError {
    /// 1-based line number in the source file
    pub line: usize,
    pub reason: String,
}

impl RowError {
    pub fn new(line: usize, reason: impl Into<String>) -> Self {
        RowError { line, reason: reason.into() }
    }
}

impl fmt::Display for RowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}

impl std::error::Error for RowError {}
