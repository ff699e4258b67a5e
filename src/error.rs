//! Error types for wlsh.

use thiserror::Error;

/// Errors that can occur while building or querying an index.
#[derive(Debug, Error)]
pub enum RetrieveError {
    /// A query (or a vectorizer transform) was issued before a successful build/fit.
    #[error("index has not been built")]
    NotBuilt,

    /// Build configuration violates an invariant (e.g. `num_hashes != bands * rows`).
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Invalid runtime parameter value (e.g. `topk == 0`).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Query text is empty or whitespace only.
    #[error("query is empty")]
    EmptyQuery,

    /// Build was called with no documents.
    #[error("corpus is empty")]
    EmptyCorpus,

    /// Sparse vector is malformed (negative weight, unsorted indices, ...).
    #[error("invalid sparse vector: {0}")]
    InvalidSparseVector(String),

    /// I/O error while reading records.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Records could not be decoded.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for RetrieveError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

impl From<csv::Error> for RetrieveError {
    fn from(e: csv::Error) -> Self {
        Self::Parse(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RetrieveError>;
