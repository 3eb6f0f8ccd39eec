//! Error types for searching the note store.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by [`crate::search`] and the store it drives.
///
/// Each variant names the phase that failed. Nothing here is retried.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The store could not be opened read-only (missing, unreadable, not a database).
    #[error("open store {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Preparing or stepping the statement failed.
    #[error("execute query: {0}")]
    Query(#[source] rusqlite::Error),

    /// A result row did not have the expected shape.
    #[error("decode rows: {0}")]
    Decode(#[from] DecodeError),
}

/// Row-shape failures while turning a result row into a note.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The statement produced a different number of columns than expected.
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    /// A column held a value of the wrong type (including NULL).
    #[error("column {index} ({name}): {source}")]
    Column {
        index: usize,
        name: &'static str,
        #[source]
        source: rusqlite::Error,
    },

    /// A timestamp column held a value outside the representable range.
    #[error("column {name}: timestamp {value} out of range")]
    Timestamp { name: &'static str, value: i64 },
}

/// Errors raised while resolving configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to determine home directory")]
    HomeDirUnavailable,

    #[error("Invalid boolean for {name}: {value:?}")]
    InvalidBool { name: &'static str, value: String },
}
