use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::SearchError;
use crate::models::Note;
use crate::query::{SearchOptions, build_search_statement};
use crate::store::NoteStore;

/// Searches the note store at `store_path` for `query`.
///
/// Opens a fresh read-only connection, runs a single statement, and closes
/// the connection before returning. Zero matches is `Ok(vec![])`.
///
/// # Examples
///
/// ```no_run
/// use bear_search::{SearchOptions, search};
///
/// # fn main() -> Result<(), bear_search::SearchError> {
/// let notes = search("database.sqlite", "groceries", &SearchOptions::default())?;
/// for note in &notes {
///     println!("{} {}", note.identifier(), note.title());
/// }
/// # Ok(())
/// # }
/// ```
pub fn search(
    store_path: impl AsRef<Path>,
    query: &str,
    options: &SearchOptions,
) -> Result<Vec<Note>, SearchError> {
    let statement = build_search_statement(query, options);
    debug!(sql = statement.sql(), pattern = statement.pattern(), "built search statement");

    let store = NoteStore::open_read_only(store_path)?;
    let notes = store.search(&statement)?;
    debug!(path = %store.path().display(), "closing note store");
    drop(store);

    info!(query, results = notes.len(), "search finished");
    Ok(notes)
}

/// Search entry point bound to one store and one set of exclusion options.
///
/// Holds no connection; every call to [`NoteSearcher::search`] opens its own.
#[derive(Debug, Clone)]
pub struct NoteSearcher {
    store_path: PathBuf,
    options: SearchOptions,
}

impl NoteSearcher {
    /// Creates a searcher for the store at `store_path`.
    pub fn new(store_path: impl Into<PathBuf>, options: SearchOptions) -> Self {
        Self {
            store_path: store_path.into(),
            options,
        }
    }

    /// Returns the store path.
    pub fn store_path(&self) -> &Path {
        &self.store_path
    }

    /// Returns the exclusion options.
    pub fn options(&self) -> SearchOptions {
        self.options
    }

    /// Searches note titles and bodies for `query`.
    pub fn search(&self, query: &str) -> Result<Vec<Note>, SearchError> {
        search(&self.store_path, query, &self.options)
    }
}
