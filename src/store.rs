use std::path::{Path, PathBuf};
use std::time::Instant;

use rusqlite::{Connection, OpenFlags, Row, params_from_iter};
use time::OffsetDateTime;
use tracing::debug;

use crate::error::{DecodeError, SearchError};
use crate::models::{Note, NoteIdentifier};
use crate::query::{SELECTED_COLUMNS, SearchStatement};

/// Column names in selection order, used in decode errors.
const COLUMN_NAMES: [&str; SELECTED_COLUMNS] = [
    "ZUNIQUEIDENTIFIER",
    "ZTITLE",
    "ZCREATIONDATE",
    "ZMODIFICATIONDATE",
];

/// Read-only handle on Bear's SQLite database.
///
/// The connection is closed when the store is dropped.
pub struct NoteStore {
    conn: Connection,
    path: PathBuf,
}

impl NoteStore {
    /// Opens the database at `path` in read-only mode.
    ///
    /// Never creates the file. The database header is read before returning,
    /// so a missing, unreadable, or non-SQLite file fails here rather than at
    /// query time.
    pub fn open_read_only(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let path = path.as_ref().to_path_buf();
        let open_error = |source| SearchError::Open {
            path: path.clone(),
            source,
        };

        let conn = Connection::open_with_flags(
            &path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(open_error)?;

        conn.query_row("PRAGMA schema_version", [], |row| row.get::<_, i64>(0))
            .map_err(open_error)?;

        debug!(path = %path.display(), "opened note store read-only");
        Ok(Self { conn, path })
    }

    /// Returns the path the store was opened from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Runs `statement` and decodes every row into a [`Note`].
    ///
    /// Rows come back in the order the store delivers them. The result is
    /// fully materialised; a decode failure on any row fails the whole call.
    pub fn search(&self, statement: &SearchStatement) -> Result<Vec<Note>, SearchError> {
        let started_at = Instant::now();

        let mut stmt = self
            .conn
            .prepare(statement.sql())
            .map_err(SearchError::Query)?;

        let found = stmt.column_count();
        if found != SELECTED_COLUMNS {
            return Err(DecodeError::ColumnCount {
                expected: SELECTED_COLUMNS,
                found,
            }
            .into());
        }

        let mut rows = stmt
            .query(params_from_iter(statement.params()))
            .map_err(SearchError::Query)?;

        let mut notes = Vec::new();
        while let Some(row) = rows.next().map_err(SearchError::Query)? {
            notes.push(decode_row(row)?);
        }

        debug!(
            rows = notes.len(),
            duration_ms = started_at.elapsed().as_millis() as u64,
            "search statement finished"
        );
        Ok(notes)
    }
}

/// Decodes one result row: identifier, title, created, modified.
///
/// Timestamps are expected to already be UNIX seconds.
fn decode_row(row: &Row<'_>) -> Result<Note, DecodeError> {
    let identifier: String = column(row, 0)?;
    let title: String = column(row, 1)?;
    let creation_time = timestamp(row, 2)?;
    let modification_time = timestamp(row, 3)?;

    Ok(Note::new(
        NoteIdentifier::new(identifier),
        title,
        creation_time,
        modification_time,
    ))
}

fn column<T: rusqlite::types::FromSql>(row: &Row<'_>, index: usize) -> Result<T, DecodeError> {
    row.get(index).map_err(|source| DecodeError::Column {
        index,
        name: COLUMN_NAMES[index],
        source,
    })
}

fn timestamp(row: &Row<'_>, index: usize) -> Result<OffsetDateTime, DecodeError> {
    let value: i64 = column(row, index)?;
    OffsetDateTime::from_unix_timestamp(value).map_err(|_| DecodeError::Timestamp {
        name: COLUMN_NAMES[index],
        value,
    })
}
