use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use super::NoteIdentifier;

/// A Bear note as returned by a search.
///
/// Notes are read-only snapshots of a row in Bear's database. They are built
/// fresh for every search and never change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    identifier: NoteIdentifier,
    title: String,
    #[serde(with = "time::serde::rfc3339")]
    creation_time: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    modification_time: OffsetDateTime,
}

impl Note {
    /// Creates a note from already-decoded values.
    ///
    /// No validation is applied; in particular `modification_time` may
    /// precede `creation_time` if the store says so.
    pub fn new(
        identifier: NoteIdentifier,
        title: impl Into<String>,
        creation_time: OffsetDateTime,
        modification_time: OffsetDateTime,
    ) -> Self {
        Self {
            identifier,
            title: title.into(),
            creation_time,
            modification_time,
        }
    }

    /// Returns Bear's identifier for this note.
    pub fn identifier(&self) -> &NoteIdentifier {
        &self.identifier
    }

    /// Returns the note title. May be empty.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns when the note was created.
    pub fn creation_time(&self) -> OffsetDateTime {
        self.creation_time
    }

    /// Returns when the note was last modified.
    pub fn modification_time(&self) -> OffsetDateTime {
        self.modification_time
    }
}
