use serde::{Deserialize, Serialize};
use std::fmt;

/// Bear's unique identifier for a note.
///
/// A UUID-shaped string assigned by Bear. It is used both to deduplicate
/// results and as the argument for opening the note in Bear.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteIdentifier(String);

impl NoteIdentifier {
    /// Creates a new note identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NoteIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
