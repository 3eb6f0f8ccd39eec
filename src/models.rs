mod ids;
mod note;

pub use ids::NoteIdentifier;
pub use note::Note;
