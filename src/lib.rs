pub mod config;
pub mod error;
pub mod feedback;
pub mod logging;
pub mod models;
pub mod query;
pub mod service;
pub mod store;

pub use config::Config;
pub use error::{ConfigError, DecodeError, SearchError};
pub use models::{Note, NoteIdentifier};
pub use query::{SearchOptions, SearchStatement, build_search_statement};
pub use service::{NoteSearcher, search};
pub use store::NoteStore;
