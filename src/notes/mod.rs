//! Sticky notes kept as lines of a plain text file.

mod error;
mod store;


pub use error::{NoteError, NoteResult};
pub use store::{DEFAULT_NOTES_FILE, NO_NOTES, NO_NOTES_PROMPT, NoteStore};
