//! CSV reading utilities.

mod reader;

pub use reader::NoteReader;
