//! Clinical notes ingestion.
//!
//! This crate locates the notes export and reads it as a forward-only stream
//! of [`notes_model::NoteRecord`] values.
//!
//! # Example
//!
//! ```ignore
//! use notes_ingest::{NoteReader, notes_file_path, resolve_notes_dir};
//!
//! let notes_dir = resolve_notes_dir(None)?;
//! let mut reader = NoteReader::open(&notes_file_path(&notes_dir))?;
//! while let Some(note) = reader.next_note()? {
//!     // ...
//! }
//! ```

mod config;
mod csv;
mod error;

// === Error Types ===
pub use error::{IngestError, Result};

// === Configuration ===
pub use config::{NOTES_DIR_ENV_VAR, notes_file_path, resolve_notes_dir};

// === CSV Reading ===
pub use self::csv::NoteReader;
