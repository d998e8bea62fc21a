//! Record definitions for the clinical notes export and the extracted
//! discharge-summary dataset.

pub mod columns;
pub mod error;
pub mod record;

pub use columns::{
    DEFAULT_NOTES_FILE, DISCHARGE_SUMMARY_CATEGORY, NOTE_COLUMN_COUNT, NoteColumn, OUTPUT_HEADER,
    output_header_line,
};
pub use error::{ModelError, Result};
pub use record::{DischargeRecord, NoteRecord, parse_subject_id};
