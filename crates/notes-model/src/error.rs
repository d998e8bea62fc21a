use std::num::ParseIntError;

use thiserror::Error;

use crate::columns::NoteColumn;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("missing {column} column (row has {found} fields, expected {expected})")]
    MissingColumn {
        column: NoteColumn,
        found: usize,
        expected: usize,
    },
    #[error("invalid subject_id '{value}': {source}")]
    InvalidSubjectId {
        value: String,
        #[source]
        source: ParseIntError,
    },
}

pub type Result<T> = std::result::Result<T, ModelError>;
