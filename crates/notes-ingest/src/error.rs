//! Error types for notes ingestion.

use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

use notes_model::NoteColumn;

/// Errors that can occur while locating or reading the notes export.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Configuration Errors ===
    /// No notes directory given and the environment variable is unset.
    #[error("notes directory not configured: pass a directory or set {env_var}")]
    NotesDirNotConfigured { env_var: &'static str },

    // === File System Errors ===
    /// Notes file not found.
    #[error("notes file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to open or read the notes file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === CSV Parsing Errors ===
    /// The file holds no rows at all, not even a header.
    #[error("notes file has no header row: {path}")]
    MissingHeader { path: PathBuf },

    /// The CSV reader rejected the input.
    #[error("failed to parse CSV {path} at line {line}: {source}")]
    CsvParse {
        path: PathBuf,
        line: u64,
        #[source]
        source: csv::Error,
    },

    // === Row Errors ===
    /// A data row is shorter than the fixed column layout.
    #[error("{path}:{line}: missing {column} column (row has {found} fields, expected {expected})")]
    MissingColumn {
        path: PathBuf,
        line: u64,
        column: NoteColumn,
        found: usize,
        expected: usize,
    },

    /// A data row's subject identifier is not an integer.
    #[error("{path}:{line}: invalid subject_id '{value}': {source}")]
    InvalidSubjectId {
        path: PathBuf,
        line: u64,
        value: String,
        #[source]
        source: ParseIntError,
    },
}

impl IngestError {
    /// Map an I/O failure while opening `path` to the matching variant.
    pub(crate) fn open_failed(path: PathBuf, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::FileNotFound { path }
        } else {
            Self::FileRead { path, source }
        }
    }

    /// Input line the error points at, when it concerns a single row.
    pub fn line(&self) -> Option<u64> {
        match self {
            Self::CsvParse { line, .. }
            | Self::MissingColumn { line, .. }
            | Self::InvalidSubjectId { line, .. } => Some(*line),
            _ => None,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
