//! Positional layout of the clinical notes export.
//!
//! The export carries no schema beyond its column order, so every column the
//! extractor touches is addressed through [`NoteColumn`] rather than a bare
//! index.

/// Number of positional fields every data row must carry.
pub const NOTE_COLUMN_COUNT: usize = 8;

/// Category code marking a discharge summary.
pub const DISCHARGE_SUMMARY_CATEGORY: &str = "DS";

/// Column names written as the first line of the extracted dataset.
pub const OUTPUT_HEADER: [&str; 4] = ["SUBJECT_ID", "HADM_ID", "CHARTTIME", "TEXT"];

/// File name of the notes export inside the notes directory.
pub const DEFAULT_NOTES_FILE: &str = "discharge.csv";

/// Columns of the notes export, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoteColumn {
    NoteId,
    SubjectId,
    HadmId,
    NoteType,
    NoteSeq,
    Charttime,
    Storetime,
    Text,
}

impl NoteColumn {
    /// Zero-based position of the column in a row.
    pub const fn index(self) -> usize {
        match self {
            Self::NoteId => 0,
            Self::SubjectId => 1,
            Self::HadmId => 2,
            Self::NoteType => 3,
            Self::NoteSeq => 4,
            Self::Charttime => 5,
            Self::Storetime => 6,
            Self::Text => 7,
        }
    }

    /// Header name used by the export.
    pub const fn name(self) -> &'static str {
        match self {
            Self::NoteId => "note_id",
            Self::SubjectId => "subject_id",
            Self::HadmId => "hadm_id",
            Self::NoteType => "note_type",
            Self::NoteSeq => "note_seq",
            Self::Charttime => "charttime",
            Self::Storetime => "storetime",
            Self::Text => "text",
        }
    }

    /// All columns in positional order.
    pub const fn all() -> &'static [NoteColumn; NOTE_COLUMN_COUNT] {
        &[
            Self::NoteId,
            Self::SubjectId,
            Self::HadmId,
            Self::NoteType,
            Self::NoteSeq,
            Self::Charttime,
            Self::Storetime,
            Self::Text,
        ]
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::all().get(index).copied()
    }
}

impl std::fmt::Display for NoteColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Header line of the extracted dataset, without the trailing newline.
pub fn output_header_line() -> String {
    OUTPUT_HEADER.join(",")
}
