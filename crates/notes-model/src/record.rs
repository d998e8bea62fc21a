use crate::columns::{DISCHARGE_SUMMARY_CATEGORY, NOTE_COLUMN_COUNT, NoteColumn};
use crate::error::{ModelError, Result};

/// One row of the notes export with its columns named.
///
/// Built from the positional fields of a parsed row. Construction fails when
/// the row is too short or when `subject_id` is not an integer, which makes
/// both conditions fatal for the whole extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRecord {
    pub note_id: String,
    /// Raw subject identifier, passed through to the output unchanged.
    pub subject_id: String,
    /// `subject_id` parsed as an integer. Only used to validate the row.
    pub subject_number: i64,
    pub hadm_id: String,
    pub note_type: String,
    pub note_seq: String,
    pub charttime: String,
    pub storetime: String,
    pub text: String,
}

impl NoteRecord {
    /// Build a record from the positional fields of a row.
    ///
    /// Fields past [`NOTE_COLUMN_COUNT`] are ignored.
    pub fn from_fields(fields: Vec<String>) -> Result<Self> {
        let found = fields.len();
        if found < NOTE_COLUMN_COUNT {
            let column = NoteColumn::from_index(found).unwrap_or(NoteColumn::Text);
            return Err(ModelError::MissingColumn {
                column,
                found,
                expected: NOTE_COLUMN_COUNT,
            });
        }

        let mut fields = fields.into_iter();
        let mut next = || fields.next().unwrap_or_default();
        let note_id = next();
        let subject_id = next();
        let hadm_id = next();
        let note_type = next();
        let note_seq = next();
        let charttime = next();
        let storetime = next();
        let text = next();

        let subject_number = parse_subject_id(&subject_id)?;

        Ok(Self {
            note_id,
            subject_id,
            subject_number,
            hadm_id,
            note_type,
            note_seq,
            charttime,
            storetime,
            text,
        })
    }

    /// True when the note's category code is exactly the discharge-summary code.
    pub fn is_discharge_summary(&self) -> bool {
        self.note_type == DISCHARGE_SUMMARY_CATEGORY
    }
}

/// Parse a subject identifier, tolerating surrounding whitespace and a sign.
pub fn parse_subject_id(raw: &str) -> Result<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|source| ModelError::InvalidSubjectId {
            value: raw.to_string(),
            source,
        })
}

/// A discharge summary reduced to its identifiers and normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DischargeRecord {
    pub subject_id: String,
    pub hadm_id: String,
    pub charttime: String,
    /// Normalized note text, without surrounding quotes.
    pub text: String,
}

impl DischargeRecord {
    /// Carry the identifier columns of `note` over next to `text`.
    pub fn from_note(note: NoteRecord, text: String) -> Self {
        Self {
            subject_id: note.subject_id,
            hadm_id: note.hadm_id,
            charttime: note.charttime,
            text,
        }
    }
}
