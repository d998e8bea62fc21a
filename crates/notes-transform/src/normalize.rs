//! Free-text normalization for discharge summaries.

use notes_model::{DischargeRecord, NoteRecord};

use crate::tokenizer::Tokenizer;

/// True when `token` is non-empty and made only of numeric characters.
pub fn is_numeric_token(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_numeric)
}

/// Tokenize `text`, drop purely numeric tokens, lower-case the rest and join
/// them with single spaces.
pub fn normalize_note_text<T: Tokenizer + ?Sized>(tokenizer: &T, text: &str) -> String {
    let mut normalized = String::with_capacity(text.len());
    for token in tokenizer
        .tokenize(text)
        .into_iter()
        .filter(|token| !is_numeric_token(token))
    {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(&token.to_lowercase());
    }
    normalized
}

/// Reduce a note to a [`DischargeRecord`], or `None` when it is not a
/// discharge summary.
pub fn discharge_record<T: Tokenizer + ?Sized>(
    tokenizer: &T,
    note: NoteRecord,
) -> Option<DischargeRecord> {
    if !note.is_discharge_summary() {
        return None;
    }
    let text = normalize_note_text(tokenizer, &note.text);
    Some(DischargeRecord::from_note(note, text))
}
