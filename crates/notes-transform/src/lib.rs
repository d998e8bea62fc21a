//! Tokenization and normalization of clinical note text.

pub mod error;
pub mod normalize;
pub mod tokenizer;

pub use error::{Result, TransformError};
pub use normalize::{discharge_record, is_numeric_token, normalize_note_text};
pub use tokenizer::{Tokenizer, WORD_PATTERN, WordTokenizer};
