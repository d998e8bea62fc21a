//! Word tokenization.

use regex::Regex;

use crate::error::{Result, TransformError};

/// Pattern matching maximal runs of word characters.
///
/// Word characters are Unicode letters, Unicode numbers of every kind and `_`.
/// Superscripts and vulgar fractions (`²`, `½`) therefore stay attached to
/// the token they follow. Combining marks are separators.
pub const WORD_PATTERN: &str = r"[\p{L}\p{N}_]+";

/// Splits text into tokens borrowed from the input.
pub trait Tokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str>;
}

/// Regex tokenizer keeping maximal runs of Unicode word characters.
///
/// Holds only the compiled pattern, so one instance can be shared by
/// reference across any number of calls.
#[derive(Debug, Clone)]
pub struct WordTokenizer {
    pattern: Regex,
}

impl WordTokenizer {
    pub fn new() -> Result<Self> {
        Self::with_pattern(WORD_PATTERN)
    }

    /// Tokenizer keeping every match of `pattern`.
    pub fn with_pattern(pattern: &str) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|source| TransformError::Pattern {
            pattern: pattern.to_string(),
            source,
        })?;
        Ok(Self { pattern })
    }
}

impl Tokenizer for WordTokenizer {
    fn tokenize<'a>(&self, text: &'a str) -> Vec<&'a str> {
        self.pattern.find_iter(text).map(|m| m.as_str()).collect()
    }
}
