use crate::error::BGridError;
use crate::index::CELLS_PER_LEVEL;
use std::collections::HashMap;
use std::io::Read;

/// An ordered list of exactly 2048 unique tokens, addressed 1..=2048.
///
/// Lookups by token ignore case, so tokens must also be unique once lowercased.
///
/// # Example
/// ```
/// use bgrid_rs::WordList;
///
/// # fn main() -> Result<(), bgrid_rs::BGridError> {
/// let words: Vec<String> = (1..=2048).map(|i| format!("word{}", i)).collect();
/// let list = WordList::new(words)?;
///
/// assert_eq!(list.token_for(1), Some("word1"));
/// assert_eq!(list.number_for("WORD2048"), Some(2048));
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct WordList {
    words: Vec<String>,
    lookup: HashMap<String, u16>,
}

impl WordList {
    /// Validates and indexes a list of tokens.
    ///
    /// # Errors
    ///
    /// - [`BGridError::MalformedWordList`] - wrong length, empty token or duplicate token
    pub fn new(words: Vec<String>) -> Result<Self, BGridError> {
        if words.len() != CELLS_PER_LEVEL as usize {
            return Err(BGridError::MalformedWordList(format!(
                "expected {} words, got {}",
                CELLS_PER_LEVEL,
                words.len()
            )));
        }

        let mut lookup = HashMap::with_capacity(words.len());
        for (i, word) in words.iter().enumerate() {
            if word.trim().is_empty() {
                return Err(BGridError::MalformedWordList(format!(
                    "word {} is empty",
                    i + 1
                )));
            }
            if lookup.insert(word.to_lowercase(), (i + 1) as u16).is_some() {
                return Err(BGridError::MalformedWordList(format!(
                    "duplicate word '{}' at position {}",
                    word,
                    i + 1
                )));
            }
        }

        Ok(Self { words, lookup })
    }

    /// Parses a JSON array of strings.
    pub fn from_json_str(json: &str) -> Result<Self, BGridError> {
        let words: Vec<String> = serde_json::from_str(json)
            .map_err(|e| BGridError::MalformedWordList(e.to_string()))?;
        Self::new(words)
    }

    /// Reads a JSON array of strings from any reader.
    pub fn from_json_reader(reader: impl Read) -> Result<Self, BGridError> {
        let words: Vec<String> = serde_json::from_reader(reader)
            .map_err(|e| BGridError::MalformedWordList(e.to_string()))?;
        Self::new(words)
    }

    /// Token at a 1-based position, or `None` outside `1..=2048`.
    pub fn token_for(&self, number: u16) -> Option<&str> {
        if number == 0 {
            return None;
        }
        self.words.get(number as usize - 1).map(String::as_str)
    }

    /// 1-based position of a token, matched exactly but ignoring case.
    pub fn number_for(&self, token: &str) -> Option<u16> {
        if token.is_empty() {
            return None;
        }
        self.lookup.get(&token.to_lowercase()).copied()
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always false: a valid list holds 2048 words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn sample_words() -> Vec<String> {
    (1..=CELLS_PER_LEVEL).map(|i| format!("w{:04}", i)).collect()
}
