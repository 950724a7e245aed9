use crate::error::BGridError;
use crate::index::GridPath;
use crate::wordlist::list::WordList;
use std::str::FromStr;

/// How a grid path is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayMode {
    /// Comma-joined decimal indices, e.g. `1057,1`
    #[default]
    Numbers,
    /// Comma-joined word-list tokens
    Words,
}

impl FromStr for DisplayMode {
    type Err = BGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "numbers" => Ok(DisplayMode::Numbers),
            "words" => Ok(DisplayMode::Words),
            other => Err(BGridError::InvalidInput(format!(
                "unknown display mode '{}'",
                other
            ))),
        }
    }
}

/// Renders a grid path as comma-joined numbers or words.
///
/// # Example
/// ```
/// use bgrid_rs::{DisplayMode, GridPath, WordList, format_path};
///
/// # fn main() -> Result<(), bgrid_rs::BGridError> {
/// let path = GridPath::new(vec![3, 1])?;
/// assert_eq!(format_path(&path, DisplayMode::Numbers, None)?, "3,1");
///
/// let words: Vec<String> = (1..=2048).map(|i| format!("word{}", i)).collect();
/// let list = WordList::new(words)?;
/// assert_eq!(format_path(&path, DisplayMode::Words, Some(&list))?, "word3,word1");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// - [`BGridError::MalformedWordList`] - `Words` mode without a word list
pub fn format_path(
    path: &GridPath,
    mode: DisplayMode,
    words: Option<&WordList>,
) -> Result<String, BGridError> {
    match mode {
        DisplayMode::Numbers => Ok(path.to_string()),
        DisplayMode::Words => {
            let words = words.ok_or_else(|| {
                BGridError::MalformedWordList("a word list is required for words mode".to_string())
            })?;
            Ok(to_words(path, words)?.join(","))
        }
    }
}

/// Maps every index of a path to its token.
pub fn to_words<'a>(path: &GridPath, words: &'a WordList) -> Result<Vec<&'a str>, BGridError> {
    path.iter()
        .map(|&index| {
            words.token_for(index).ok_or_else(|| {
                BGridError::MalformedWordList(format!("no word for index {}", index))
            })
        })
        .collect()
}

/// Parses comma-separated tokens back into a grid path.
///
/// Tokens are trimmed and matched ignoring case. An empty string is the root path.
///
/// # Errors
///
/// - [`BGridError::InvalidInput`] - a token is not in the list
pub fn parse_words(text: &str, words: &WordList) -> Result<GridPath, BGridError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(GridPath::root());
    }

    let indices = trimmed
        .split(',')
        .map(|token| {
            let token = token.trim();
            words
                .number_for(token)
                .ok_or_else(|| BGridError::InvalidInput(format!("unknown word '{}'", token)))
        })
        .collect::<Result<Vec<u16>, BGridError>>()?;

    GridPath::new(indices)
}
