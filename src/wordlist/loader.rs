use crate::error::BGridError;
use crate::wordlist::language::Language;
use crate::wordlist::list::WordList;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Directory searched for word-list files when none is configured.
pub const DEFAULT_WORDLIST_DIR: &str = "bip39-wordlist";

/// Loads `bip39-<code>.json` word lists from a directory.
///
/// # Example
/// ```no_run
/// use bgrid_rs::{Language, WordListLoader};
///
/// let loader = WordListLoader::new().base_dir("assets/bip39-wordlist");
/// let english = loader.load(Language::English).unwrap();
/// println!("{}", english.token_for(1).unwrap_or("?"));
///
/// // Missing or broken languages are skipped
/// let all = loader.load_all(&Language::ALL);
/// println!("{} languages loaded", all.len());
/// ```
#[derive(Debug, Clone)]
pub struct WordListLoader {
    base_dir: PathBuf,
}

impl Default for WordListLoader {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from(DEFAULT_WORDLIST_DIR),
        }
    }
}

impl WordListLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = dir.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.base_dir
    }

    /// Location of the file holding `language`'s list.
    pub fn path_for(&self, language: Language) -> PathBuf {
        self.base_dir.join(format!("bip39-{}.json", language.code()))
    }

    /// Loads and validates one language.
    ///
    /// # Errors
    ///
    /// - [`BGridError::IoError`] - the file cannot be opened
    /// - [`BGridError::MalformedWordList`] - the file is not a JSON array of 2048 unique words
    pub fn load(&self, language: Language) -> Result<WordList, BGridError> {
        let path = self.path_for(language);
        debug!(language = %language, path = %path.display(), "loading word list");

        let file = File::open(&path)
            .map_err(|e| BGridError::IoError(format!("{}: {}", path.display(), e)))?;
        WordList::from_json_reader(BufReader::new(file)).map_err(|e| match e {
            BGridError::MalformedWordList(msg) => BGridError::MalformedWordList(format!(
                "bip39-{}.json: {}",
                language.code(),
                msg
            )),
            other => other,
        })
    }

    /// Loads a language given by code.
    ///
    /// # Errors
    ///
    /// - [`BGridError::UnsupportedLanguage`] - unknown code
    /// - otherwise as [`load`](Self::load)
    pub fn load_code(&self, code: &str) -> Result<WordList, BGridError> {
        let language: Language = code.parse()?;
        self.load(language)
    }

    /// Loads several languages in parallel.
    ///
    /// Each language is loaded independently; a failure is logged and that
    /// language is left out of the returned map.
    pub fn load_all(&self, languages: &[Language]) -> HashMap<Language, WordList> {
        let loaded: HashMap<Language, WordList> = languages
            .par_iter()
            .filter_map(|&language| match self.load(language) {
                Ok(words) => Some((language, words)),
                Err(e) => {
                    warn!(language = %language, error = %e, "skipping word list");
                    None
                }
            })
            .collect();

        info!(
            requested = languages.len(),
            loaded = loaded.len(),
            dir = %self.base_dir.display(),
            "word lists loaded"
        );
        loaded
    }
}
