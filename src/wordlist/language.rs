use crate::error::BGridError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Languages with a published 2048-word list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "en")]
    English,
    #[serde(rename = "es")]
    Spanish,
    #[serde(rename = "fr")]
    French,
    #[serde(rename = "pt")]
    Portuguese,
    #[serde(rename = "zh")]
    Chinese,
}

impl Language {
    /// Every supported language, in code order.
    pub const ALL: [Language; 5] = [
        Language::English,
        Language::Spanish,
        Language::French,
        Language::Portuguese,
        Language::Chinese,
    ];

    /// Two-letter lowercase code used in word-list file names.
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Spanish => "es",
            Language::French => "fr",
            Language::Portuguese => "pt",
            Language::Chinese => "zh",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Parses a language code, ignoring case and surrounding whitespace.
impl FromStr for Language {
    type Err = BGridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        Language::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| BGridError::UnsupportedLanguage(s.to_string()))
    }
}

/// Whether `code` is exactly one of the lowercase language codes.
///
/// Unlike [`Language::from_str`], this does not trim or fold case.
pub fn is_supported_language(code: &str) -> bool {
    Language::ALL.iter().any(|lang| lang.code() == code)
}
