mod display;
mod language;
pub(crate) mod list;
mod loader;

pub use display::{DisplayMode, format_path, parse_words, to_words};
pub use language::{Language, is_supported_language};
pub use list::WordList;
pub use loader::{DEFAULT_WORDLIST_DIR, WordListLoader};
