/// Error type for bgrid-rs operations.
#[derive(Debug, Clone, PartialEq)]
pub enum BGridError {
    /// A coordinate, level count or grid path was rejected before encoding or decoding.
    InvalidInput(String),
    /// The language code is not one of the supported word-list languages.
    UnsupportedLanguage(String),
    /// A word list is missing, is not exactly 2048 entries, or repeats a token.
    MalformedWordList(String),
    /// File I/O or serialization error.
    IoError(String),
    /// CSV parsing or reading error.
    CsvError(String),
    /// Failed to parse geometry from string (GeoJSON or WKT), or the geometry type is unsupported.
    GeometryParseError(String),
}

impl std::fmt::Display for BGridError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BGridError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            BGridError::UnsupportedLanguage(code) => write!(f, "Unsupported language: {}", code),
            BGridError::MalformedWordList(msg) => write!(f, "Malformed word list: {}", msg),
            BGridError::IoError(msg) => write!(f, "IO error: {}", msg),
            BGridError::CsvError(msg) => write!(f, "CSV error: {}", msg),
            BGridError::GeometryParseError(msg) => write!(f, "Geometry parse error: {}", msg),
        }
    }
}

impl std::error::Error for BGridError {}
