use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuoteError {
    /// Empty text or category on a manual add.
    Validation(String),
    /// Malformed JSON from storage, an imported file or the server.
    Parse(String),
}

impl fmt::Display for QuoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuoteError::Validation(msg) => write!(f, "validation error: {msg}"),
            QuoteError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for QuoteError {}

impl From<serde_json::Error> for QuoteError {
    fn from(e: serde_json::Error) -> Self {
        QuoteError::Parse(e.to_string())
    }
}
