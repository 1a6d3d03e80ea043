use std::fmt;

use quotes_core::QuoteError;

#[derive(Debug)]
pub enum StoreError {
    Sqlite(rusqlite::Error),
    Quote(QuoteError),
    InvalidData(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Sqlite(e) => write!(f, "SQLite error: {e}"),
            StoreError::Quote(e) => write!(f, "{e}"),
            StoreError::InvalidData(msg) => write!(f, "invalid data: {msg}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Sqlite(e) => Some(e),
            StoreError::Quote(e) => Some(e),
            StoreError::InvalidData(_) => None,
        }
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        StoreError::Sqlite(e)
    }
}

impl From<QuoteError> for StoreError {
    fn from(e: QuoteError) -> Self {
        StoreError::Quote(e)
    }
}

impl StoreError {
    /// True when the failure is a rejected manual add (blank text/category).
    pub fn is_validation(&self) -> bool {
        matches!(self, StoreError::Quote(QuoteError::Validation(_)))
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
