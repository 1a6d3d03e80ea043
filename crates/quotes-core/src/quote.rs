use serde::{Deserialize, Serialize};

use crate::error::QuoteError;

/// A single `{text, category}` record.
///
/// There is no identifier: dedupe identity is `text`, compared exactly
/// (case- and whitespace-sensitive).
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    /// Build a quote as-is. Imported and server quotes are trusted and go
    /// through here without trimming.
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            category: category.into(),
        }
    }

    /// Build a locally entered quote: both fields are trimmed and must be
    /// non-empty afterwards.
    pub fn validated(text: &str, category: &str) -> Result<Self, QuoteError> {
        let text = text.trim();
        let category = category.trim();
        if text.is_empty() || category.is_empty() {
            return Err(QuoteError::Validation(
                "both text and category are required".to_string(),
            ));
        }
        Ok(Self::new(text, category))
    }
}

/// Ordered sequence of quotes. Insertion order is display and export order.
///
/// Serializes as a bare JSON array so stored and exported documents stay
/// compatible with files written by other quote book clients.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct QuoteCollection {
    quotes: Vec<Quote>,
}

impl QuoteCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Quote> {
        self.quotes.iter()
    }

    pub fn as_slice(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn last(&self) -> Option<&Quote> {
        self.quotes.last()
    }

    /// True if any stored quote has exactly this text.
    pub fn contains_text(&self, text: &str) -> bool {
        self.quotes.iter().any(|q| q.text == text)
    }

    /// Validate and append a locally entered quote. On error the collection
    /// is left untouched. Duplicates are not rejected here.
    pub fn add(&mut self, text: &str, category: &str) -> Result<&Quote, QuoteError> {
        let quote = Quote::validated(text, category)?;
        self.quotes.push(quote);
        Ok(&self.quotes[self.quotes.len() - 1])
    }

    /// Append without validation or dedupe.
    pub(crate) fn push(&mut self, quote: Quote) {
        self.quotes.push(quote);
    }
}

impl From<Vec<Quote>> for QuoteCollection {
    fn from(quotes: Vec<Quote>) -> Self {
        Self { quotes }
    }
}

impl FromIterator<Quote> for QuoteCollection {
    fn from_iter<I: IntoIterator<Item = Quote>>(iter: I) -> Self {
        Self {
            quotes: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a QuoteCollection {
    type Item = &'a Quote;
    type IntoIter = std::slice::Iter<'a, Quote>;

    fn into_iter(self) -> Self::IntoIter {
        self.quotes.iter()
    }
}

/// Seed collection used when nothing usable is persisted.
pub fn default_quotes() -> QuoteCollection {
    QuoteCollection::from(vec![
        Quote::new(
            "The only way to do great work is to love what you do.",
            "Inspiration",
        ),
        Quote::new(
            "Innovation distinguishes between a leader and a follower.",
            "Technology",
        ),
        Quote::new(
            "Life is what happens when you're busy making other plans.",
            "Life",
        ),
    ])
}
