//! JSON shapes that cross a boundary: the stored/exported quote array, the
//! import file, and the remote posts endpoint.
//!
//! Quotes travel as `{"text", "category"}`. The posts endpoint speaks
//! `{"userId", "id", "title", "body"}`; only `title` is read back.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::POST_USER_ID;
use crate::error::QuoteError;
use crate::quote::{Quote, QuoteCollection};

/// A post as returned by the remote collection endpoint.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RemotePost {
    #[serde(rename = "userId", default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub id: Option<u64>,
    /// Missing or `null` on a malformed post; such posts are skipped.
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub body: String,
}

/// Body sent when publishing a locally added quote.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    pub title: String,
    pub body: String,
    #[serde(rename = "userId")]
    pub user_id: u32,
}

impl NewPost {
    pub fn from_quote(quote: &Quote) -> Self {
        Self {
            title: quote.text.clone(),
            body: quote.category.clone(),
            user_id: POST_USER_ID,
        }
    }
}

/// Map the first `limit` posts to quotes in `category`. A post without a
/// title is dropped on its own; the rest of the batch still maps.
pub fn posts_to_quotes(posts: Vec<RemotePost>, limit: usize, category: &str) -> Vec<Quote> {
    posts
        .into_iter()
        .take(limit)
        .filter_map(|p| p.title)
        .map(|title| Quote::new(title, category))
        .collect()
}

/// Pretty-printed (2-space) JSON array, as written to `quotes.json`.
pub fn export_json(collection: &QuoteCollection) -> Result<String, QuoteError> {
    Ok(serde_json::to_string_pretty(collection)?)
}

/// Strict parse of a stored quote array.
pub fn parse_collection(json: &str) -> Result<QuoteCollection, QuoteError> {
    Ok(serde_json::from_str(json)?)
}

/// Outcome of reading an import file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ImportReport {
    pub quotes: Vec<Quote>,
    /// Records dropped because `text` or `category` was missing or not a string.
    pub skipped: usize,
}

/// Parse an import document: a JSON array of `{text, category}`-shaped
/// records. Malformed records are skipped and counted; anything that is not
/// a JSON array fails the whole import.
pub fn import_json(json: &str) -> Result<ImportReport, QuoteError> {
    let value: Value = serde_json::from_str(json)?;
    let Value::Array(records) = value else {
        return Err(QuoteError::Parse(
            "expected a JSON array of quotes".to_string(),
        ));
    };

    let mut report = ImportReport::default();
    for record in records {
        let text = record.get("text").and_then(Value::as_str);
        let category = record.get("category").and_then(Value::as_str);
        match (text, category) {
            (Some(text), Some(category)) => report.quotes.push(Quote::new(text, category)),
            _ => report.skipped += 1,
        }
    }
    Ok(report)
}
