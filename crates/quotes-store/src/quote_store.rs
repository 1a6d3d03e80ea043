use std::path::Path;

use quotes_core::{
    LAST_FILTER_KEY, QUOTES_KEY, Quote, QuoteCollection, default_quotes, parse_collection,
};

use crate::error::Result;
use crate::kv::KeyValueStore;
use crate::store::Store;

/// Loads and saves the quote collection (and the last category filter)
/// through a key-value surface.
///
/// The collection itself is owned by the caller and passed in explicitly;
/// this type holds no quotes of its own.
pub struct QuoteStore<S: KeyValueStore = Store> {
    kv: S,
}

impl QuoteStore<Store> {
    /// Open (or create) the SQLite-backed store at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        Ok(Self::new(Store::open(path)?))
    }

    pub fn open_in_memory() -> Result<Self> {
        Ok(Self::new(Store::open_in_memory()?))
    }
}

impl<S: KeyValueStore> QuoteStore<S> {
    pub fn new(kv: S) -> Self {
        Self { kv }
    }

    pub fn kv(&self) -> &S {
        &self.kv
    }

    /// Load the persisted collection. Never fails: a missing key, an
    /// unreadable value or a storage error all yield the seed collection.
    pub fn load(&self) -> QuoteCollection {
        let stored = match self.kv.get(QUOTES_KEY) {
            Ok(Some(json)) => json,
            Ok(None) => {
                tracing::debug!("no stored quotes, using defaults");
                return default_quotes();
            }
            Err(e) => {
                tracing::warn!("failed to read stored quotes, using defaults: {e}");
                return default_quotes();
            }
        };

        match parse_collection(&stored) {
            Ok(quotes) => quotes,
            Err(e) => {
                tracing::warn!("stored quotes are corrupt, using defaults: {e}");
                default_quotes()
            }
        }
    }

    /// Serialize and persist the whole collection.
    pub fn save(&mut self, quotes: &QuoteCollection) -> Result<()> {
        let json = serde_json::to_string(quotes).map_err(quotes_core::QuoteError::from)?;
        self.kv.set(QUOTES_KEY, &json)?;
        tracing::debug!("saved {} quotes", quotes.len());
        Ok(())
    }

    /// Validate, append and persist a locally entered quote. A validation
    /// failure leaves both the collection and storage untouched.
    pub fn add(&mut self, quotes: &mut QuoteCollection, text: &str, category: &str) -> Result<Quote> {
        let quote = quotes.add(text, category)?.clone();
        self.save(quotes)?;
        Ok(quote)
    }

    /// Last category filter the user picked, if any was stored.
    pub fn last_filter(&self) -> Option<String> {
        match self.kv.get(LAST_FILTER_KEY) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!("failed to read last filter: {e}");
                None
            }
        }
    }

    pub fn set_last_filter(&mut self, category: &str) -> Result<()> {
        self.kv.set(LAST_FILTER_KEY, category)
    }
}
