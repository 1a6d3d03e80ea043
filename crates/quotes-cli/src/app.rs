use std::path::Path;

use quotes_core::{
    LAST_VIEWED_KEY, Quote, QuoteCollection, QuoteView, distinct_categories, render,
};
use quotes_store::{ImportSummary, KeyValueStore, QuoteStore, SessionStorage, Store};
use rand::rngs::SmallRng;

/// Everything one session mutates: the collection, its durable store, the
/// session-scoped map and the display RNG.
///
/// All mutations of the collection go through here. The sync loop holds this
/// behind a single mutex so merges always see the current collection.
pub struct AppState<S: KeyValueStore = Store> {
    store: QuoteStore<S>,
    quotes: QuoteCollection,
    session: SessionStorage,
    rng: SmallRng,
}

impl<S: KeyValueStore> AppState<S> {
    pub fn load(store: QuoteStore<S>, rng: SmallRng) -> Self {
        let quotes = store.load();
        tracing::debug!("loaded {} quotes", quotes.len());
        Self {
            store,
            quotes,
            session: SessionStorage::new(),
            rng,
        }
    }

    pub fn quotes(&self) -> &QuoteCollection {
        &self.quotes
    }

    #[cfg(test)]
    pub fn store(&self) -> &QuoteStore<S> {
        &self.store
    }

    pub fn categories(&self) -> Vec<String> {
        distinct_categories(&self.quotes)
    }

    pub fn last_filter(&self) -> Option<String> {
        self.store.last_filter()
    }

    pub fn add(&mut self, text: &str, category: &str) -> quotes_store::Result<Quote> {
        self.store.add(&mut self.quotes, text, category)
    }

    pub fn import_file(&mut self, path: &Path) -> quotes_store::Result<ImportSummary> {
        self.store.import_file(&mut self.quotes, path)
    }

    pub fn export_file(&self, path: &Path) -> quotes_store::Result<()> {
        self.store.export_file(&self.quotes, path)
    }

    /// Merge a server batch in place (dedupe, local wins). Does not persist.
    pub fn merge_server_batch(&mut self, batch: Vec<Quote>) -> usize {
        self.quotes.merge_from(batch)
    }

    pub fn save(&mut self) -> quotes_store::Result<()> {
        self.store.save(&self.quotes)
    }

    /// Render one random quote. An explicit `category` becomes the persisted
    /// filter; otherwise the last persisted filter applies.
    pub fn show<V: QuoteView + ?Sized>(
        &mut self,
        view: &mut V,
        category: Option<&str>,
    ) -> quotes_store::Result<Option<Quote>> {
        if let Some(category) = category {
            if !self.categories().iter().any(|c| c == category) {
                tracing::warn!("unknown category '{category}', showing all quotes");
            }
            self.store.set_last_filter(category)?;
        }
        Ok(self.refresh(view))
    }

    /// Re-render with the persisted filter (after a sync or import).
    pub fn refresh<V: QuoteView + ?Sized>(&mut self, view: &mut V) -> Option<Quote> {
        let filter = self.store.last_filter();
        let shown = render(view, &self.quotes, filter.as_deref(), &mut self.rng);
        if let Some(quote) = &shown
            && let Err(e) = self.session.set(LAST_VIEWED_KEY, &quote.text)
        {
            tracing::debug!("failed to record last viewed quote: {e}");
        }
        shown
    }

    /// Text of the last quote shown in this session.
    pub fn last_viewed(&self) -> Option<String> {
        self.session.get(LAST_VIEWED_KEY).ok().flatten()
    }
}
