//! Reconciliation of externally sourced quotes into the local collection.
//!
//! Two policies live here side by side and are intentionally kept apart:
//!
//! - [`merge_with_dedupe`]: the server sync path. Append-only, local wins:
//!   an incoming quote whose `text` already exists (including one appended
//!   earlier in the same batch) is dropped whole, its category ignored.
//! - [`import_append_all`]: the file import path. Every record is appended
//!   verbatim, duplicates included, so an import replays the file literally.
//!
//! Both are pure: persistence and re-rendering are the caller's job.

use std::collections::HashSet;

use crate::quote::{Quote, QuoteCollection};

/// Result of folding a batch into a collection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MergeOutcome {
    pub merged: QuoteCollection,
    pub added_count: usize,
}

/// Merge `incoming` into `local`, skipping quotes whose text is already present.
pub fn merge_with_dedupe(
    mut local: QuoteCollection,
    incoming: impl IntoIterator<Item = Quote>,
) -> MergeOutcome {
    let added_count = local.merge_from(incoming);
    MergeOutcome {
        merged: local,
        added_count,
    }
}

/// Append every quote in `incoming` to `local` without dedupe.
pub fn import_append_all(
    mut local: QuoteCollection,
    incoming: impl IntoIterator<Item = Quote>,
) -> MergeOutcome {
    let added_count = local.append_all(incoming);
    MergeOutcome {
        merged: local,
        added_count,
    }
}

impl QuoteCollection {
    /// In-place form of [`merge_with_dedupe`]. Returns the number appended.
    pub fn merge_from(&mut self, incoming: impl IntoIterator<Item = Quote>) -> usize {
        // Seeded from the current contents and grown as we append, so a
        // repeat within the batch is caught too.
        let mut seen: HashSet<String> = self.iter().map(|q| q.text.clone()).collect();
        let mut added = 0;
        for quote in incoming {
            if seen.contains(&quote.text) {
                continue;
            }
            seen.insert(quote.text.clone());
            self.push(quote);
            added += 1;
        }
        added
    }

    /// In-place form of [`import_append_all`]. Returns the number appended.
    pub fn append_all(&mut self, incoming: impl IntoIterator<Item = Quote>) -> usize {
        let before = self.len();
        for quote in incoming {
            self.push(quote);
        }
        self.len() - before
    }
}
