use std::fs;
use std::path::Path;

use quotes_core::{QuoteCollection, export_json, import_json};

use crate::error::{Result, StoreError};
use crate::kv::KeyValueStore;
use crate::quote_store::QuoteStore;

/// Counts from one file import.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportSummary {
    pub added: usize,
    pub skipped: usize,
}

impl<S: KeyValueStore> QuoteStore<S> {
    /// Append every valid record of a `quotes.json`-style file to `quotes`
    /// and persist. No dedupe: the file is replayed literally. A file that
    /// cannot be read or is not a JSON array changes nothing.
    pub fn import_file(&mut self, quotes: &mut QuoteCollection, path: &Path) -> Result<ImportSummary> {
        let json = fs::read_to_string(path).map_err(|e| {
            StoreError::InvalidData(format!("failed to read {}: {e}", path.display()))
        })?;
        self.import_str(quotes, &json)
    }

    /// `quotes` only changes once the appended collection has been saved.
    pub fn import_str(&mut self, quotes: &mut QuoteCollection, json: &str) -> Result<ImportSummary> {
        let report = import_json(json)?;
        let mut candidate = quotes.clone();
        let added = candidate.append_all(report.quotes);
        self.save(&candidate)?;
        *quotes = candidate;

        if report.skipped > 0 {
            tracing::warn!("skipped {} malformed records during import", report.skipped);
        }
        tracing::info!("imported {added} quotes");
        Ok(ImportSummary {
            added,
            skipped: report.skipped,
        })
    }

    /// Write `quotes` as pretty-printed JSON.
    pub fn export_file(&self, quotes: &QuoteCollection, path: &Path) -> Result<()> {
        let json = export_json(quotes)?;
        fs::write(path, json).map_err(|e| {
            StoreError::InvalidData(format!("failed to write {}: {e}", path.display()))
        })
    }
}
