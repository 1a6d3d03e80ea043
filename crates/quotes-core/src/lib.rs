//! Quote book core.
//!
//! Holds an ordered collection of `{text, category}` quotes, reconciles
//! externally fetched batches into it with text-equality dedupe, and picks
//! random quotes for display through an injected view sink.
//!
//! Zero I/O: no opinions about storage, transport or terminals.

pub mod constants;
pub mod error;
pub mod presenter;
pub mod quote;
pub mod reconcile;
pub mod wire;

pub use constants::{
    ALL_CATEGORIES, DEFAULT_BATCH_LIMIT, DEFAULT_SERVER_CATEGORY, DEFAULT_SERVER_URL,
    DEFAULT_STATUS_TTL_SECS, DEFAULT_SYNC_INTERVAL_SECS, EXPORT_FILE_NAME, LAST_FILTER_KEY,
    LAST_VIEWED_KEY, QUOTES_KEY,
};
pub use error::QuoteError;
pub use presenter::{
    EMPTY_PLACEHOLDER, QuoteView, Status, StatusKind, distinct_categories, filter_by_category,
    format_quote, pick_random, render, resolve_filter,
};
pub use quote::{Quote, QuoteCollection, default_quotes};
pub use reconcile::{MergeOutcome, import_append_all, merge_with_dedupe};
pub use wire::{
    ImportReport, NewPost, RemotePost, export_json, import_json, parse_collection,
    posts_to_quotes,
};
