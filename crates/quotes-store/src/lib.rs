pub mod config;
pub mod error;
pub mod json_bridge;
pub mod kv;
pub mod paths;
pub mod quote_store;
pub mod schema;
pub mod store;

pub use config::Config;
pub use error::{Result, StoreError};
pub use json_bridge::ImportSummary;
pub use kv::{KeyValueStore, SessionStorage};
pub use paths::{default_base_dir, resolve_db_path};
pub use quote_store::QuoteStore;
pub use store::Store;
