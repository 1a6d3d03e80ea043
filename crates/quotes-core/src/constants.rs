/// Pseudo-category that selects every quote.
pub const ALL_CATEGORIES: &str = "all";

/// Durable key holding the JSON array of quotes.
pub const QUOTES_KEY: &str = "quotes";

/// Durable key holding the last selected category filter.
pub const LAST_FILTER_KEY: &str = "lastFilter";

/// Session key holding the text of the last displayed quote.
pub const LAST_VIEWED_KEY: &str = "lastViewedQuote";

/// Default file name for exports.
pub const EXPORT_FILE_NAME: &str = "quotes.json";

/// Mock posts endpoint used as the sync source.
pub const DEFAULT_SERVER_URL: &str = "https://jsonplaceholder.typicode.com/posts";

/// Category stamped on every quote that arrives from the server.
pub const DEFAULT_SERVER_CATEGORY: &str = "Server";

/// Only the first N server posts are considered per sync.
pub const DEFAULT_BATCH_LIMIT: usize = 10;

/// Seconds between periodic syncs.
pub const DEFAULT_SYNC_INTERVAL_SECS: u64 = 60;

/// Seconds a transient status message stays visible.
pub const DEFAULT_STATUS_TTL_SECS: u64 = 3;

/// `userId` sent with every posted quote.
pub const POST_USER_ID: u32 = 1;
