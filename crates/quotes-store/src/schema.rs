use rusqlite::Connection;

use crate::error::Result;

pub const SCHEMA_VERSION: i64 = 1;

pub fn initialize(conn: &Connection) -> Result<()> {
    conn.execute_batch("PRAGMA journal_mode = WAL;")?;
    conn.pragma_update(None, "busy_timeout", 5000)?;
    // Checkpoint every ~400KB instead of the default ~4MB; keeps WAL files small
    conn.pragma_update(None, "wal_autocheckpoint", 100)?;

    // Fold any stale WAL left by a crashed watcher back into the main file.
    // In-memory and fresh databases legitimately fail this; not fatal.
    if conn
        .execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")
        .is_ok()
    {
        tracing::debug!("startup WAL checkpoint complete");
    }

    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS metadata (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS kv (
            key   TEXT PRIMARY KEY,
            value TEXT NOT NULL
        );
        ",
    )?;

    conn.execute(
        "INSERT OR REPLACE INTO metadata (key, value) VALUES ('schema_version', ?1)",
        [SCHEMA_VERSION.to_string()],
    )?;

    Ok(())
}
