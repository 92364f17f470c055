//! SQLite-backed mapping store.
//!
//! Schema matches the original deployment: one `figures` table keyed by code,
//! quarter persisted in its compact decimal form (`"171"` -> `171`).

use std::path::Path;

use figfall_error::{FigfallError, Result};
use figfall_types::{CodeReference, ItemCode, Quarter};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, params};
use tracing::debug;

use crate::MappingStore;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS figures (
    code INTEGER PRIMARY KEY,
    quarter INTEGER NOT NULL,
    preowned INTEGER NOT NULL
)";

/// Durable store over a single SQLite connection.
///
/// The connection is guarded by a mutex; each call runs one statement, so
/// concurrent searches for different codes interleave safely.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(FigfallError::store)?;
        Self::with_connection(conn)
    }

    /// Fully in-memory database, mainly for tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(FigfallError::store)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        conn.execute(SCHEMA, []).map_err(FigfallError::store)?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    fn query_one(&self, sql: &str, code: ItemCode) -> Result<Option<CodeReference>> {
        let conn = self.conn.lock();
        let row = conn
            .query_row(sql, params![code.get()], |row| {
                Ok((row.get::<_, u32>(0)?, row.get::<_, i64>(1)?, row.get::<_, bool>(2)?))
            })
            .optional()
            .map_err(FigfallError::store)?;
        row.map(|(code, quarter, preowned)| {
            Ok(CodeReference::new(ItemCode(code), preowned, Quarter::from_compact(quarter)?))
        })
        .transpose()
    }
}

impl MappingStore for SqliteStore {
    fn get(&self, code: ItemCode) -> Result<Option<CodeReference>> {
        self.query_one("SELECT code, quarter, preowned FROM figures WHERE code = ?1", code)
    }

    fn nearest_below(&self, code: ItemCode) -> Result<Option<CodeReference>> {
        self.query_one(
            "SELECT code, quarter, preowned FROM figures WHERE code <= ?1 \
             ORDER BY code DESC LIMIT 1",
            code,
        )
    }

    fn nearest_above(&self, code: ItemCode) -> Result<Option<CodeReference>> {
        self.query_one(
            "SELECT code, quarter, preowned FROM figures WHERE code >= ?1 \
             ORDER BY code ASC LIMIT 1",
            code,
        )
    }

    fn insert(&self, reference: &CodeReference) -> Result<()> {
        let inserted = self
            .conn
            .lock()
            .execute(
                "INSERT OR IGNORE INTO figures (code, quarter, preowned) VALUES (?1, ?2, ?3)",
                params![reference.code.get(), reference.quarter.compact(), reference.preowned],
            )
            .map_err(FigfallError::store)?;
        debug!(code = %reference.code, quarter = %reference.quarter, inserted, "stored mapping");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference(code: u32, quarter: &str) -> CodeReference {
        CodeReference::new(ItemCode(code), false, quarter.parse().unwrap())
    }

    #[test]
    fn round_trips_through_the_figures_table() {
        let store = SqliteStore::open_in_memory().unwrap();
        let reference = CodeReference::new(ItemCode(23698), true, "164".parse().unwrap());
        store.insert(&reference).unwrap();

        let loaded = store.get(ItemCode(23698)).unwrap().unwrap();
        assert_eq!(loaded, reference);
    }

    #[test]
    fn nearest_queries_match_the_memory_store() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(&reference(100_000, "171")).unwrap();
        store.insert(&reference(100_100, "172")).unwrap();

        let below = store.nearest_below(ItemCode(100_050)).unwrap().unwrap();
        let above = store.nearest_above(ItemCode(100_050)).unwrap().unwrap();
        assert_eq!(below.quarter.to_string(), "171");
        assert_eq!(above.quarter.to_string(), "172");
        assert!(store.nearest_below(ItemCode(99_999)).unwrap().is_none());
    }

    #[test]
    fn insert_or_ignore_keeps_the_first_mapping() {
        let store = SqliteStore::open_in_memory().unwrap();
        store.insert(&reference(5, "181")).unwrap();
        store.insert(&reference(5, "204")).unwrap();
        assert_eq!(store.get(ItemCode(5)).unwrap().unwrap().quarter.to_string(), "181");
    }
}
