//! Persisted `code -> quarter` mappings.
//!
//! The store seeds the quarter estimator (nearest-below/above range queries)
//! and caches every confirmed probe result. Two implementations: an
//! in-memory [`MemoryStore`] for tests and ephemeral use, and a SQLite-backed
//! [`SqliteStore`] matching the original deployment's `figures` table.

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

use figfall_error::Result;
use figfall_types::{CodeReference, ItemCode};

/// Key-value store of confirmed code-to-quarter associations.
///
/// Upserts use insert-or-ignore semantics: an existing mapping for a code is
/// never overwritten by a later probe result. Nothing is ever deleted.
pub trait MappingStore {
    /// Exact lookup by code.
    fn get(&self, code: ItemCode) -> Result<Option<CodeReference>>;

    /// Nearest known reference with `code <= target`, highest first.
    fn nearest_below(&self, code: ItemCode) -> Result<Option<CodeReference>>;

    /// Nearest known reference with `code >= target`, lowest first.
    fn nearest_above(&self, code: ItemCode) -> Result<Option<CodeReference>>;

    /// Record a confirmed mapping; a no-op if the code is already present.
    fn insert(&self, reference: &CodeReference) -> Result<()>;
}
