//! Resilient catalog-lookup fallback.
//!
//! When the primary product API degrades (blocked, rate-limited, truncated
//! response bodies), this crate still answers "does an item exist, and if so
//! where is its image" using two tools:
//!
//! - [`repair`] / [`recover`]: best-effort repair of corrupted JSON payloads;
//! - [`ProbeSearch`]: a bounded numerical search that guesses a catalog
//!   partition ([`Quarter`]) for an item code and confirms it by probing the
//!   remote image host.
//!
//! [`FallbackClient`] wires the production collaborators (SQLite store, HTTP
//! prober) together; every collaborator can also be constructed and injected
//! individually.

pub use figfall_error::{FigfallError, Result};
pub use figfall_probe::{HttpProber, ProbeConfig, ProbeOutcome, Prober};
pub use figfall_repair::{recover, repair};
pub use figfall_search::{
    MAX_PROBE_ATTEMPTS, PROBE_BACKOFF, ProbeSearch, SearchConfig, SearchOutcome, estimate,
    initial_guess,
};
pub use figfall_store::{MappingStore, MemoryStore, SqliteStore};
pub use figfall_types::{CodeReference, ItemCode, Quarter, RawCode};

use std::path::PathBuf;

/// Configuration for the production [`FallbackClient`].
#[derive(Debug, Clone, Default)]
pub struct FallbackOptions {
    /// Mapping-store database path; `None` keeps the store in memory.
    pub db_path: Option<PathBuf>,
    /// Probe endpoint configuration.
    pub probe: ProbeConfig,
    /// Search tuning.
    pub search: SearchConfig,
}

/// Catalog fallback over the SQLite store and the HTTP prober.
pub struct FallbackClient {
    search: ProbeSearch<SqliteStore, HttpProber>,
}

impl FallbackClient {
    /// Open the store, build the HTTP client, and wire up the search.
    pub fn open(options: FallbackOptions) -> Result<Self> {
        let store = match &options.db_path {
            Some(path) => SqliteStore::open(path)?,
            None => SqliteStore::open_in_memory()?,
        };
        let prober = HttpProber::new(options.probe)?;
        Ok(Self { search: ProbeSearch::with_config(store, prober, options.search) })
    }

    /// Look up a raw catalog code (`"023698"` / `"023698-R"`).
    pub fn lookup(&self, raw: &str) -> Result<SearchOutcome> {
        self.search.search(raw)
    }

    /// Record a known mapping, seeding future estimates.
    pub fn add_known(&self, reference: &CodeReference) -> Result<()> {
        self.search.store().insert(reference)
    }
}
