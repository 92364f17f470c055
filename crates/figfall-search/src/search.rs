//! Bounded zig-zag probe search.
//!
//! State machine per search invocation: exact store lookup (hit
//! short-circuits), nearest-below/above seeding, then up to
//! [`MAX_PROBE_ATTEMPTS`] existence probes alternating above and below the
//! initial guess with growing offset. Entirely sequential; concurrent
//! searches for different codes need no coordination, and same-code
//! deduplication is a caller concern.

use std::thread;
use std::time::Duration;

use figfall_error::Result;
use figfall_probe::{ProbeOutcome, Prober};
use figfall_store::MappingStore;
use figfall_types::{CodeReference, ItemCode, RawCode};
use tracing::{debug, info, warn};

use crate::estimator::initial_guess;

/// Existence checks per search before giving up.
pub const MAX_PROBE_ATTEMPTS: u32 = 16;

/// Fixed pause between probes, respecting the remote host's rate limits.
pub const PROBE_BACKOFF: Duration = Duration::from_millis(250);

/// Tunable search parameters; defaults match the production constants.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Probe budget per search.
    pub max_attempts: u32,
    /// Pause between consecutive probes.
    pub backoff: Duration,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self { max_attempts: MAX_PROBE_ATTEMPTS, backoff: PROBE_BACKOFF }
    }
}

/// Overall outcome of one search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// The store already held a confirmed mapping; no probe was issued.
    Hit(CodeReference),
    /// A guessed quarter was confirmed by probing and persisted.
    Confirmed {
        /// The newly confirmed mapping.
        reference: CodeReference,
        /// Body of the confirming probe (the listing's image).
        payload: Vec<u8>,
        /// Number of probes issued, including the confirming one.
        attempts: u32,
    },
    /// Probe budget exhausted, or no reference points to seed a guess.
    NotFound,
}

/// Orchestrates store lookups, estimation, and probing for one code.
pub struct ProbeSearch<S, P> {
    store: S,
    prober: P,
    config: SearchConfig,
}

impl<S: MappingStore, P: Prober> ProbeSearch<S, P> {
    /// Build a search over explicit collaborators with default tuning.
    pub fn new(store: S, prober: P) -> Self {
        Self::with_config(store, prober, SearchConfig::default())
    }

    /// Build a search with custom tuning.
    pub const fn with_config(store: S, prober: P, config: SearchConfig) -> Self {
        Self { store, prober, config }
    }

    /// The underlying mapping store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The underlying prober.
    pub const fn prober(&self) -> &P {
        &self.prober
    }

    /// Search from a raw code string (`"023698"` / `"023698-R"`).
    pub fn search(&self, raw: &str) -> Result<SearchOutcome> {
        let raw: RawCode = raw.parse()?;
        self.search_code(raw.code, raw.preowned)
    }

    /// Search for a parsed code.
    pub fn search_code(&self, code: ItemCode, preowned: bool) -> Result<SearchOutcome> {
        if let Some(existing) = self.store.get(code)? {
            debug!(%code, quarter = %existing.quarter, "store hit");
            return Ok(SearchOutcome::Hit(existing));
        }

        let below = self.store.nearest_below(code)?;
        let above = self.store.nearest_above(code)?;
        let Some(initial) = initial_guess(below.as_ref(), above.as_ref(), code) else {
            debug!(%code, "no reference points to seed a guess");
            return Ok(SearchOutcome::NotFound);
        };

        info!(%code, preowned, %initial, "guessing quarter");

        let mut quarter = initial;
        for attempt in 0..self.config.max_attempts {
            match self.prober.probe(code, quarter)? {
                ProbeOutcome::Found(payload) => {
                    let reference = CodeReference::new(code, preowned, quarter);
                    self.store.insert(&reference)?;
                    info!(%code, %quarter, attempts = attempt + 1, "confirmed quarter");
                    return Ok(SearchOutcome::Confirmed {
                        reference,
                        payload,
                        attempts: attempt + 1,
                    });
                }
                ProbeOutcome::Miss => {
                    // Zig-zag expansion around the initial guess:
                    // initial, +1, -1, +2, -2, ...
                    let sign = if attempt % 2 == 0 { 1 } else { -1 };
                    let offset = i64::from(attempt / 2) + 1;
                    quarter = initial.add_quarters(offset * sign);
                    debug!(%code, next = %quarter, attempt, "miss, retargeting");

                    if attempt + 1 < self.config.max_attempts && !self.config.backoff.is_zero() {
                        thread::sleep(self.config.backoff);
                    }
                }
            }
        }

        warn!(%code, %initial, budget = self.config.max_attempts, "probe budget exhausted");
        Ok(SearchOutcome::NotFound)
    }
}
