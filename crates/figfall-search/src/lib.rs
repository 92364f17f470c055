//! Quarter estimation and the bounded probe search.
//!
//! On a mapping-store miss, the search interpolates an initial quarter guess
//! from the nearest known references, then confirms or adjusts it with a
//! bounded zig-zag of existence probes around the guess.

mod estimator;
mod search;

pub use estimator::{estimate, initial_guess};
pub use search::{MAX_PROBE_ATTEMPTS, PROBE_BACKOFF, ProbeSearch, SearchConfig, SearchOutcome};
