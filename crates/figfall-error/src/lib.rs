//! Shared error type and `Result` alias for the figfall workspace.
//!
//! `NotFound` is deliberately *not* an error: an exhausted probe budget or an
//! unseedable estimate is a normal outcome, modeled as an outcome variant in
//! the search crate instead. Only conditions that abort the current operation
//! live here.

use thiserror::Error;

/// Workspace-wide result alias.
pub type Result<T> = std::result::Result<T, FigfallError>;

/// All fatal error conditions produced by figfall crates.
#[derive(Debug, Error)]
pub enum FigfallError {
    /// A quarter string whose year or index segment is not numeric, or whose
    /// index falls outside `1..=4`.
    #[error("malformed quarter {value:?}")]
    BadQuarter {
        /// The offending input.
        value: String,
    },

    /// A raw catalog code that does not reduce to a numeric code.
    #[error("malformed item code {value:?}")]
    BadCode {
        /// The offending input.
        value: String,
    },

    /// The repaired payload still fails to parse as JSON.
    ///
    /// Carries both texts so the caller can log them for diagnostics; repair
    /// itself never fails, only this downstream parse does.
    #[error("repaired payload still unparseable: {source}")]
    RecoveryFailed {
        /// Payload as received.
        original: String,
        /// Payload after bracket/quote balancing.
        repaired: String,
        /// The parse failure on the repaired text.
        source: serde_json::Error,
    },

    /// A probe failure other than a well-formed miss (timeout, 5xx, DNS).
    ///
    /// Fatal for the current search; never folded into a miss, because a miss
    /// consumes the bounded attempt budget and a transport failure must not.
    #[error("probe transport failure: {message}")]
    Transport {
        /// Human-readable description of the underlying failure.
        message: String,
    },

    /// A mapping-store failure (I/O, SQL).
    #[error("mapping store failure: {message}")]
    Store {
        /// Human-readable description of the underlying failure.
        message: String,
    },
}

impl FigfallError {
    /// Build a [`FigfallError::Transport`] from any displayable source.
    pub fn transport(source: impl std::fmt::Display) -> Self {
        Self::Transport { message: source.to_string() }
    }

    /// Build a [`FigfallError::Store`] from any displayable source.
    pub fn store(source: impl std::fmt::Display) -> Self {
        Self::Store { message: source.to_string() }
    }
}
