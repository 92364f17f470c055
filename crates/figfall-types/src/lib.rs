//! Core value types for catalog-fallback lookups.
//!
//! A catalog listing is addressed by a numeric [`ItemCode`] and lives in a
//! time partition called a [`Quarter`] (`"171"` = year 17, first quarter).
//! A confirmed `code -> quarter` association is a [`CodeReference`].

pub mod code;
pub mod quarter;

pub use code::{ItemCode, RawCode};
pub use quarter::Quarter;

use serde::{Deserialize, Serialize};

/// One confirmed code-to-quarter mapping.
///
/// Created when a probe succeeds or when seeded from the mapping store.
/// Append/upsert only; this subsystem never deletes references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeReference {
    /// Numeric identifier of the catalog listing.
    pub code: ItemCode,
    /// Whether the listing is a preowned (`-R` suffixed) item.
    pub preowned: bool,
    /// Partition the listing was confirmed in.
    pub quarter: Quarter,
}

impl CodeReference {
    /// Build a reference from its parts.
    #[must_use]
    pub const fn new(code: ItemCode, preowned: bool, quarter: Quarter) -> Self {
        Self { code, preowned, quarter }
    }
}
