//! Catalog time-partition arithmetic.
//!
//! A quarter renders as `"{year}{index}"` with no zero-padding on the year
//! (`"171"` = year 17, Q1), matching catalog partition naming. The canonical
//! comparable form is the linearization `n = year*4 + index`, inverted as
//! `index = ((n-1) mod 4) + 1`, `year = (n-1) div 4`. That inverse is exact
//! for every index in `1..=4`; it supersedes an upstream variant that mapped
//! `n mod 4 == 0` by borrowing from the year after the fact.

use std::fmt;
use std::str::FromStr;

use figfall_error::{FigfallError, Result};
use serde::{Deserialize, Serialize};

/// A catalog time partition: `(year, index)` with `index` in `1..=4`.
///
/// Immutable value; all arithmetic returns a new `Quarter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Quarter {
    year: i32,
    index: u8,
}

impl Quarter {
    /// Build a quarter, normalizing any out-of-range index through the
    /// linearized form.
    #[must_use]
    pub fn new(year: i32, index: u8) -> Self {
        if (1..=4).contains(&index) {
            Self { year, index }
        } else {
            Self::from_linear(i64::from(year) * 4 + i64::from(index))
        }
    }

    /// Year component.
    #[must_use]
    pub const fn year(self) -> i32 {
        self.year
    }

    /// Quarter index, always in `1..=4`.
    #[must_use]
    pub const fn index(self) -> u8 {
        self.index
    }

    /// Canonical comparable/addable form: `year*4 + index`.
    #[must_use]
    pub const fn linearize(self) -> i64 {
        self.year as i64 * 4 + self.index as i64
    }

    /// Canonical inverse of [`Quarter::linearize`].
    #[must_use]
    pub fn from_linear(n: i64) -> Self {
        let index = (n - 1).rem_euclid(4) + 1;
        let year = (n - 1).div_euclid(4);
        Self { year: year as i32, index: index as u8 }
    }

    /// Return the quarter `delta` steps away. Negative deltas step backward.
    #[must_use]
    pub fn add_quarters(self, delta: i64) -> Self {
        Self::from_linear(self.linearize() + delta)
    }

    /// Compact decimal form used by the mapping store and catalog URLs:
    /// `"171"` stored as the integer `171`.
    #[must_use]
    pub const fn compact(self) -> i64 {
        self.year as i64 * 10 + self.index as i64
    }

    /// Inverse of [`Quarter::compact`].
    pub fn from_compact(n: i64) -> Result<Self> {
        let index = n.rem_euclid(10);
        let year = n.div_euclid(10);
        if !(1..=4).contains(&index) {
            return Err(FigfallError::BadQuarter { value: n.to_string() });
        }
        Ok(Self { year: year as i32, index: index as u8 })
    }
}

impl FromStr for Quarter {
    type Err = FigfallError;

    /// Parse a `"YYQ"` partition name: first two characters are the year,
    /// the remainder is the quarter digit.
    fn from_str(s: &str) -> Result<Self> {
        let bad = || FigfallError::BadQuarter { value: s.to_owned() };
        if s.len() < 3 || !s.is_char_boundary(2) {
            return Err(bad());
        }
        let (year_part, index_part) = s.split_at(2);
        let year: i32 = year_part.parse().map_err(|_| bad())?;
        let index: u8 = index_part.parse().map_err(|_| bad())?;
        if !(1..=4).contains(&index) {
            return Err(bad());
        }
        Ok(Self { year, index })
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.year, self.index)
    }
}
