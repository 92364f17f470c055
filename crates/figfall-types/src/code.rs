//! Catalog code parsing.
//!
//! A raw listing code looks like `"023698"` or `"023698-R"`; the `-R` suffix
//! marks a preowned listing. The numeric part addresses the item in both the
//! mapping store and the probe URL (where it is zero-padded to six digits).

use std::fmt;
use std::str::FromStr;

use figfall_error::{FigfallError, Result};
use serde::{Deserialize, Serialize};

/// Numeric identifier portion of a catalog listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemCode(pub u32);

impl ItemCode {
    /// Raw numeric value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// Zero-padded six-digit form used in probe URLs.
    #[must_use]
    pub fn padded(self) -> String {
        format!("{:06}", self.0)
    }
}

impl fmt::Display for ItemCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A parsed raw code: the numeric identifier plus the preowned marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawCode {
    /// Numeric identifier.
    pub code: ItemCode,
    /// True when the raw string carried the `-R` preowned suffix.
    pub preowned: bool,
}

impl FromStr for RawCode {
    type Err = FigfallError;

    fn from_str(s: &str) -> Result<Self> {
        let preowned = s.ends_with("-R");
        let digits = s.strip_suffix("-R").unwrap_or(s);
        let code: u32 = digits
            .parse()
            .map_err(|_| FigfallError::BadCode { value: s.to_owned() })?;
        Ok(Self { code: ItemCode(code), preowned })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_code_is_not_preowned() {
        let raw: RawCode = "023698".parse().unwrap();
        assert_eq!(raw.code, ItemCode(23698));
        assert!(!raw.preowned);
    }

    #[test]
    fn suffixed_code_is_preowned() {
        let raw: RawCode = "023698-R".parse().unwrap();
        assert_eq!(raw.code, ItemCode(23698));
        assert!(raw.preowned);
    }

    #[test]
    fn non_numeric_remainder_is_rejected() {
        assert!("FIGURE-023698".parse::<RawCode>().is_err());
        assert!("".parse::<RawCode>().is_err());
    }

    #[test]
    fn padded_form_is_six_digits() {
        assert_eq!(ItemCode(4301).padded(), "004301");
        assert_eq!(ItemCode(1234567).padded(), "1234567");
    }
}
