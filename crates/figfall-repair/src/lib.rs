//! Best-effort repair of truncated JSON payloads.
//!
//! A degraded upstream API sometimes returns a response body cut off
//! mid-object. [`repair`] balances brackets and quotes and discards the
//! incomplete trailing fragment so a standard JSON parser can consume the
//! rest; [`recover`] runs that repair and the downstream parse in one step.
//!
//! Repair itself never fails. It always returns *some* string; only the
//! downstream parse can reject it, which [`recover`] surfaces as
//! [`FigfallError::RecoveryFailed`] carrying both texts for diagnostics.

mod scanner;

pub use scanner::repair;

use figfall_error::{FigfallError, Result};

/// Repair `raw` and parse the result as JSON.
pub fn recover(raw: &str) -> Result<serde_json::Value> {
    let repaired = repair(raw);
    serde_json::from_str(&repaired).map_err(|source| FigfallError::RecoveryFailed {
        original: raw.to_owned(),
        repaired,
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recover_parses_truncated_object() {
        let value = recover(r#"{"item":{"gcode":"FIGURE-178121","price":1234"#).unwrap();
        assert_eq!(value["item"]["price"], 1234);
    }

    #[test]
    fn recover_reports_both_texts_on_failure() {
        // A lone colon repairs to itself and still cannot parse.
        let err = recover(":").unwrap_err();
        match err {
            FigfallError::RecoveryFailed { original, repaired, .. } => {
                assert_eq!(original, ":");
                assert_eq!(repaired, ":");
            }
            other => panic!("expected RecoveryFailed, got {other}"),
        }
    }
}
