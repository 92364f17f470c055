//! Existence probes for `(code, quarter)` guesses.
//!
//! A probe asks the remote image host whether a listing exists in a guessed
//! partition. The outcome is deliberately tri-state: a well-defined 404 is a
//! [`ProbeOutcome::Miss`] and spends one attempt of the search budget, while
//! any other failure (timeout, 5xx, DNS) is a transport error that aborts
//! the search without consuming budget.

use std::time::Duration;

use figfall_error::{FigfallError, Result};
use figfall_types::{ItemCode, Quarter};
use tracing::debug;

/// Result of one existence check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The resource exists; carries its body (the listing's main image).
    Found(Vec<u8>),
    /// Well-defined "not present" response.
    Miss,
}

/// One existence check against an external resource.
pub trait Prober {
    /// Check whether the resource for `(code, quarter)` exists.
    fn probe(&self, code: ItemCode, quarter: Quarter) -> Result<ProbeOutcome>;
}

/// Where and how to probe.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Base URL of the image host, without a trailing slash.
    pub base_url: String,
    /// Filename prefix in front of the zero-padded code.
    pub item_prefix: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://img.amiami.com/images/product/main".to_owned(),
            item_prefix: "FIGURE".to_owned(),
            timeout: Duration::from_secs(15),
        }
    }
}

impl ProbeConfig {
    /// Resource URL for a guess: `{base}/{quarter}/{prefix}-{code:06}.jpg`.
    #[must_use]
    pub fn resource_url(&self, code: ItemCode, quarter: Quarter) -> String {
        format!("{}/{}/{}-{}.jpg", self.base_url, quarter, self.item_prefix, code.padded())
    }
}

/// Blocking HTTP prober.
pub struct HttpProber {
    client: reqwest::blocking::Client,
    config: ProbeConfig,
}

impl HttpProber {
    /// Build a prober with its own connection pool.
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(FigfallError::transport)?;
        Ok(Self { client, config })
    }

    /// Probe configuration in use.
    #[must_use]
    pub const fn config(&self) -> &ProbeConfig {
        &self.config
    }
}

impl Prober for HttpProber {
    fn probe(&self, code: ItemCode, quarter: Quarter) -> Result<ProbeOutcome> {
        let url = self.config.resource_url(code, quarter);
        let response = self.client.get(&url).send().map_err(FigfallError::transport)?;
        let status = response.status();
        debug!(%url, %status, "probed");

        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(ProbeOutcome::Miss);
        }
        if status.is_success() {
            let body = response.bytes().map_err(FigfallError::transport)?;
            return Ok(ProbeOutcome::Found(body.to_vec()));
        }
        Err(FigfallError::Transport { message: format!("unexpected status {status} for {url}") })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_url_zero_pads_the_code() {
        let config = ProbeConfig::default();
        let url = config.resource_url(ItemCode(4301), "171".parse().unwrap());
        assert_eq!(url, "https://img.amiami.com/images/product/main/171/FIGURE-004301.jpg");
    }

    #[test]
    fn resource_url_honors_custom_base_and_prefix() {
        let config = ProbeConfig {
            base_url: "http://localhost:8080/img".to_owned(),
            item_prefix: "ITEM".to_owned(),
            ..ProbeConfig::default()
        };
        let url = config.resource_url(ItemCode(123_456), "204".parse().unwrap());
        assert_eq!(url, "http://localhost:8080/img/204/ITEM-123456.jpg");
    }
}
