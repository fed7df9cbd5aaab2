//! Scraper configuration with sensible defaults.
//!
//! [`ScraperConfig`] controls where listings are read from, which CSS
//! selectors locate product cards, HTTP timeouts and how many pages are
//! fetched in parallel. It deserializes from a `[scraper]` TOML table; every
//! field is optional and falls back to [`Default`].

use serde::{Deserialize, Serialize};

use crate::error::ScrapeError;

/// Storefront home used when no base source is configured.
pub const DEFAULT_BASE_SOURCE: &str = "https://www.fravega.com";

/// CSS selectors that locate product data in a results page.
///
/// The defaults match the storefront's generated class names and break
/// whenever the site is redeployed, which is why they are configuration
/// rather than code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One node per product card.
    pub card: String,
    /// Product name, relative to a card.
    pub name: String,
    /// Price label, relative to a card.
    pub price: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            card: "article.sc-ef269aa1-2.FmCUT".into(),
            name: "span.sc-6321a7c8-0.jKvHol".into(),
            price: "div.sc-854e1b3a-0.kfAWhD span.sc-ad64037f-0.ixxpWu".into(),
        }
    }
}

/// Configuration for a storefront search.
///
/// Use [`Default::default()`] for sensible defaults, or construct with
/// field overrides for custom behaviour.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Storefront base URL, or the path of a local HTML fixture.
    pub base_source: String,
    /// Per-request HTTP timeout in seconds.
    pub timeout_seconds: u64,
    /// Custom User-Agent string. If `None`, rotates through a built-in list
    /// of realistic browser User-Agents.
    pub user_agent: Option<String>,
    /// Upper bound on pages fetched in parallel. `None` uses the available
    /// hardware parallelism.
    pub max_concurrency: Option<usize>,
    /// Hard stop for page probing, for listings that never run dry.
    pub max_pages: u32,
    /// Selectors for product cards, names and prices.
    pub selectors: SelectorConfig,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_source: DEFAULT_BASE_SOURCE.into(),
            timeout_seconds: 15,
            user_agent: None,
            max_concurrency: None,
            max_pages: 500,
            selectors: SelectorConfig::default(),
        }
    }
}

impl ScraperConfig {
    /// Validates this configuration, returning an error if any field is invalid.
    ///
    /// Checks:
    /// - `base_source` must not be blank
    /// - every selector must be non-empty
    /// - `timeout_seconds` must be greater than 0
    /// - `max_concurrency`, when set, must be greater than 0
    /// - `max_pages` must be greater than 0
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.base_source.trim().is_empty() {
            return Err(ScrapeError::Config("base_source must not be empty".into()));
        }
        let selectors = [
            ("card", &self.selectors.card),
            ("name", &self.selectors.name),
            ("price", &self.selectors.price),
        ];
        for (field, selector) in selectors {
            if selector.trim().is_empty() {
                return Err(ScrapeError::Config(format!(
                    "selectors.{field} must not be empty"
                )));
            }
        }
        if self.timeout_seconds == 0 {
            return Err(ScrapeError::Config(
                "timeout_seconds must be greater than 0".into(),
            ));
        }
        if self.max_concurrency == Some(0) {
            return Err(ScrapeError::Config(
                "max_concurrency must be greater than 0".into(),
            ));
        }
        if self.max_pages == 0 {
            return Err(ScrapeError::Config(
                "max_pages must be greater than 0".into(),
            ));
        }
        Ok(())
    }

    /// Number of pages dispatched concurrently.
    pub fn worker_count(&self) -> usize {
        self.max_concurrency.unwrap_or_else(|| {
            std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
        })
    }
}
