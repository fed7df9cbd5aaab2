//! The shop capability contract and the storefront implementation.
//!
//! Callers that compare prices across several stores only need
//! [`Shop::search`]; each store decides how it finds its listings.

use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::config::ScraperConfig;
use crate::error::Result;
use crate::fetch::{LiveSource, PageSource};
use crate::pagination::Paginator;
use crate::types::SearchResult;

/// A store that can be searched for products by name.
///
/// `search` never fails: a store that cannot be reached, or a search that
/// is interrupted, simply yields no records. Failures are logged.
pub trait Shop: Send + Sync {
    /// Human-readable store name.
    fn name(&self) -> &str;

    /// Every listing whose name matches `term`, deduplicated.
    fn search(&self, term: &str) -> impl Future<Output = SearchResult> + Send;
}

/// Scraper for the Frávega storefront.
pub struct FravegaShop<S = LiveSource> {
    paginator: Paginator<S>,
}

impl FravegaShop<LiveSource> {
    /// Build a shop that reads pages over HTTP or from disk, depending on
    /// `config.base_source`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScrapeError::Config`] if `config` is invalid, or
    /// [`crate::ScrapeError::Fetch`] if the HTTP client cannot be built.
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        config.validate()?;
        Self::with_source(LiveSource::from_config(config)?, config)
    }
}

impl<S: PageSource + 'static> FravegaShop<S> {
    /// Build a shop over a custom page source.
    ///
    /// # Errors
    ///
    /// Returns [`crate::ScrapeError::Config`] if `config` is invalid.
    pub fn with_source(source: S, config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            paginator: Paginator::new(source, config)?,
        })
    }

    /// Interrupt in-flight searches when `token` is cancelled.
    ///
    /// A cancelled token stays cancelled, so every later search on this shop
    /// yields no records without fetching anything.
    #[must_use]
    pub fn with_cancel_token(self, token: CancellationToken) -> Self {
        Self {
            paginator: self.paginator.with_cancel_token(token),
        }
    }

    /// Token that interrupts this shop's searches. Cancelling it is final;
    /// see [`Self::with_cancel_token`].
    pub fn cancel_token(&self) -> CancellationToken {
        self.paginator.cancel_token()
    }
}

impl<S: PageSource + 'static> Shop for FravegaShop<S> {
    fn name(&self) -> &str {
        "Frávega"
    }

    async fn search(&self, term: &str) -> SearchResult {
        tracing::trace!(term, shop = self.name(), "shop search");
        match self.paginator.search(term).await {
            Ok(records) => {
                tracing::debug!(shop = self.name(), count = records.len(), "shop search finished");
                records
            }
            Err(err) => {
                tracing::warn!(shop = self.name(), error = %err, "shop search aborted, returning no results");
                SearchResult::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScrapeError;
    use crate::types::PageLocator;

    /// A source that fails every fetch.
    struct Unreachable;

    impl PageSource for Unreachable {
        async fn fetch(&self, locator: &PageLocator) -> Result<String> {
            Err(ScrapeError::Fetch(format!("unreachable: {locator}")))
        }
    }

    #[test]
    fn shop_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<FravegaShop>();
        assert_send_sync::<FravegaShop<Unreachable>>();
    }

    #[test]
    fn invalid_config_rejected_at_construction() {
        let config = ScraperConfig {
            max_pages: 0,
            ..Default::default()
        };
        assert!(FravegaShop::new(&config).is_err());
    }

    #[test]
    fn shop_name() {
        let shop = FravegaShop::with_source(Unreachable, &ScraperConfig::default())
            .expect("valid config");
        assert_eq!(shop.name(), "Frávega");
    }

    #[tokio::test]
    async fn unreachable_store_yields_no_records() {
        let shop = FravegaShop::with_source(Unreachable, &ScraperConfig::default())
            .expect("valid config");
        assert!(shop.search("mouse").await.is_empty());
    }

    #[tokio::test]
    async fn cancelled_search_yields_no_records() {
        let token = CancellationToken::new();
        token.cancel();
        let shop = FravegaShop::with_source(Unreachable, &ScraperConfig::default())
            .expect("valid config")
            .with_cancel_token(token);
        assert!(shop.search("mouse").await.is_empty());
    }
}
