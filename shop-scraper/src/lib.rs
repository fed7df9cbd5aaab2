//! # shop-scraper
//!
//! Price search for a single storefront by scraping its listing pages.
//!
//! Given a product name, this crate walks the store's paginated results,
//! extracts every product card whose name matches, parses its price into an
//! exact decimal, and returns the deduplicated set of `(name, price)` records.
//!
//! ## Design
//!
//! - The number of result pages is unknown, so the last page is found by
//!   probing sequentially; the pages known to hold records are then fetched
//!   in parallel on a bounded pool
//! - Name matching ignores accents and case (`"mouse"` matches `"Mousé Óptico"`)
//! - Prices in `$ 1.234,56` format are parsed with [`rust_decimal`], never `f64`
//! - A base source that is not a web address is read as a local HTML fixture,
//!   so extraction can be exercised offline
//! - Graceful degradation: a page that fails to fetch, or a card whose price
//!   cannot be parsed, is logged and skipped without failing the search

pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod normalize;
pub mod pagination;
pub mod price;
pub mod shop;
pub mod types;

pub use config::{ScraperConfig, SelectorConfig};
pub use error::{Result, ScrapeError};
pub use fetch::{FileSource, HttpSource, LiveSource, PageSource};
pub use shop::{FravegaShop, Shop};
pub use types::{PageLocator, PageResult, ProductRecord, SearchResult, SourceKind};

/// Search the storefront for products matching `term`.
///
/// Builds a [`FravegaShop`] from `config` and runs one search. Page fetch
/// failures, unparseable prices and interruptions are logged and never
/// reported as errors; they only shrink the result set.
///
/// # Errors
///
/// Returns [`ScrapeError::Config`] if `config` is invalid, or
/// [`ScrapeError::Fetch`] if the HTTP client cannot be constructed.
///
/// # Examples
///
/// ```no_run
/// # async fn example() -> shop_scraper::Result<()> {
/// let config = shop_scraper::ScraperConfig::default();
/// let records = shop_scraper::search("mouse inalambrico", &config).await?;
/// for record in &records {
///     println!("{}: {}", record.name(), record.price());
/// }
/// # Ok(())
/// # }
/// ```
pub async fn search(term: &str, config: &ScraperConfig) -> Result<SearchResult> {
    let shop = FravegaShop::new(config)?;
    Ok(shop.search(term).await)
}

/// Search the storefront with the default configuration.
///
/// Convenience wrapper around [`search`] using [`ScraperConfig::default()`].
///
/// # Errors
///
/// Same as [`search`].
pub async fn search_default(term: &str) -> Result<SearchResult> {
    search(term, &ScraperConfig::default()).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn search_validates_config_zero_timeout() {
        let config = ScraperConfig {
            timeout_seconds: 0,
            ..Default::default()
        };
        let result = search("mouse", &config).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("timeout"));
    }

    #[tokio::test]
    async fn search_validates_config_bad_selector() {
        let config = ScraperConfig {
            selectors: SelectorConfig {
                name: "span[".into(),
                ..Default::default()
            },
            ..Default::default()
        };
        let result = search("mouse", &config).await;
        assert!(matches!(result, Err(ScrapeError::Config(_))));
    }

    #[tokio::test]
    async fn empty_term_returns_empty_without_network() {
        let results = search_default("").await.expect("valid default config");
        assert!(results.is_empty());
    }

    #[tokio::test]
    #[ignore] // Live test — run with `cargo test -- --ignored`
    async fn live_storefront_search() {
        let results = search_default("mouse").await.expect("valid default config");
        assert!(!results.is_empty());
        for record in &results {
            assert!(normalize::matches(record.name(), "mouse"));
        }
    }
}
