//! Listing URL construction.

use url::form_urlencoded;

use crate::types::PageLocator;

/// Listing path on the storefront.
const LISTING_PATH: &str = "/l/";

/// Sort order requested from the storefront, cheapest first.
pub const SORT_LOWEST_PRICE: &str = "LOWEST_SALE_PRICE";

/// A search query URL, built once per search and suffixed with the page index.
///
/// The keyword is form-encoded: spaces become `+` and anything outside the
/// unreserved set is percent-escaped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryUrl {
    prefix: String,
}

impl QueryUrl {
    /// Build the query URL for `term` against the storefront at `base_url`.
    pub fn new(base_url: &str, term: &str) -> Self {
        let keyword: String = form_urlencoded::byte_serialize(term.as_bytes()).collect();
        let prefix = format!(
            "{}{LISTING_PATH}?keyword={keyword}&sorting={SORT_LOWEST_PRICE}&page=",
            base_url.trim_end_matches('/'),
        );
        Self { prefix }
    }

    /// Locator for the 1-based page `page`.
    pub fn page(&self, page: u32) -> PageLocator {
        PageLocator::Remote {
            url: format!("{}{page}", self.prefix),
            page,
        }
    }

    /// The URL without the trailing page index.
    pub fn as_str(&self) -> &str {
        &self.prefix
    }
}
