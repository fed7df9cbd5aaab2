//! Product extraction from a results page.
//!
//! Each product card yields a name and a price label. Cards whose price
//! cannot be parsed, or that have no name, are skipped on their own; they
//! never fail the page.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};

use crate::config::SelectorConfig;
use crate::error::{Result, ScrapeError};
use crate::normalize::normalize;
use crate::price::parse_price;
use crate::types::ProductRecord;

/// Compiled CSS selectors for product cards.
#[derive(Debug, Clone)]
pub struct ProductSelectors {
    card: Selector,
    name: Selector,
    price: Selector,
}

impl ProductSelectors {
    /// Compile the configured selector strings.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] if any selector is not valid CSS.
    pub fn compile(config: &SelectorConfig) -> Result<Self> {
        Ok(Self {
            card: parse_selector("card", &config.card)?,
            name: parse_selector("name", &config.name)?,
            price: parse_selector("price", &config.price)?,
        })
    }
}

fn parse_selector(field: &str, css: &str) -> Result<Selector> {
    Selector::parse(css)
        .map_err(|e| ScrapeError::Config(format!("invalid {field} selector {css:?}: {e:?}")))
}

/// Extract every product on the page whose name matches `term`.
///
/// Matching is accent- and case-insensitive substring containment. An empty
/// set means the page had no matching cards, which the paginator treats as
/// the end of the listing.
pub fn extract_products(
    html: &str,
    term: &str,
    selectors: &ProductSelectors,
) -> HashSet<ProductRecord> {
    let document = Html::parse_document(html);
    let needle = normalize(term);

    let mut records = HashSet::new();
    let mut cards = 0usize;

    for card in document.select(&selectors.card) {
        cards += 1;

        let Some(name) = element_text(card, &selectors.name) else {
            tracing::debug!(card = cards, "skipping card without a name");
            continue;
        };

        let price_label = element_text(card, &selectors.price).unwrap_or_default();
        let price = match parse_price(&price_label) {
            Ok(price) => price,
            Err(err) => {
                tracing::warn!(%name, error = %err, "skipping card with unparseable price");
                continue;
            }
        };

        if normalize(&name).contains(&needle) {
            records.insert(ProductRecord::new(name, price));
        }
    }

    tracing::debug!(cards, matched = records.len(), "products extracted");
    records
}

/// Whitespace-collapsed text of every `selector` match under `card`,
/// or `None` if there is none.
fn element_text(card: ElementRef<'_>, selector: &Selector) -> Option<String> {
    let text = card
        .select(selector)
        .flat_map(|el| el.text())
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ");

    (!text.is_empty()).then_some(text)
}
