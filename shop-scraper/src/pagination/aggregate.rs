//! Merging of per-page record sets.
//!
//! Pages are fetched independently, and the storefront's sort order can
//! drift while paging, so the same product may show up on two pages.
//! Record value-equality collapses those to one entry.

use std::collections::HashSet;

use crate::types::{ProductRecord, SearchResult};

/// Union every page's records into one deduplicated set.
pub fn aggregate<I>(pages: I) -> SearchResult
where
    I: IntoIterator<Item = HashSet<ProductRecord>>,
{
    let mut seen = 0usize;
    let mut result = SearchResult::new();

    for page in pages {
        seen += page.len();
        result.extend(page);
    }

    tracing::debug!(
        seen,
        unique = result.len(),
        duplicates = seen - result.len(),
        "page results aggregated"
    );
    result
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    fn page(records: &[(&str, i64)]) -> HashSet<ProductRecord> {
        records
            .iter()
            .map(|(name, cents)| ProductRecord::new(*name, Decimal::new(*cents, 2)))
            .collect()
    }

    #[test]
    fn disjoint_pages_union() {
        let result = aggregate(vec![
            page(&[("Mouse A", 1_000), ("Mouse B", 2_000)]),
            page(&[("Mouse C", 3_000)]),
        ]);
        assert_eq!(result.len(), 3);
    }

    #[test]
    fn same_record_on_two_pages_kept_once() {
        let result = aggregate(vec![
            page(&[("Webcam X", 199_900)]),
            page(&[("Webcam X", 199_900), ("Webcam Y", 250_000)]),
        ]);
        assert_eq!(result.len(), 2);
        assert!(result.contains(&ProductRecord::new("Webcam X", Decimal::new(199_900, 2))));
    }

    #[test]
    fn same_name_different_price_kept_apart() {
        let result = aggregate(vec![
            page(&[("Webcam X", 199_900)]),
            page(&[("Webcam X", 189_900)]),
        ]);
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn empty_input_returns_empty() {
        assert!(aggregate(Vec::new()).is_empty());
        assert!(aggregate(vec![HashSet::new(), HashSet::new()]).is_empty());
    }
}
