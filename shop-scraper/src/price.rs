//! Parsing of storefront price labels such as `"$ 1.234,56"`.
//!
//! Prices use `.` as the thousands separator and `,` as the decimal
//! separator. Values are parsed into [`Decimal`] so that equality between
//! records is exact.

use std::str::FromStr;

use rust_decimal::Decimal;

use crate::error::{Result, ScrapeError};

/// Currency symbol shown in front of every price.
const CURRENCY_SYMBOL: char = '$';
const THOUSANDS_SEPARATOR: char = '.';
const DECIMAL_SEPARATOR: char = ',';

/// Parse a locale-formatted price label into an exact decimal.
///
/// One leading currency symbol and the whitespace around it (including
/// non-breaking spaces) are removed, thousands separators dropped and the
/// decimal comma turned into a point. The number of decimal places in the
/// label is preserved: `"$99,00"` parses to `99.00`.
///
/// Only ASCII digits, `.` and at most one `,` may remain once the symbol is
/// gone; exponents, `_` separators and inner spaces are rejected.
///
/// # Errors
///
/// Returns [`ScrapeError::Parse`] if the label is not a number in that format.
pub fn parse_price(raw: &str) -> Result<Decimal> {
    let label = raw.trim();
    let label = label.strip_prefix(CURRENCY_SYMBOL).unwrap_or(label).trim();

    if label.is_empty() {
        return Err(ScrapeError::Parse(format!("empty price label {raw:?}")));
    }

    let well_formed = label.starts_with(|c: char| c.is_ascii_digit())
        && label
            .chars()
            .all(|c| c.is_ascii_digit() || c == THOUSANDS_SEPARATOR || c == DECIMAL_SEPARATOR)
        && label.matches(DECIMAL_SEPARATOR).count() <= 1;
    if !well_formed {
        return Err(ScrapeError::Parse(format!("invalid price {raw:?}")));
    }

    let cleaned: String = label
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR)
        .map(|c| if c == DECIMAL_SEPARATOR { '.' } else { c })
        .collect();

    Decimal::from_str(&cleaned)
        .map_err(|e| ScrapeError::Parse(format!("invalid price {raw:?}: {e}")))
}
