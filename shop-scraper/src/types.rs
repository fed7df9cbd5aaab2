//! Core types for product records and page locations.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single product listing extracted from a results page.
///
/// Equality and hashing cover both fields, so the same product seen on two
/// pages collapses to one entry in a [`SearchResult`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductRecord {
    name: String,
    price: Decimal,
}

impl ProductRecord {
    /// Create a record from a product name and its price.
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }

    /// The product name as shown on the listing card.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The listed price.
    pub fn price(&self) -> Decimal {
        self.price
    }
}

impl fmt::Display for ProductRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: ${}", self.name, self.price)
    }
}

/// Deduplicated union of every record found for a search.
pub type SearchResult = HashSet<ProductRecord>;

/// How the configured base source is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    /// A live web address; results are paginated.
    Remote,
    /// A local HTML fixture; always exactly one page.
    Local,
}

impl SourceKind {
    /// Classify a base source string.
    ///
    /// Anything containing `"www."` or `"http"` is treated as a web address,
    /// everything else as a file path.
    pub fn detect(source: &str) -> Self {
        if source.contains("www.") || source.contains("http") {
            Self::Remote
        } else {
            Self::Local
        }
    }
}

/// Where one results page is read from.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PageLocator {
    /// Page `page` of the remote listing, fetched from `url`.
    Remote {
        /// Full page URL, page index included.
        url: String,
        /// 1-based page index.
        page: u32,
    },
    /// The single page of a local fixture.
    Local {
        /// Path to the HTML file.
        path: PathBuf,
    },
}

impl PageLocator {
    /// 1-based index of this page. A local fixture is always page 1.
    pub fn page(&self) -> u32 {
        match self {
            Self::Remote { page, .. } => *page,
            Self::Local { .. } => 1,
        }
    }
}

impl fmt::Display for PageLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Remote { url, .. } => f.write_str(url),
            Self::Local { path } => write!(f, "{}", path.display()),
        }
    }
}

/// Records extracted from one page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageResult {
    /// 1-based page index.
    pub page: u32,
    /// Matching records found on the page.
    pub records: HashSet<ProductRecord>,
}

impl PageResult {
    /// A page with no records marks the end of the listing.
    pub fn is_boundary(&self) -> bool {
        self.records.is_empty()
    }
}
