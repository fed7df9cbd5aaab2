//! Error types for the shop-scraper crate.
//!
//! Every variant carries a plain string message so errors stay `Send + Sync`
//! and cheap to log. Most of these never reach a caller of
//! [`crate::search`]: they are recovered per page or per card and logged.

/// Errors that can occur while scraping the storefront.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    /// A listing page could not be fetched (network, HTTP status or file I/O).
    #[error("fetch error: {0}")]
    Fetch(String),

    /// A price string did not match the `1.234,56` locale format.
    #[error("parse error: {0}")]
    Parse(String),

    /// The concurrent page dispatch was interrupted before every page finished.
    #[error("search interrupted: {0}")]
    Interrupted(String),

    /// Invalid scraper configuration (including unparseable CSS selectors).
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for shop-scraper results.
pub type Result<T> = std::result::Result<T, ScrapeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_fetch() {
        let err = ScrapeError::Fetch("connection refused".into());
        assert_eq!(err.to_string(), "fetch error: connection refused");
    }

    #[test]
    fn display_parse() {
        let err = ScrapeError::Parse("invalid price \"abc\"".into());
        assert_eq!(err.to_string(), "parse error: invalid price \"abc\"");
    }

    #[test]
    fn display_interrupted() {
        let err = ScrapeError::Interrupted("cancelled by caller".into());
        assert_eq!(err.to_string(), "search interrupted: cancelled by caller");
    }

    #[test]
    fn display_config() {
        let err = ScrapeError::Config("max_pages must be greater than 0".into());
        assert_eq!(err.to_string(), "config error: max_pages must be greater than 0");
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ScrapeError>();
    }
}
