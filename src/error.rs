//! Error types for the shoppinator host.

use shop_scraper::ScrapeError;

/// Top-level error type for the command-line host.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Configuration file could not be parsed or written.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The scraper could not be set up.
    #[error(transparent)]
    Scrape(#[from] ScrapeError),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AppError>;
