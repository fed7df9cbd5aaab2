//! Shoppinator: product price search across online stores.
//!
//! This crate is the host around [`shop_scraper`]: it loads `config.toml`
//! and formats search results for the terminal; the `shoppinator` binary
//! wires both to the command line and installs logging. The
//! scraping itself lives in the `shop-scraper` workspace member.

pub mod config;
pub mod error;
pub mod output;

pub use config::{AppConfig, OutputFormat};
pub use error::{AppError, Result};
