//! Host configuration loaded from `config.toml`.
//!
//! The file holds logging and output preferences plus a `[scraper]` table
//! that maps onto [`ScraperConfig`]. Every key is optional.
//!
//! ```toml
//! log_filter = "shoppinator=debug,shop_scraper=debug"
//! format = "json"
//!
//! [scraper]
//! base_source = "https://www.fravega.com"
//! max_concurrency = 4
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shop_scraper::ScraperConfig;

use crate::error::{AppError, Result};

/// Default `tracing` filter when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_FILTER: &str = "shoppinator=info,shop_scraper=info";

/// How search results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned price / name columns.
    #[default]
    Table,
    /// One JSON array of `{name, price}` objects.
    Json,
}

/// Full configuration for the command-line host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// `tracing` env-filter directive used when `RUST_LOG` is unset.
    pub log_filter: String,
    /// Output format for results.
    pub format: OutputFormat,
    /// Storefront scraper settings.
    pub scraper: ScraperConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_filter: DEFAULT_LOG_FILTER.into(),
            format: OutputFormat::default(),
            scraper: ScraperConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid TOML.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| AppError::Config(format!("{}: {e}", path.display())))
    }

    /// Load `path` if given, otherwise the default config file if it
    /// exists, otherwise built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => {
                let default_path = Self::default_config_path();
                if default_path.is_file() {
                    Self::from_file(&default_path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self).map_err(|e| AppError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    ///
    /// `$SHOPPINATOR_CONFIG_DIR/config.toml` when the variable is set,
    /// otherwise `config.toml` under the platform config directory
    /// (`~/.config/shoppinator/` on Linux).
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        if let Some(dir) = std::env::var_os("SHOPPINATOR_CONFIG_DIR") {
            return PathBuf::from(dir).join("config.toml");
        }
        dirs::config_dir()
            .map(|d| d.join("shoppinator"))
            .unwrap_or_else(|| PathBuf::from("/tmp/shoppinator-config"))
            .join("config.toml")
    }
}
