//! Page sources: turn a [`PageLocator`] into raw listing HTML.
//!
//! [`PageSource`] is the seam between the pagination logic and the outside
//! world. [`LiveSource`] is what a real search uses: remote locators go out
//! over HTTP through [`HttpSource`], local ones are read from disk by
//! [`FileSource`]. Tests plug in scripted sources instead.
//!
//! Sources return the body as a `String`; parsing into a DOM happens in
//! [`crate::extract`] because `scraper::Html` is not `Send` and cannot be
//! held across an `.await`.

use std::future::Future;
use std::path::Path;
use std::time::Duration;

use rand::Rng;

use crate::config::ScraperConfig;
use crate::error::{Result, ScrapeError};
use crate::types::PageLocator;

/// Content type sent with every listing request.
const HTML_CONTENT_TYPE: &str = "text/html; charset=UTF-8";

/// Browser User-Agent strings; one is picked per client.
const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:133.0) Gecko/20100101 Firefox/133.0",
];

/// Something that can produce the HTML of one results page.
///
/// All implementations must be `Send + Sync`: one source is shared by every
/// page task of a search.
pub trait PageSource: Send + Sync {
    /// Fetch the page at `locator` and return its body.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] if the page cannot be read.
    fn fetch(&self, locator: &PageLocator) -> impl Future<Output = Result<String>> + Send;
}

/// Fetches remote pages with a shared [`reqwest::Client`].
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
}

impl HttpSource {
    /// Wrap an existing client.
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Build a client from `config`.
    ///
    /// Cookies are kept for the lifetime of the client, responses may be
    /// gzip or brotli encoded, and the User-Agent is either the configured
    /// one or a random browser string.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] if the client cannot be constructed.
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        let user_agent = config
            .user_agent
            .clone()
            .unwrap_or_else(|| random_user_agent().to_owned());

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(user_agent)
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| ScrapeError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::new(client))
    }

    async fn get(&self, url: &str) -> Result<String> {
        tracing::trace!(url, "GET listing page");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::CONTENT_TYPE, HTML_CONTENT_TYPE)
            .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
            .send()
            .await
            .map_err(|e| ScrapeError::Fetch(format!("request to {url} failed: {e}")))?
            .error_for_status()
            .map_err(|e| ScrapeError::Fetch(format!("HTTP error from {url}: {e}")))?;

        let body = response
            .text()
            .await
            .map_err(|e| ScrapeError::Fetch(format!("reading body of {url} failed: {e}")))?;

        tracing::trace!(url, bytes = body.len(), "listing page received");
        Ok(body)
    }
}

impl PageSource for HttpSource {
    async fn fetch(&self, locator: &PageLocator) -> Result<String> {
        match locator {
            PageLocator::Remote { url, .. } => self.get(url).await,
            PageLocator::Local { path } => Err(ScrapeError::Fetch(format!(
                "HTTP source cannot read local file {}",
                path.display()
            ))),
        }
    }
}

/// Reads listing HTML saved to disk.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

impl FileSource {
    async fn read(path: &Path) -> Result<String> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| ScrapeError::Fetch(format!("cannot read {}: {e}", path.display())))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl PageSource for FileSource {
    async fn fetch(&self, locator: &PageLocator) -> Result<String> {
        match locator {
            PageLocator::Local { path } => Self::read(path).await,
            PageLocator::Remote { url, .. } => Err(ScrapeError::Fetch(format!(
                "file source cannot fetch remote page {url}"
            ))),
        }
    }
}

/// Default source: HTTP for remote locators, disk for local ones.
#[derive(Debug, Clone)]
pub struct LiveSource {
    http: HttpSource,
    files: FileSource,
}

impl LiveSource {
    /// Build the HTTP side from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Fetch`] if the HTTP client cannot be built.
    pub fn from_config(config: &ScraperConfig) -> Result<Self> {
        Ok(Self {
            http: HttpSource::from_config(config)?,
            files: FileSource,
        })
    }
}

impl PageSource for LiveSource {
    async fn fetch(&self, locator: &PageLocator) -> Result<String> {
        match locator {
            PageLocator::Remote { .. } => self.http.fetch(locator).await,
            PageLocator::Local { .. } => self.files.fetch(locator).await,
        }
    }
}

/// Pick a random User-Agent string.
pub fn random_user_agent() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..USER_AGENTS.len());
    USER_AGENTS[idx]
}
