//! Document sources: where the listing page HTML comes from
//!
//! - `HttpSource`: blocking HTTP GET (requires the `http` feature)
//! - `FileSource`: a page saved to disk
//! - `InMemorySource`: a fixed string, for tests and piping

use crate::error::{Result, ScraperError};
use std::path::{Path, PathBuf};

/// Default listing page
pub const DEFAULT_SOURCE_URL: &str = "https://books.toscrape.com/";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Trait for anything that can hand over a raw HTML document
///
/// Any failure to obtain the document is reported as
/// [`ScraperError::Transport`].
pub trait DocumentSource {
    /// Human readable location, used in log lines
    fn describe(&self) -> String;

    /// Fetch the raw document
    fn fetch(&self) -> Result<String>;
}

#[cfg(feature = "http")]
pub use http::HttpSource;

#[cfg(feature = "http")]
mod http {
    use super::*;
    use reqwest::blocking::Client;
    use std::time::Duration;

    const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                              (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

    /// Blocking HTTP source
    pub struct HttpSource {
        client: Client,
        url: String,
    }

    impl HttpSource {
        pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
            let client = Client::builder()
                .timeout(timeout)
                .user_agent(USER_AGENT)
                .build()
                .map_err(|e| {
                    ScraperError::Transport(format!("Failed to create HTTP client: {}", e))
                })?;

            Ok(Self {
                client,
                url: url.into(),
            })
        }

        pub fn url(&self) -> &str {
            &self.url
        }
    }

    impl DocumentSource for HttpSource {
        fn describe(&self) -> String {
            self.url.clone()
        }

        fn fetch(&self) -> Result<String> {
            log::info!("Connecting to {}", self.url);
            let response = self
                .client
                .get(&self.url)
                .send()
                .map_err(|e| ScraperError::Transport(format!("HTTP request failed: {}", e)))?;

            if !response.status().is_success() {
                return Err(ScraperError::Transport(format!(
                    "{} returned status {}",
                    self.url,
                    response.status()
                )));
            }

            response
                .text()
                .map_err(|e| ScraperError::Transport(format!("Failed to read response: {}", e)))
        }
    }

}

/// Reads a listing page saved to disk
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl DocumentSource for FileSource {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn fetch(&self) -> Result<String> {
        log::info!("Reading {}", self.path.display());
        std::fs::read_to_string(&self.path).map_err(|e| {
            ScraperError::Transport(format!("Failed to read {}: {}", self.path.display(), e))
        })
    }
}

/// A document held in memory
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    html: String,
}

impl InMemorySource {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }
}

impl DocumentSource for InMemorySource {
    fn describe(&self) -> String {
        format!("<in-memory document, {} bytes>", self.html.len())
    }

    fn fetch(&self) -> Result<String> {
        Ok(self.html.clone())
    }
}
