use anyhow::{Context, Result};
use std::time::Duration;
use tracing::debug;

use crate::{config::ScraperConfig, error::ScrapeError};

/// Blocking page fetcher. One request per call, no retries.
pub struct PageFetcher {
    client: reqwest::blocking::Client,
}

impl PageFetcher {
    pub fn new(config: &ScraperConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(&config.scraping.user_agent)
            .timeout(Duration::from_secs(config.scraping.request_timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client })
    }

    pub fn fetch(&self, url: &str) -> Result<String, ScrapeError> {
        let request_error = |source| ScrapeError::Request {
            url: url.to_string(),
            source,
        };

        let response = self.client.get(url).send().map_err(request_error)?;
        if !response.status().is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: response.status(),
            });
        }

        let html = response.text().map_err(request_error)?;
        debug!("Downloaded {} bytes from {}", html.len(), url);
        Ok(html)
    }
}
