use serde::{Deserialize, Serialize};
use std::{env, path::PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.basketball-reference.com".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScrapingConfig {
    pub user_agent: String,
    pub request_timeout_secs: u64,
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (compatible; BbrefShooting/0.1)".to_string(),
            request_timeout_secs: 30,
        }
    }
}

/// File handoff between the three stages.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OutputFiles {
    pub players: PathBuf,
    pub shooting: PathBuf,
    pub shooting_clean: PathBuf,
}

impl Default for OutputFiles {
    fn default() -> Self {
        Self {
            players: PathBuf::from("players.csv"),
            shooting: PathBuf::from("shooting.csv"),
            shooting_clean: PathBuf::from("shooting_clean.csv"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScraperConfig {
    pub site: SiteConfig,
    pub scraping: ScrapingConfig,
    pub files: OutputFiles,
}

impl ScraperConfig {
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(base_url) = env::var("BBREF_BASE_URL") {
            config.site.base_url = base_url.trim_end_matches('/').to_string();
        }
        if let Ok(user_agent) = env::var("SCRAPER_USER_AGENT") {
            config.scraping.user_agent = user_agent;
        }
        if let Ok(Some(timeout)) = env::var("SCRAPER_TIMEOUT_SECS").map_or(Ok(None), |t| t.parse::<u64>().map(Some)) {
            config.scraping.request_timeout_secs = timeout;
        }

        config
    }

    /// Points the scraper at another host, e.g. a local mock server.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.site.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}
