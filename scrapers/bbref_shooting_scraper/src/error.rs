/// Per-item failures. Harvest loops log these and move on to the next item.
#[derive(Debug, thiserror::Error)]
pub enum ScrapeError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("HTTP {status} from {url}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("no profile URL can be derived from name {0:?}")]
    UnusableName(String),
    #[error("table #{table_id} not found at {url}")]
    MissingTable { url: String, table_id: String },
}

impl ScrapeError {
    /// Fetch failures and unusable names both mean no page was loaded.
    pub fn is_fetch_failure(&self) -> bool {
        !matches!(self, ScrapeError::MissingTable { .. })
    }
}
