use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub mod archive;
pub mod page;
pub mod visited;

/// Errors raised while building a crawler or fetching a single page.
///
/// Fetch and status errors are scoped to one URL; the crawler logs them and
/// moves on.
#[derive(Debug, Error)]
pub enum CrawlerError {
    #[error("failed to build crawler: {0}")]
    Build(String),
    #[error("failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },
    #[error("unexpected status for {url}: {status}")]
    Status { url: String, status: u16 },
    #[error("invalid selector `{selector}`: {message}")]
    Selector { selector: String, message: String },
}

pub type CrawlerResult<T> = Result<T, CrawlerError>;

/// Capability to retrieve the raw HTML of a URL.
///
/// The archive crawler only talks to the network through this trait, so it
/// can be driven by an in-memory site in tests.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> CrawlerResult<String>;
}

/// Builds the HTTP client shared by every request of a crawl.
pub fn build_reqwest_client(user_agent: &str, timeout: Duration) -> CrawlerResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .timeout(timeout)
        .build()
        .map_err(|e| CrawlerError::Build(e.to_string()))
}

/// [`PageFetcher`] backed by `reqwest`.
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout: Duration) -> CrawlerResult<Self> {
        Ok(Self {
            client: build_reqwest_client(user_agent, timeout)?,
        })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> CrawlerResult<String> {
        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| CrawlerError::Fetch {
                url: url.to_string(),
                message: e.to_string(),
            })?;
        if !res.status().is_success() {
            return Err(CrawlerError::Status {
                url: url.to_string(),
                status: res.status().as_u16(),
            });
        }
        res.text().await.map_err(|e| CrawlerError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })
    }
}
