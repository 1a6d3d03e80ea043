//! The remote posts endpoint the sync loop pulls from and `add` publishes to.

use std::fmt;
use std::future::Future;

use quotes_core::{NewPost, Quote, RemotePost, posts_to_quotes};
use quotes_store::Config;

#[derive(Debug)]
pub enum SyncError {
    Network(reqwest::Error),
    Parse(String),
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::Network(e) => write!(f, "network error: {e}"),
            SyncError::Parse(msg) => write!(f, "invalid server response: {msg}"),
        }
    }
}

impl std::error::Error for SyncError {}

impl From<reqwest::Error> for SyncError {
    fn from(e: reqwest::Error) -> Self {
        SyncError::Network(e)
    }
}

/// Source of server quotes and sink for locally added ones.
pub trait QuoteRemote {
    fn fetch_quotes(&self) -> impl Future<Output = Result<Vec<Quote>, SyncError>> + Send;
    fn post_quote(&self, quote: &Quote) -> impl Future<Output = Result<(), SyncError>> + Send;
}

/// HTTP client for a JSON posts collection (`GET` list, `POST` create).
pub struct HttpRemote {
    http: reqwest::Client,
    url: String,
    batch_limit: usize,
    category: String,
}

impl HttpRemote {
    pub fn new(config: &Config) -> Result<Self, SyncError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            http,
            url: config.server_url.clone(),
            batch_limit: config.batch_limit,
            category: config.server_category.clone(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl QuoteRemote for HttpRemote {
    async fn fetch_quotes(&self) -> Result<Vec<Quote>, SyncError> {
        let body = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        let posts: Vec<RemotePost> =
            serde_json::from_str(&body).map_err(|e| SyncError::Parse(e.to_string()))?;
        tracing::debug!("fetched {} posts from {}", posts.len(), self.url);
        Ok(posts_to_quotes(posts, self.batch_limit, &self.category))
    }

    async fn post_quote(&self, quote: &Quote) -> Result<(), SyncError> {
        self.http
            .post(&self.url)
            .json(&NewPost::from_quote(quote))
            .send()
            .await?
            .error_for_status()?;
        tracing::debug!("posted quote to {}", self.url);
        Ok(())
    }
}
