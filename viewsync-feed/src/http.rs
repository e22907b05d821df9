use async_trait::async_trait;

use crate::wire::{FeedItem, FeedResponse};
use crate::{FetchError, Page, PageFetcher, Result};

/// [`PageFetcher`] for the feed proxy over HTTP.
///
/// Issues `GET <endpoint>?limit=N[&after=CURSOR]`. Non-2xx responses become
/// [`FetchError::Upstream`] carrying the proxy's `error` message.
#[derive(Clone, Debug)]
pub struct HttpFeedFetcher {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpFeedFetcher {
    /// Route of the proxy relative to the site origin.
    pub const DEFAULT_PATH: &'static str = "/api/instagram/news";

    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
        }
    }

    /// Targets [`Self::DEFAULT_PATH`] on `origin` (e.g. `https://example.com`).
    pub fn for_origin(origin: &str) -> Self {
        Self::new(format!(
            "{}{}",
            origin.trim_end_matches('/'),
            Self::DEFAULT_PATH
        ))
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Builds the page request. An empty cursor is treated as the first page.
    pub(crate) fn request(&self, cursor: Option<&str>, limit: u32) -> reqwest::RequestBuilder {
        let mut query = vec![("limit", limit.to_string())];
        if let Some(after) = cursor.filter(|c| !c.is_empty()) {
            query.push(("after", after.to_owned()));
        }
        self.client.get(&self.endpoint).query(&query)
    }
}

#[async_trait(?Send)]
impl PageFetcher for HttpFeedFetcher {
    type Item = FeedItem;
    type Error = FetchError;

    async fn fetch_page(&self, cursor: Option<&str>, limit: u32) -> Result<Page<FeedItem>> {
        vtrace!(endpoint = %self.endpoint, limit, "HttpFeedFetcher: GET");

        let response = self.request(cursor, limit).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = FetchError::upstream(status.as_u16(), &body);
            vwarn!(status = status.as_u16(), error = %err, "HttpFeedFetcher: upstream error");
            return Err(err);
        }

        let decoded: FeedResponse = serde_json::from_str(&body)?;
        Ok(decoded.into())
    }
}
