//! Page Fetcher — retrieves the careers page, markdown first, raw HTML as the fallback.
//!
//! Both entry points swallow their error after logging it: the orchestrator only
//! cares whether content came back.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, warn};

use crate::firecrawl::ExtractionApi;

const HTML_TIMEOUT: Duration = Duration::from_secs(30);
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

#[derive(Debug, Error)]
pub enum PageFetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Page returned status {0}")]
    Status(u16),
}

/// Direct page download used when the extraction API gives us nothing to work with.
#[async_trait]
pub trait HtmlSource: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String, PageFetchError>;
}

pub struct HttpHtmlSource {
    client: Client,
}

impl HttpHtmlSource {
    pub fn new() -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(HTML_TIMEOUT)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HtmlSource for HttpHtmlSource {
    async fn fetch_html(&self, url: &str) -> Result<String, PageFetchError> {
        let response = self.client.get(url).send().await?;

        if !response.status().is_success() {
            return Err(PageFetchError::Status(response.status().as_u16()));
        }

        Ok(response.text().await?)
    }
}

/// Markdown rendering of `url`, or `None` when the scrape failed or came back blank.
pub async fn fetch_markdown(api: &dyn ExtractionApi, url: &str) -> Option<String> {
    match api.scrape_markdown(url).await {
        Ok(markdown) if !markdown.trim().is_empty() => {
            debug!("Scraped {} bytes of markdown from {url}", markdown.len());
            Some(markdown)
        }
        Ok(_) => {
            warn!("Markdown scrape of {url} returned no content");
            None
        }
        Err(e) => {
            warn!("Markdown scrape of {url} failed: {e}");
            None
        }
    }
}

/// Raw HTML of `url`, or `None` on any failure.
pub async fn fetch_html(source: &dyn HtmlSource, url: &str) -> Option<String> {
    match source.fetch_html(url).await {
        Ok(html) if !html.trim().is_empty() => Some(html),
        Ok(_) => {
            warn!("Fallback fetch of {url} returned an empty body");
            None
        }
        Err(e) => {
            warn!("Fallback fetch of {url} failed: {e}");
            None
        }
    }
}
