//! Extraction API client — wraps Firecrawl's `v1/scrape` endpoint.
//!
//! Two call shapes go through here: a markdown scrape of the careers page and a
//! schema-constrained extraction of a single job posting. Callers treat every
//! `ScrapeError` as "no value" and keep going.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::debug;

use crate::models::job::ExtractedJob;

const SCRAPE_PATH: &str = "/v1/scrape";
const MARKDOWN_TIMEOUT: Duration = Duration::from_secs(45);
const EXTRACT_TIMEOUT: Duration = Duration::from_secs(60);
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);
/// Upstream error bodies are truncated to this many characters in diagnostics.
const ERROR_PREVIEW_CHARS: usize = 200;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Extraction credits insufficient (402)")]
    QuotaExhausted,

    #[error("Extraction API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Extraction API reported failure: {0}")]
    Reported(String),

    #[error("Extraction returned no data")]
    EmptyExtraction,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Outbound seam for the extraction service.
///
/// Carried in `AppState` as `Arc<dyn ExtractionApi>`.
#[async_trait]
pub trait ExtractionApi: Send + Sync {
    /// Scrapes `url` and returns its markdown rendering (possibly empty).
    async fn scrape_markdown(&self, url: &str) -> Result<String, ScrapeError>;

    /// Extracts one structured job record from the posting at `url`.
    async fn extract_job(&self, url: &str) -> Result<ExtractedJob, ScrapeError>;
}

#[derive(Debug, Serialize)]
struct ScrapeRequest<'a> {
    url: &'a str,
    formats: [&'a str; 1],
    #[serde(skip_serializing_if = "Option::is_none")]
    extract: Option<ExtractOptions>,
}

#[derive(Debug, Serialize)]
struct ExtractOptions {
    schema: Value,
}

#[derive(Debug, Deserialize)]
struct ScrapeResponse {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    data: Option<ScrapeData>,
    #[serde(default)]
    error: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ScrapeData {
    #[serde(default)]
    markdown: Option<String>,
    #[serde(default)]
    extract: Option<Value>,
}

impl ScrapeResponse {
    fn into_data(self) -> Result<ScrapeData, ScrapeError> {
        if !self.success {
            let reason = self
                .error
                .or(self.message)
                .unwrap_or_else(|| "no reason given".to_string());
            return Err(ScrapeError::Reported(reason));
        }
        Ok(self.data.unwrap_or_default())
    }
}

/// JSON schema sent with every job extraction call. All six fields are required.
pub fn job_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "job_title": {"type": "string"},
            "sub_division_of_organization": {"type": "string"},
            "key_skills": {"type": "array", "items": {"type": "string"}},
            "compensation": {"type": "string"},
            "location": {"type": "string"},
            "apply_link": {"type": "string"}
        },
        "required": [
            "job_title",
            "sub_division_of_organization",
            "key_skills",
            "compensation",
            "location",
            "apply_link"
        ]
    })
}

/// Turns the `extract` payload into a job record. An absent or empty object is no record.
fn job_from_extract(extract: Option<Value>) -> Result<ExtractedJob, ScrapeError> {
    match extract {
        Some(Value::Object(fields)) if !fields.is_empty() => {
            Ok(serde_json::from_value(Value::Object(fields))?)
        }
        _ => Err(ScrapeError::EmptyExtraction),
    }
}

fn preview(body: &str) -> String {
    body.chars().take(ERROR_PREVIEW_CHARS).collect()
}

/// Firecrawl-backed implementation of [`ExtractionApi`].
#[derive(Clone)]
pub struct FirecrawlClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FirecrawlClient {
    pub fn new(base_url: &str, api_key: Option<String>) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: Client::builder().connect_timeout(CONNECT_TIMEOUT).build()?,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        })
    }

    async fn scrape(
        &self,
        body: &ScrapeRequest<'_>,
        timeout: Duration,
    ) -> Result<ScrapeData, ScrapeError> {
        let mut request = self
            .client
            .post(format!("{}{SCRAPE_PATH}", self.base_url))
            .timeout(timeout)
            .json(body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();

        if status == StatusCode::PAYMENT_REQUIRED {
            return Err(ScrapeError::QuotaExhausted);
        }
        if status != StatusCode::OK {
            let text = response.text().await.unwrap_or_default();
            return Err(ScrapeError::Api {
                status: status.as_u16(),
                message: preview(&text),
            });
        }

        let text = response.text().await?;
        let parsed: ScrapeResponse = serde_json::from_str(&text)?;
        debug!("Scrape of {} succeeded={}", body.url, parsed.success);
        parsed.into_data()
    }
}

#[async_trait]
impl ExtractionApi for FirecrawlClient {
    async fn scrape_markdown(&self, url: &str) -> Result<String, ScrapeError> {
        let body = ScrapeRequest {
            url,
            formats: ["markdown"],
            extract: None,
        };
        let data = self.scrape(&body, MARKDOWN_TIMEOUT).await?;
        Ok(data.markdown.unwrap_or_default())
    }

    async fn extract_job(&self, url: &str) -> Result<ExtractedJob, ScrapeError> {
        let body = ScrapeRequest {
            url,
            formats: ["extract"],
            extract: Some(ExtractOptions {
                schema: job_schema(),
            }),
        };
        let data = self.scrape(&body, EXTRACT_TIMEOUT).await?;
        job_from_extract(data.extract)
    }
}
