use anyhow::{Context, Result};

pub const DEFAULT_JOBS_PAGE_URL: &str =
    "https://www.google.com/about/careers/applications/jobs/results";
pub const DEFAULT_EXTRACTION_API_URL: &str = "https://api.firecrawl.dev";
pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.openai.com";
pub const DEFAULT_COMPLETION_MODEL: &str = "gpt-4o-mini";

const DEFAULT_MARKDOWN_KEYWORDS: &[&str] = &["job", "careers", "apply", "positions", "opening"];
const DEFAULT_HTML_KEYWORDS: &[&str] = &["job", "careers", "apply"];

/// Keyword vocabularies used to decide whether a discovered URL looks like a job link.
/// Always lower-case; matching is a case-insensitive substring test.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkKeywords {
    pub markdown: Vec<String>,
    pub html: Vec<String>,
}

impl Default for LinkKeywords {
    fn default() -> Self {
        Self {
            markdown: to_owned_list(DEFAULT_MARKDOWN_KEYWORDS),
            html: to_owned_list(DEFAULT_HTML_KEYWORDS),
        }
    }
}

/// Application configuration loaded from environment variables.
///
/// API keys are optional: a missing key only shows up as failed upstream calls
/// at request time, never as a startup error.
#[derive(Debug, Clone)]
pub struct Config {
    pub firecrawl_api_key: Option<String>,
    pub openai_api_key: Option<String>,
    pub extraction_api_url: String,
    pub completion_api_url: String,
    pub completion_model: String,
    pub default_jobs_page_url: String,
    pub link_keywords: LinkKeywords,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_blank = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = match non_blank("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => 8000,
        };

        Ok(Config {
            firecrawl_api_key: non_blank("FIRECRAWL_API_KEY"),
            openai_api_key: non_blank("OPENAI_API_KEY"),
            extraction_api_url: non_blank("EXTRACTION_API_URL")
                .unwrap_or_else(|| DEFAULT_EXTRACTION_API_URL.to_string()),
            completion_api_url: non_blank("COMPLETION_API_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_model: non_blank("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            default_jobs_page_url: non_blank("DEFAULT_JOBS_PAGE_URL")
                .unwrap_or_else(|| DEFAULT_JOBS_PAGE_URL.to_string()),
            link_keywords: LinkKeywords {
                markdown: keyword_list(
                    non_blank("LINK_KEYWORDS_MARKDOWN").as_deref(),
                    DEFAULT_MARKDOWN_KEYWORDS,
                ),
                html: keyword_list(
                    non_blank("LINK_KEYWORDS_HTML").as_deref(),
                    DEFAULT_HTML_KEYWORDS,
                ),
            },
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

/// Parses a comma-separated keyword list, falling back to `defaults` when nothing usable remains.
fn keyword_list(raw: Option<&str>, defaults: &[&str]) -> Vec<String> {
    let parsed: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect();

    if parsed.is_empty() {
        to_owned_list(defaults)
    } else {
        parsed
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
