//! Pipeline Orchestrator — sequences the fetch, link, extraction and ranking steps.
//!
//! Flow: validate → markdown scrape → links from markdown → (HTML fallback) →
//!       per-link extraction → ranking → response.

use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::job::{ExtractedJob, Recommendation};
use crate::recommend::extractor::extract_jobs;
use crate::recommend::fetcher::{fetch_html, fetch_markdown};
use crate::recommend::links::{links_from_html, links_from_markdown};
use crate::recommend::recommender::recommend;
use crate::state::AppState;

pub const MAX_JOBS_RANGE: std::ops::RangeInclusive<u32> = 1..=30;
pub const TOP_N_RANGE: std::ops::RangeInclusive<u32> = 1..=10;

fn default_max_jobs() -> u32 {
    5
}

fn default_top_n() -> u32 {
    3
}

/// Request body for `POST /recommend`.
#[derive(Debug, Clone, Deserialize)]
pub struct RecommendRequest {
    pub resume_data: String,
    #[serde(default)]
    pub jobs_page_url: Option<String>,
    #[serde(default = "default_max_jobs")]
    pub max_jobs: u32,
    #[serde(default = "default_top_n")]
    pub top_n: u32,
}

impl RecommendRequest {
    /// Checks every field bound. Runs before any outbound call.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.resume_data.trim().is_empty() {
            return Err(AppError::Validation(
                "resume_data cannot be empty".to_string(),
            ));
        }
        if !MAX_JOBS_RANGE.contains(&self.max_jobs) {
            return Err(AppError::Validation(format!(
                "max_jobs must be between {} and {}, got {}",
                MAX_JOBS_RANGE.start(),
                MAX_JOBS_RANGE.end(),
                self.max_jobs
            )));
        }
        if !TOP_N_RANGE.contains(&self.top_n) {
            return Err(AppError::Validation(format!(
                "top_n must be between {} and {}, got {}",
                TOP_N_RANGE.start(),
                TOP_N_RANGE.end(),
                self.top_n
            )));
        }
        if let Some(url) = self.requested_page_url() {
            let is_web_url = Url::parse(url)
                .map(|u| matches!(u.scheme(), "http" | "https"))
                .unwrap_or(false);
            if !is_web_url {
                return Err(AppError::Validation(format!(
                    "jobs_page_url must be an absolute http(s) URL, got '{url}'"
                )));
            }
        }
        Ok(())
    }

    /// The caller's page URL, if one was given and is not blank.
    fn requested_page_url(&self) -> Option<&str> {
        self.jobs_page_url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
    }
}

/// Every intermediate artifact of a run, so callers can audit the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RecommendResponse {
    pub apply_links: Vec<String>,
    pub extracted_jobs: Vec<ExtractedJob>,
    pub recommendations: Vec<Recommendation>,
}

/// Runs the full pipeline for one request.
///
/// Returns an error only for an invalid request. Finding no links is an
/// ordinary, empty response.
pub async fn recommend_jobs(
    state: &AppState,
    request: RecommendRequest,
) -> Result<RecommendResponse, AppError> {
    request.validate()?;

    let page_url = request
        .requested_page_url()
        .unwrap_or(state.config.default_jobs_page_url.as_str());
    let max_links = request.max_jobs as usize;
    let keywords = &state.config.link_keywords;

    info!("Recommending up to {} job(s) from {page_url}", request.top_n);

    let mut links = match fetch_markdown(state.extraction.as_ref(), page_url).await {
        Some(markdown) => links_from_markdown(&markdown, &keywords.markdown, max_links),
        None => Vec::new(),
    };

    if links.is_empty() {
        info!("No links from markdown, falling back to HTML for {page_url}");
        if let Some(html) = fetch_html(state.html.as_ref(), page_url).await {
            links = links_from_html(&html, page_url, &keywords.html, max_links);
        }
    }

    if links.is_empty() {
        info!("No candidate job links found on {page_url}");
        return Ok(RecommendResponse::default());
    }

    info!("Found {} candidate job link(s)", links.len());

    let extracted_jobs = extract_jobs(state.extraction.as_ref(), &links).await;
    let recommendations = recommend(
        state.llm.as_ref(),
        &request.resume_data,
        &extracted_jobs,
        request.top_n as usize,
    )
    .await;

    Ok(RecommendResponse {
        apply_links: links,
        extracted_jobs,
        recommendations,
    })
}
