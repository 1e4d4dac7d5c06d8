use std::sync::Arc;

use crate::config::Config;
use crate::firecrawl::ExtractionApi;
use crate::llm_client::CompletionApi;
use crate::recommend::fetcher::HtmlSource;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Built once at startup. Every outbound service sits behind a trait object so
/// tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Markdown scrapes and per-link job extraction.
    pub extraction: Arc<dyn ExtractionApi>,
    /// Direct page download for the HTML fallback.
    pub html: Arc<dyn HtmlSource>,
    pub llm: Arc<dyn CompletionApi>,
}
