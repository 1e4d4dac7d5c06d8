mod config;
mod errors;
mod firecrawl;
mod llm_client;
mod models;
mod recommend;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::firecrawl::FirecrawlClient;
use crate::llm_client::LlmClient;
use crate::recommend::fetcher::HttpHtmlSource;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch API v{}", env!("CARGO_PKG_VERSION"));

    if config.firecrawl_api_key.is_none() {
        warn!("FIRECRAWL_API_KEY is not set; extraction calls will be unauthenticated");
    }
    if config.openai_api_key.is_none() {
        warn!("OPENAI_API_KEY is not set; recommendations will be empty");
    }

    let extraction = FirecrawlClient::new(
        &config.extraction_api_url,
        config.firecrawl_api_key.clone(),
    )
    .context("Failed to build extraction API client")?;
    info!("Extraction client initialized ({})", config.extraction_api_url);

    let html = HttpHtmlSource::new().context("Failed to build page fetch client")?;

    let llm = LlmClient::new(
        &config.completion_api_url,
        config.openai_api_key.clone(),
        config.completion_model.clone(),
    )
    .context("Failed to build completion API client")?;
    info!("LLM client initialized (model: {})", llm.model());

    info!(
        "Link keywords: markdown={:?} html={:?}",
        config.link_keywords.markdown, config.link_keywords.html
    );

    let state = AppState {
        config: config.clone(),
        extraction: Arc::new(extraction),
        html: Arc::new(html),
        llm: Arc::new(llm),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
