//! In-memory fakes for the outbound service traits.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;

use crate::config::Config;
use crate::firecrawl::{ExtractionApi, ScrapeError};
use crate::llm_client::{CompletionApi, LlmError};
use crate::models::job::ExtractedJob;
use crate::recommend::fetcher::{HtmlSource, PageFetchError};
use crate::state::AppState;

pub fn job(title: &str, link: &str) -> ExtractedJob {
    ExtractedJob {
        job_title: title.to_string(),
        sub_division_of_organization: "Engineering".to_string(),
        key_skills: vec!["Rust".to_string()],
        compensation: String::new(),
        location: "Remote".to_string(),
        apply_link: link.to_string(),
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub listener");
    let addr = listener.local_addr().expect("stub address");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{addr}")
}

pub fn test_state(
    extraction: Arc<FakeExtraction>,
    html: Arc<FakeHtml>,
    llm: Arc<FakeLlm>,
) -> AppState {
    AppState {
        config: Config::from_lookup(|_| None).expect("default config"),
        extraction,
        html,
        llm,
    }
}

enum MarkdownReply {
    Content(String),
    QuotaExhausted,
}

/// Scripted extraction API: fixed markdown (or a 402) and a table of per-link jobs.
/// Links missing from the table fail with a reported error.
pub struct FakeExtraction {
    markdown: MarkdownReply,
    jobs: HashMap<String, ExtractedJob>,
    markdown_urls: Mutex<Vec<String>>,
    extract_calls: Mutex<Vec<String>>,
}

impl FakeExtraction {
    fn new(markdown: MarkdownReply) -> Self {
        Self {
            markdown,
            jobs: HashMap::new(),
            markdown_urls: Mutex::new(Vec::new()),
            extract_calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_markdown(markdown: &str) -> Self {
        Self::new(MarkdownReply::Content(markdown.to_string()))
    }

    pub fn quota_exhausted() -> Self {
        Self::new(MarkdownReply::QuotaExhausted)
    }

    pub fn with_job(mut self, url: &str, job: ExtractedJob) -> Self {
        self.jobs.insert(url.to_string(), job);
        self
    }

    pub fn markdown_call_count(&self) -> usize {
        self.markdown_urls.lock().unwrap().len()
    }

    pub fn markdown_urls(&self) -> Vec<String> {
        self.markdown_urls.lock().unwrap().clone()
    }

    pub fn extract_calls(&self) -> Vec<String> {
        self.extract_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ExtractionApi for FakeExtraction {
    async fn scrape_markdown(&self, url: &str) -> Result<String, ScrapeError> {
        self.markdown_urls.lock().unwrap().push(url.to_string());
        match &self.markdown {
            MarkdownReply::Content(markdown) => Ok(markdown.clone()),
            MarkdownReply::QuotaExhausted => Err(ScrapeError::QuotaExhausted),
        }
    }

    async fn extract_job(&self, url: &str) -> Result<ExtractedJob, ScrapeError> {
        self.extract_calls.lock().unwrap().push(url.to_string());
        if matches!(self.markdown, MarkdownReply::QuotaExhausted) {
            return Err(ScrapeError::QuotaExhausted);
        }
        self.jobs
            .get(url)
            .cloned()
            .ok_or_else(|| ScrapeError::Reported(format!("nothing to extract at {url}")))
    }
}

pub struct FakeHtml {
    body: Option<String>,
    calls: AtomicUsize,
}

impl FakeHtml {
    pub fn with_body(body: &str) -> Self {
        Self {
            body: Some(body.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            body: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HtmlSource for FakeHtml {
    async fn fetch_html(&self, _url: &str) -> Result<String, PageFetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.body.clone().ok_or(PageFetchError::Status(503))
    }
}

/// Completion API that returns a canned answer and records what it was sent.
pub struct FakeLlm {
    answer: Option<String>,
    calls: AtomicUsize,
    last_messages: Mutex<Option<(String, String)>>,
}

impl FakeLlm {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            answer: None,
            calls: AtomicUsize::new(0),
            last_messages: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_system_message(&self) -> Option<String> {
        self.last_messages
            .lock()
            .unwrap()
            .as_ref()
            .map(|(system, _)| system.clone())
    }

    pub fn last_user_message(&self) -> Option<String> {
        self.last_messages
            .lock()
            .unwrap()
            .as_ref()
            .map(|(_, user)| user.clone())
    }
}

#[async_trait]
impl CompletionApi for FakeLlm {
    async fn complete_json(&self, system: &str, user: &str) -> Result<String, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_messages.lock().unwrap() = Some((system.to_string(), user.to_string()));
        self.answer.clone().ok_or(LlmError::EmptyContent)
    }
}
