//! Job Detail Extractor — one schema-constrained extraction call per apply link.

use tracing::{debug, info, warn};

use crate::firecrawl::ExtractionApi;
use crate::models::job::ExtractedJob;

/// Runs the extraction API over `links` in order, one call at a time.
///
/// A failed link contributes nothing; the surviving records keep the order of
/// the links they came from.
pub async fn extract_jobs(api: &dyn ExtractionApi, links: &[String]) -> Vec<ExtractedJob> {
    let mut jobs = Vec::with_capacity(links.len());

    for (index, link) in links.iter().enumerate() {
        match api.extract_job(link).await {
            Ok(job) => {
                debug!("Extracted '{}' from link {index}", job.job_title);
                jobs.push(job);
            }
            Err(e) => warn!("Skipping link {index} ({link}): {e}"),
        }
    }

    info!(
        "Extracted {} job record(s) from {} link(s)",
        jobs.len(),
        links.len()
    );
    jobs
}
