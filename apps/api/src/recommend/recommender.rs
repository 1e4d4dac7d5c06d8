//! Recommender — asks the completion API to rank extracted jobs against a résumé.
//!
//! The model's answer is untrusted input. It is parsed into a fixed three-field
//! shape; anything that does not fit becomes an empty recommendation list.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::CompletionApi;
use crate::models::job::{ExtractedJob, Recommendation};
use crate::recommend::prompts::RECOMMEND_SYSTEM_TEMPLATE;

/// User message payload: the résumé plus every extracted listing.
#[derive(Debug, Serialize)]
struct RankingInput<'a> {
    resume: &'a str,
    jobs: &'a [ExtractedJob],
}

/// Entries stay untyped until the list is cut to `top_n`, so a malformed
/// entry past the cut cannot spoil the kept ones.
#[derive(Debug, Deserialize)]
struct ModelAnswer {
    #[serde(default)]
    recommendations: Option<Vec<Value>>,
}

fn build_system_prompt(top_n: usize) -> String {
    format!(
        "{} {}",
        RECOMMEND_SYSTEM_TEMPLATE.replace("{top_n}", &top_n.to_string()),
        JSON_ONLY_SYSTEM
    )
}

/// Returns at most `top_n` recommendations. Never fails: upstream or parse
/// problems are logged and produce an empty list.
pub async fn recommend(
    llm: &dyn CompletionApi,
    resume: &str,
    jobs: &[ExtractedJob],
    top_n: usize,
) -> Vec<Recommendation> {
    let user = match serde_json::to_string(&RankingInput { resume, jobs }) {
        Ok(user) => user,
        Err(e) => {
            warn!("Could not serialize ranking input: {e}");
            return Vec::new();
        }
    };

    let raw = match llm.complete_json(&build_system_prompt(top_n), &user).await {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Recommendation call failed: {e}");
            return Vec::new();
        }
    };

    let recommendations = parse_recommendations(&raw, top_n);
    info!(
        "Model recommended {} of {} job(s)",
        recommendations.len(),
        jobs.len()
    );
    recommendations
}

/// Coerces raw model text into recommendations, truncated to `top_n`.
///
/// Any kept entry that does not fit the three-field shape empties the result.
pub fn parse_recommendations(raw: &str, top_n: usize) -> Vec<Recommendation> {
    let answer = match serde_json::from_str::<ModelAnswer>(raw) {
        Ok(answer) => answer,
        Err(e) => {
            warn!("Discarding unparseable model answer: {e}");
            return Vec::new();
        }
    };

    let mut entries = answer.recommendations.unwrap_or_default();
    entries.truncate(top_n);

    entries
        .into_iter()
        .map(serde_json::from_value::<Recommendation>)
        .collect::<Result<Vec<_>, _>>()
        .unwrap_or_else(|e| {
            warn!("Discarding malformed recommendation entry: {e}");
            Vec::new()
        })
}
