//! Axum route handlers for the Recommendation API.

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::errors::AppError;
use crate::recommend::pipeline::{recommend_jobs, RecommendRequest, RecommendResponse};
use crate::state::AppState;

/// POST /recommend
///
/// Scrapes the careers page, extracts job postings and ranks them against the
/// résumé. Always 200 once the request is valid, even when nothing was found.
pub async fn handle_recommend(
    State(state): State<AppState>,
    payload: Result<Json<RecommendRequest>, JsonRejection>,
) -> Result<Json<RecommendResponse>, AppError> {
    let Json(request) = payload?;

    let response = recommend_jobs(&state, request).await?;

    Ok(Json(response))
}
