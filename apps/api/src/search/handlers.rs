use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::Job;
use crate::search::filter::{search_jobs, SortOrder};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub jobs: Vec<Job>,
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub sort_order: SortOrder,
    /// Per-request similarity cutoff override in [0, 1). Falls back to the
    /// configured default when absent.
    pub threshold: Option<f64>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub jobs: Vec<Job>,
    pub matched_count: usize,
    pub total_count: usize,
    pub matcher_backend: &'static str,
}

/// POST /api/v1/jobs/search
///
/// The caller supplies the job records; we return the filtered, sorted list
/// plus counts. Nothing is stored.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(req): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let threshold = match req.threshold {
        Some(t) if !(0.0..1.0).contains(&t) => {
            return Err(AppError::Validation(format!(
                "threshold must be in [0, 1), got {t}"
            )));
        }
        Some(t) => t,
        None => state.config.fuzzy_threshold,
    };

    let total_count = req.jobs.len();
    let jobs = search_jobs(
        req.jobs,
        &req.query,
        req.sort_order,
        state.matcher.as_ref(),
        threshold,
    );

    Ok(Json(SearchResponse {
        matched_count: jobs.len(),
        total_count,
        matcher_backend: state.matcher.backend(),
        jobs,
    }))
}
