//! Axum route handler for scoring already-structured records.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobRequirements;
use crate::models::resume::ResumeRecord;
use crate::models::score::MatchScore;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub resume: ResumeRecord,
    #[serde(default)]
    pub job_requirements: JobRequirements,
}

#[derive(Debug, Serialize)]
pub struct MatchResponse {
    pub scores: MatchScore,
}

/// POST /api/v1/match
///
/// Scores a resume record against job requirements without touching the model.
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    let scores = state
        .scorer
        .calculate_match_score(&request.resume, &request.job_requirements);
    Ok(Json(MatchResponse { scores }))
}
