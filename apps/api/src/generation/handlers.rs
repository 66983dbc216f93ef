//! Axum route handlers for the model-backed analysis endpoints.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::models::job::JobRequirements;
use crate::models::resume::{ResumeAnalysis, ResumeRecord};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct AnalyzeResumeRequest {
    pub resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResumeResponse {
    pub analysis: ResumeAnalysis,
    /// The scored subset of `analysis`, ready to post to `/api/v1/match`.
    pub record: ResumeRecord,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeJobRequest {
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeJobResponse {
    pub job_requirements: JobRequirements,
}

/// POST /api/v1/resumes/analyze
pub async fn handle_analyze_resume(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeResumeRequest>,
) -> Result<Json<AnalyzeResumeResponse>, AppError> {
    if request.resume_text.trim().is_empty() {
        return Err(AppError::Validation("resume_text cannot be empty".to_string()));
    }

    let analysis = state.generator.analyze_resume(&request.resume_text).await;
    let record = analysis.clone().into_record(request.resume_text);
    Ok(Json(AnalyzeResumeResponse { analysis, record }))
}

/// POST /api/v1/jobs/analyze
pub async fn handle_analyze_job(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeJobRequest>,
) -> Result<Json<AnalyzeJobResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "job_description cannot be empty".to_string(),
        ));
    }

    let job_requirements = state
        .generator
        .analyze_job_requirements(&request.job_description)
        .await;
    Ok(Json(AnalyzeJobResponse { job_requirements }))
}
