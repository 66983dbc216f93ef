//! Axum route handlers for the upload-driven endpoints.
//!
//! Each request runs extraction, generation and scoring in sequence. The
//! uploaded file lives in a temp file that is removed when the handler returns,
//! whichever way it returns.

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::analysis::report::AnalysisReport;
use crate::analysis::upload::{read_upload_form, UploadedResume, JOB_DESCRIPTION_FIELD};
use crate::errors::AppError;
use crate::models::resume::ResumeRecord;
use crate::state::AppState;

/// POST /api/v1/analyze
///
/// Multipart form: `resume` (.pdf/.docx) and `job_description` (text).
/// Full pipeline: extract resume → analyze job description → score → report.
pub async fn handle_analyze(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<AnalysisReport>, AppError> {
    let mut form = read_upload_form(multipart, state.config.max_file_size).await?;

    let job_description = form
        .job_description
        .take()
        .filter(|text| !text.trim().is_empty())
        .ok_or_else(|| {
            AppError::Validation(format!(
                "multipart field '{JOB_DESCRIPTION_FIELD}' cannot be empty"
            ))
        })?;
    let upload = form.require_resume()?;

    let resume = parse_upload(&state, upload).await?;
    let job_requirements = state
        .generator
        .analyze_job_requirements(&job_description)
        .await;
    let scores = state.scorer.calculate_match_score(&resume, &job_requirements);

    info!(
        "Analysis complete: overall={:.3} skills={:.3} experience={:.3} education={:.3}",
        scores.overall_match, scores.skills_match, scores.experience_match, scores.education_match
    );

    Ok(Json(AnalysisReport::new(
        scores,
        resume,
        job_requirements,
        state.generator.model_name(),
    )))
}

/// POST /api/v1/resumes/parse
///
/// Multipart form with a single `resume` file. Returns the extracted record.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeRecord>, AppError> {
    let upload = read_upload_form(multipart, state.config.max_file_size)
        .await?
        .require_resume()?;
    let resume = parse_upload(&state, upload).await?;
    Ok(Json(resume))
}

/// Spools the upload to the temp dir and parses it off the async executor.
async fn parse_upload(state: &AppState, upload: UploadedResume) -> Result<ResumeRecord, AppError> {
    let temp_file = upload.spool(&state.config.temp_dir)?;
    let parser = state.parser.clone();
    let path = temp_file.path().to_path_buf();

    info!(
        "Parsing uploaded resume '{}' ({} bytes)",
        upload.file_name,
        upload.bytes.len()
    );

    let result = tokio::task::spawn_blocking(move || parser.parse_resume(&path))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("spawn_blocking failed in resume parsing: {e}")))?;

    // The temp file is deleted here, after parsing finished, on success and error alike.
    drop(temp_file);
    Ok(result?)
}
