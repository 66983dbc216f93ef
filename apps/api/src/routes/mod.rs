pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis;
use crate::generation::handlers as generation;
use crate::matching::handlers as matching;
use crate::state::AppState;

/// Multipart framing and the job description ride on top of the file itself.
const FORM_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_file_size as usize + FORM_OVERHEAD_BYTES;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyze", post(analysis::handle_analyze))
        .route("/api/v1/resumes/parse", post(analysis::handle_parse_resume))
        .route("/api/v1/resumes/analyze", post(generation::handle_analyze_resume))
        .route("/api/v1/jobs/analyze", post(generation::handle_analyze_job))
        .route("/api/v1/match", post(matching::handle_match))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
