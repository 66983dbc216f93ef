use std::sync::Arc;

use crate::config::Config;
use crate::generation::StructuredInfoGenerator;
use crate::matching::scorer::MatchScorer;
use crate::parser::ResumeParser;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub parser: ResumeParser,
    pub generator: StructuredInfoGenerator,
    /// Pluggable scorer. Default: `ResumeMatcher` with the configured weights.
    pub scorer: Arc<dyn MatchScorer>,
}
