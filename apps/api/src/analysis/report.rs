use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::models::job::JobRequirements;
use crate::models::resume::ResumeRecord;
use crate::models::score::MatchScore;

/// Scores formatted for display, e.g. `"85.0%"`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorePercentages {
    pub overall_match: String,
    pub skills_match: String,
    pub experience_match: String,
    pub education_match: String,
}

impl From<&MatchScore> for ScorePercentages {
    fn from(score: &MatchScore) -> Self {
        Self {
            overall_match: percent(score.overall_match),
            skills_match: percent(score.skills_match),
            experience_match: percent(score.experience_match),
            education_match: percent(score.education_match),
        }
    }
}

fn percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

/// Everything the caller needs to render a match result.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub report_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub scores: MatchScore,
    pub percentages: ScorePercentages,
    pub resume: ResumeRecord,
    pub job_requirements: JobRequirements,
    /// Model that produced `job_requirements`, if it was resolved.
    pub model: Option<String>,
}

impl AnalysisReport {
    pub fn new(
        scores: MatchScore,
        resume: ResumeRecord,
        job_requirements: JobRequirements,
        model: Option<String>,
    ) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            percentages: ScorePercentages::from(&scores),
            scores,
            resume,
            job_requirements,
            model,
        }
    }
}
