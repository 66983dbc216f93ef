//! Match Scorer compares a `ResumeRecord` with `JobRequirements` category by category.
//!
//! `AppState` holds an `Arc<dyn MatchScorer>` so the backend can be swapped
//! without touching handlers. The default is `ResumeMatcher` (TF-IDF cosine).

use tracing::debug;

use crate::matching::tfidf::{text_similarity, TfidfVectorizer};
use crate::models::job::{JobRequirements, RequirementDescription};
use crate::models::resume::ResumeRecord;
use crate::models::score::{MatchScore, MatchWeights};

pub trait MatchScorer: Send + Sync {
    fn calculate_match_score(&self, resume: &ResumeRecord, job: &JobRequirements) -> MatchScore;
}

/// TF-IDF based scorer.
///
/// Per category:
/// 1. empty requirement → 1.0
/// 2. otherwise join the resume entries with spaces, fit TF-IDF on
///    (resume text, requirement text) and take the cosine similarity
///
/// overall = weighted sum with `MatchWeights`.
#[derive(Debug, Clone)]
pub struct ResumeMatcher {
    vectorizer: TfidfVectorizer,
    weights: MatchWeights,
}

impl Default for ResumeMatcher {
    fn default() -> Self {
        Self::new(MatchWeights::default())
    }
}

impl ResumeMatcher {
    pub fn new(weights: MatchWeights) -> Self {
        Self {
            vectorizer: TfidfVectorizer::new(),
            weights,
        }
    }

    fn skills_match(&self, resume_skills: &[String], required_skills: &[String]) -> f64 {
        if required_skills.iter().all(|s| s.trim().is_empty()) {
            return 1.0;
        }
        text_similarity(
            &self.vectorizer,
            &resume_skills.join(" "),
            &required_skills.join(" "),
        )
    }

    fn description_match(&self, resume_entries: &[String], required: &RequirementDescription) -> f64 {
        if required.is_empty() {
            return 1.0;
        }
        text_similarity(&self.vectorizer, &resume_entries.join(" "), &required.description)
    }
}

impl MatchScorer for ResumeMatcher {
    fn calculate_match_score(&self, resume: &ResumeRecord, job: &JobRequirements) -> MatchScore {
        let skills = self.skills_match(&resume.skills, &job.required_skills);
        let experience = self.description_match(&resume.experience, &job.required_experience);
        let education = self.description_match(&resume.education, &job.required_education);

        let score = MatchScore::from_categories(skills, experience, education, &self.weights);
        debug!(
            skills,
            experience,
            education,
            overall = score.overall_match,
            "Computed match score"
        );
        score
    }
}
