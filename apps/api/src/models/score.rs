use serde::{Deserialize, Serialize};
use thiserror::Error;

const WEIGHT_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Error, PartialEq)]
pub enum WeightError {
    #[error("Matching weights must sum to 1.0 (got {0})")]
    BadSum(f64),

    #[error("Matching weight '{0}' must be non-negative")]
    Negative(&'static str),
}

/// Per-category weights for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub skills: f64,
    pub experience: f64,
    pub education: f64,
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            skills: 0.5,
            experience: 0.3,
            education: 0.2,
        }
    }
}

impl MatchWeights {
    pub fn total(&self) -> f64 {
        self.skills + self.experience + self.education
    }

    pub fn validate(&self) -> Result<(), WeightError> {
        for (name, value) in [
            ("skills", self.skills),
            ("experience", self.experience),
            ("education", self.education),
        ] {
            if value < 0.0 || value.is_nan() {
                return Err(WeightError::Negative(name));
            }
        }
        let total = self.total();
        if (total - 1.0).abs() > WEIGHT_TOLERANCE {
            return Err(WeightError::BadSum(total));
        }
        Ok(())
    }

    /// Weighted sum of the three category scores.
    pub fn combine(&self, skills: f64, experience: f64, education: f64) -> f64 {
        self.skills * skills + self.experience * experience + self.education * education
    }
}

/// Result of matching one resume against one set of job requirements.
/// All values are in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchScore {
    pub skills_match: f64,
    pub experience_match: f64,
    pub education_match: f64,
    pub overall_match: f64,
}

impl MatchScore {
    pub fn from_categories(
        skills_match: f64,
        experience_match: f64,
        education_match: f64,
        weights: &MatchWeights,
    ) -> Self {
        let overall_match = weights
            .combine(skills_match, experience_match, education_match)
            .clamp(0.0, 1.0);
        Self {
            skills_match,
            experience_match,
            education_match,
            overall_match,
        }
    }
}
