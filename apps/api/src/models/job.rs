use serde::{Deserialize, Serialize};

/// A single free-text requirement, e.g. "5+ years of backend development".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequirementDescription {
    #[serde(default)]
    pub description: String,
}

impl RequirementDescription {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }

    /// A blank description counts as "no requirement".
    pub fn is_empty(&self) -> bool {
        self.description.trim().is_empty()
    }
}

/// Requirements extracted from a job description.
///
/// Every field defaults when absent, so a partially filled payload is
/// normalized on deserialization and never rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobRequirements {
    #[serde(default)]
    pub required_skills: Vec<String>,
    #[serde(default)]
    pub required_experience: RequirementDescription,
    #[serde(default)]
    pub required_education: RequirementDescription,
    /// Reported back to the caller; not used in scoring.
    #[serde(default)]
    pub nice_to_have_skills: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_object_normalizes_to_defaults() {
        let job: JobRequirements = serde_json::from_str("{}").unwrap();
        assert_eq!(job, JobRequirements::default());
        assert!(job.required_experience.is_empty());
        assert!(job.required_education.is_empty());
    }

    #[test]
    fn test_partial_payload_keeps_present_fields() {
        let json = r#"{
            "required_skills": ["Rust", "SQL"],
            "required_experience": {"description": "3 years backend"}
        }"#;
        let job: JobRequirements = serde_json::from_str(json).unwrap();
        assert_eq!(job.required_skills, vec!["Rust", "SQL"]);
        assert_eq!(job.required_experience.description, "3 years backend");
        assert!(job.required_education.is_empty());
        assert!(job.nice_to_have_skills.is_empty());
    }

    #[test]
    fn test_whitespace_description_is_empty() {
        assert!(RequirementDescription::new("  \n ").is_empty());
        assert!(!RequirementDescription::new("BSc").is_empty());
    }
}
