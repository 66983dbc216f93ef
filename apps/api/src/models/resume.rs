use serde::{Deserialize, Serialize};

/// Structured view of an uploaded resume, built by the document extractor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeRecord {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub raw_text: String,
}

/// Resume fields as read back from the language model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResumeAnalysis {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub experience: Vec<String>,
    #[serde(default)]
    pub education: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub projects: Vec<String>,
}

impl ResumeAnalysis {
    /// Drops the fields the scorer has no use for and attaches the source text.
    pub fn into_record(self, raw_text: impl Into<String>) -> ResumeRecord {
        ResumeRecord {
            skills: self.skills,
            experience: self.experience,
            education: self.education,
            raw_text: raw_text.into(),
        }
    }
}
