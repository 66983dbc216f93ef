//! Structured Info Generator: prompts the language model with a fixed template
//! and reads resume fields or job requirements back out of its free text.
//!
//! Generation never fails from the caller's point of view: a model error or an
//! answer that does not follow the template produces empty defaults.

pub mod handlers;
pub mod output_parser;
pub mod prompts;

use std::sync::Arc;

use tracing::{debug, warn};

use crate::generation::output_parser::{parse_analysis, Analysis};
use crate::generation::prompts::{JOB_ANALYSIS_PROMPT_TEMPLATE, RESUME_ANALYSIS_PROMPT_TEMPLATE};
use crate::llm_client::prompts::SECTION_FORMAT_INSTRUCTION;
use crate::llm_client::TextGenerator;
use crate::models::job::JobRequirements;
use crate::models::resume::ResumeAnalysis;

#[derive(Clone)]
pub struct StructuredInfoGenerator {
    llm: Arc<dyn TextGenerator>,
}

impl StructuredInfoGenerator {
    pub fn new(llm: Arc<dyn TextGenerator>) -> Self {
        Self { llm }
    }

    pub fn model_name(&self) -> Option<String> {
        self.llm.model_name()
    }

    /// Extracts skills, experience, education, certifications and projects from resume text.
    pub async fn analyze_resume(&self, resume_text: &str) -> ResumeAnalysis {
        let prompt = resume_prompt(resume_text);
        match self.run(&prompt, "resume analysis").await {
            Some(Analysis::Resume(analysis)) => analysis,
            Some(Analysis::Job(_)) => {
                warn!("Resume analysis answered with job requirements; using defaults");
                ResumeAnalysis::default()
            }
            None => ResumeAnalysis::default(),
        }
    }

    /// Extracts required skills, experience and education from a job description.
    pub async fn analyze_job_requirements(&self, job_description: &str) -> JobRequirements {
        let prompt = job_prompt(job_description);
        match self.run(&prompt, "job requirements analysis").await {
            Some(Analysis::Job(requirements)) => requirements,
            Some(Analysis::Resume(_)) => {
                warn!("Job requirements analysis missing 'Required Skills'; using defaults");
                JobRequirements::default()
            }
            None => JobRequirements::default(),
        }
    }

    async fn run(&self, prompt: &str, task: &str) -> Option<Analysis> {
        match self.llm.generate(prompt).await {
            Ok(output) => {
                debug!("{task}: model returned {} chars", output.len());
                Some(parse_analysis(&output))
            }
            Err(e) => {
                warn!("Error in {task}: {e}");
                None
            }
        }
    }
}

fn resume_prompt(resume_text: &str) -> String {
    RESUME_ANALYSIS_PROMPT_TEMPLATE
        .replace("{format}", SECTION_FORMAT_INSTRUCTION)
        .replace("{resume_text}", resume_text)
}

fn job_prompt(job_description: &str) -> String {
    JOB_ANALYSIS_PROMPT_TEMPLATE
        .replace("{format}", SECTION_FORMAT_INSTRUCTION)
        .replace("{job_description}", job_description)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use crate::llm_client::{LlmError, TextGenerator};

    /// Returns canned output and records every prompt it receives.
    pub struct StubGenerator {
        output: Option<String>,
        pub prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        pub fn answering(output: &str) -> Self {
            Self {
                output: Some(output.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn failing() -> Self {
            Self {
                output: None,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.output.clone().ok_or(LlmError::EmptyContent)
        }

        fn model_name(&self) -> Option<String> {
            Some("stub".to_string())
        }
    }
}
