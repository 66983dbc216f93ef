//! Reads structured fields back out of free-form model output.
//!
//! The model is asked for a header line per section, one item per line, and a
//! blank line between sections. Nothing checks that it complied: a header that
//! cannot be found yields an empty field.

use crate::generation::prompts::{
    CERTIFICATIONS, EDUCATION, NICE_TO_HAVE_SKILLS, PROJECTS, REQUIRED_EDUCATION,
    REQUIRED_EXPERIENCE, REQUIRED_SKILLS, SKILLS, WORK_EXPERIENCE,
};
use crate::models::job::{JobRequirements, RequirementDescription};
use crate::models::resume::ResumeAnalysis;

/// Which template the output answered.
#[derive(Debug, Clone, PartialEq)]
pub enum Analysis {
    Resume(ResumeAnalysis),
    Job(JobRequirements),
}

/// Output mentioning `Required Skills` is a job analysis; anything else is a resume analysis.
pub fn parse_analysis(text: &str) -> Analysis {
    let text = text.replace("\r\n", "\n");

    if text.contains(REQUIRED_SKILLS) {
        Analysis::Job(JobRequirements {
            required_skills: extract_list(&text, REQUIRED_SKILLS),
            required_experience: extract_description(&text, REQUIRED_EXPERIENCE),
            required_education: extract_description(&text, REQUIRED_EDUCATION),
            nice_to_have_skills: extract_list(&text, NICE_TO_HAVE_SKILLS),
        })
    } else {
        Analysis::Resume(ResumeAnalysis {
            skills: extract_list(&text, SKILLS),
            experience: extract_list(&text, WORK_EXPERIENCE),
            education: extract_list(&text, EDUCATION),
            certifications: extract_list(&text, CERTIFICATIONS),
            projects: extract_list(&text, PROJECTS),
        })
    }
}

/// One item per non-empty line of the section, bullet markers removed.
pub fn extract_list(text: &str, section: &str) -> Vec<String> {
    section_block(text, section)
        .map(|block| {
            block
                .lines()
                .map(strip_bullet)
                .filter(|line| !line.is_empty())
                .map(String::from)
                .collect()
        })
        .unwrap_or_default()
}

/// The whole section as a single trimmed description.
pub fn extract_description(text: &str, section: &str) -> RequirementDescription {
    let description = section_block(text, section)
        .map(|block| {
            block
                .lines()
                .map(strip_bullet)
                .filter(|line| !line.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default();
    RequirementDescription::new(description)
}

/// Lines after the first occurrence of `section`, up to the next blank line.
///
/// Anything else on the header line (`Required Skills (must have):`) is not
/// part of the block.
fn section_block(text: &str, section: &str) -> Option<String> {
    let start = text.find(section)?;
    let body = match text[start..].find('\n') {
        Some(nl) => &text[start + nl + 1..],
        None => "",
    };
    let body = match body.find("\n\n") {
        Some(end) => &body[..end],
        None => body,
    };
    Some(body.trim().to_string())
}

fn strip_bullet(line: &str) -> &str {
    let line = line.trim();
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("• "))
        .unwrap_or(line)
        .trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOB_OUTPUT: &str = "\
Required Skills:
- Rust
- PostgreSQL
- Kubernetes

Required Experience:
5+ years of backend development
Experience running services in production

Required Education:
Bachelor's degree in Computer Science

Nice-to-have Skills:
- Kafka
";

    const RESUME_OUTPUT: &str = "\
Skills:
Python
SQL

Work Experience:
Data Engineer, Acme, 2019-2023

Education:
BSc Mathematics

Certifications:
AWS Certified Developer

Projects:
Streaming ETL pipeline
";

    #[test]
    fn test_job_output_detected_and_parsed() {
        let Analysis::Job(job) = parse_analysis(JOB_OUTPUT) else {
            panic!("expected job analysis");
        };
        assert_eq!(job.required_skills, vec!["Rust", "PostgreSQL", "Kubernetes"]);
        assert_eq!(
            job.required_experience.description,
            "5+ years of backend development\nExperience running services in production"
        );
        assert_eq!(
            job.required_education.description,
            "Bachelor's degree in Computer Science"
        );
        assert_eq!(job.nice_to_have_skills, vec!["Kafka"]);
    }

    #[test]
    fn test_resume_output_detected_and_parsed() {
        let Analysis::Resume(resume) = parse_analysis(RESUME_OUTPUT) else {
            panic!("expected resume analysis");
        };
        assert_eq!(resume.skills, vec!["Python", "SQL"]);
        assert_eq!(resume.experience, vec!["Data Engineer, Acme, 2019-2023"]);
        assert_eq!(resume.education, vec!["BSc Mathematics"]);
        assert_eq!(resume.certifications, vec!["AWS Certified Developer"]);
        assert_eq!(resume.projects, vec!["Streaming ETL pipeline"]);
    }

    #[test]
    fn test_missing_sections_default_to_empty() {
        let Analysis::Job(job) = parse_analysis("Required Skills:\nGo\n") else {
            panic!("expected job analysis");
        };
        assert_eq!(job.required_skills, vec!["Go"]);
        assert!(job.required_experience.is_empty());
        assert!(job.required_education.is_empty());
        assert!(job.nice_to_have_skills.is_empty());
    }

    #[test]
    fn test_unstructured_output_is_empty_resume() {
        let analysis = parse_analysis("I'm sorry, I cannot help with that.");
        assert_eq!(analysis, Analysis::Resume(ResumeAnalysis::default()));
    }

    #[test]
    fn test_header_line_content_is_skipped() {
        let items = extract_list("**Skills:** Rust\nGo\n\nOther", "Skills");
        assert_eq!(items, vec!["Go"]);
    }

    #[test]
    fn test_header_qualifier_is_not_an_item() {
        let Analysis::Job(job) = parse_analysis("Required Skills (must have):\n- Rust\n- Go\n")
        else {
            panic!("expected job analysis");
        };
        assert_eq!(job.required_skills, vec!["Rust", "Go"]);
    }

    #[test]
    fn test_header_at_end_of_text_is_empty() {
        assert!(extract_list("blah Skills", "Skills").is_empty());
        assert!(extract_description("Required Education", "Required Education").is_empty());
    }

    #[test]
    fn test_crlf_output_is_handled() {
        let Analysis::Resume(resume) = parse_analysis("Skills:\r\nC++\r\n\r\nEducation:\r\nMSc\r\n")
        else {
            panic!("expected resume analysis");
        };
        assert_eq!(resume.skills, vec!["C++"]);
        assert_eq!(resume.education, vec!["MSc"]);
    }

    #[test]
    fn test_bullet_markers_stripped() {
        assert_eq!(strip_bullet("  - Rust "), "Rust");
        assert_eq!(strip_bullet("* Go"), "Go");
        assert_eq!(strip_bullet("• SQL"), "SQL");
        assert_eq!(strip_bullet("C#"), "C#");
    }
}
