//! Header-based section extraction over plain resume text.
//!
//! A section starts at one of its header aliases followed by `:` and runs to
//! the next blank line (or the end of the text). Headers are matched
//! case-insensitively.

use regex::Regex;

const SKILLS_HEADERS: &str = r"technical\s+skills|skills|expertise";
const EXPERIENCE_HEADERS: &str = r"experience|work\s+history";
const EDUCATION_HEADERS: &str = r"education|academic\s+background";

/// Compiled section patterns. Build once and reuse.
#[derive(Debug, Clone)]
pub struct SectionPatterns {
    skills: Regex,
    experience: Regex,
    education: Regex,
}

impl Default for SectionPatterns {
    fn default() -> Self {
        Self::new()
    }
}

impl SectionPatterns {
    pub fn new() -> Self {
        Self {
            skills: section_regex(SKILLS_HEADERS),
            experience: section_regex(EXPERIENCE_HEADERS),
            education: section_regex(EDUCATION_HEADERS),
        }
    }

    /// Skills are comma (or line) separated.
    pub fn skills(&self, text: &str) -> Vec<String> {
        capture(&self.skills, text)
            .map(|body| split_items(body, |c| c == ',' || c == '\n'))
            .unwrap_or_default()
    }

    /// One experience entry per non-empty line.
    pub fn experience(&self, text: &str) -> Vec<String> {
        capture(&self.experience, text)
            .map(|body| split_items(body, |c| c == '\n'))
            .unwrap_or_default()
    }

    /// One education entry per non-empty line.
    pub fn education(&self, text: &str) -> Vec<String> {
        capture(&self.education, text)
            .map(|body| split_items(body, |c| c == '\n'))
            .unwrap_or_default()
    }
}

fn section_regex(headers: &str) -> Regex {
    // Header, colon, then everything up to the first blank line.
    let pattern = format!(r"(?is)\b(?:{headers})[ \t]*:(.*?)(?:\n[ \t]*\n|\z)");
    Regex::new(&pattern).expect("section pattern is a valid regex")
}

fn capture<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    re.captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

fn split_items(body: &str, is_separator: impl Fn(char) -> bool) -> Vec<String> {
    body.split(is_separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
