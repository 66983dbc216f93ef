//! Document Extractor turns an uploaded PDF or DOCX resume into a `ResumeRecord`.
//!
//! Text extraction is delegated to `pdf-extract` and `docx-rs`; section
//! detection is regex based (see `sections`). A resume without a given
//! section yields an empty list for it. Only an unreadable or unsupported
//! file is an error.

pub mod sections;
pub mod text;

use std::path::Path;

use thiserror::Error;
use tracing::debug;

use crate::models::resume::ResumeRecord;
use crate::parser::sections::SectionPatterns;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to extract text from PDF: {0}")]
    Pdf(String),

    #[error("Failed to extract text from DOCX: {0}")]
    Docx(String),
}

/// Upload formats the extractor understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Pdf,
    Docx,
}

impl DocumentFormat {
    /// Detects the format from the file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, ExtractError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "pdf" => Ok(DocumentFormat::Pdf),
            "docx" => Ok(DocumentFormat::Docx),
            _ => Err(ExtractError::UnsupportedFormat(path.display().to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            DocumentFormat::Pdf => "pdf",
            DocumentFormat::Docx => "docx",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ResumeParser {
    patterns: SectionPatterns,
}

impl ResumeParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads and parses a resume file. The extension decides the decoder.
    pub fn parse_resume(&self, path: &Path) -> Result<ResumeRecord, ExtractError> {
        let format = DocumentFormat::from_path(path)?;
        let bytes = std::fs::read(path)?;
        self.parse_bytes(&bytes, format)
    }

    pub fn parse_bytes(
        &self,
        bytes: &[u8],
        format: DocumentFormat,
    ) -> Result<ResumeRecord, ExtractError> {
        let text = extract_text(bytes, format)?;
        debug!(
            format = format.extension(),
            chars = text.len(),
            "Extracted resume text"
        );
        Ok(self.extract_information(&text))
    }

    /// Builds a record from already extracted text.
    pub fn extract_information(&self, text: &str) -> ResumeRecord {
        let text = text.replace("\r\n", "\n");
        ResumeRecord {
            skills: self.patterns.skills(&text),
            experience: self.patterns.experience(&text),
            education: self.patterns.education(&text),
            raw_text: text,
        }
    }
}

pub fn extract_text(bytes: &[u8], format: DocumentFormat) -> Result<String, ExtractError> {
    match format {
        DocumentFormat::Pdf => text::pdf_text(bytes),
        DocumentFormat::Docx => text::docx_text(bytes),
    }
}

#[cfg(test)]
pub(crate) fn build_docx(paragraphs: &[&str]) -> Vec<u8> {
    use docx_rs::{Docx, Paragraph, Run};

    let mut docx = Docx::new();
    for p in paragraphs {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(*p)));
    }
    let mut cursor = std::io::Cursor::new(Vec::new());
    docx.build().pack(&mut cursor).unwrap();
    cursor.into_inner()
}

/// Single-page PDF with one Helvetica text line per entry. An empty entry
/// leaves a paragraph gap.
#[cfg(test)]
pub(crate) fn build_pdf(lines: &[&str]) -> Vec<u8> {
    let mut content = String::new();
    let mut y = 720;
    for line in lines {
        if !line.is_empty() {
            let escaped = line
                .replace('\\', "\\\\")
                .replace('(', "\\(")
                .replace(')', "\\)");
            content.push_str(&format!("BT /F1 12 Tf 72 {y} Td ({escaped}) Tj ET\n"));
        }
        y -= 14;
    }

    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] \
         /Resources << /Font << /F1 5 0 R >> >> /Contents 4 0 R >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{content}endstream",
            content.len()
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>"
            .to_string(),
    ];

    let mut pdf = b"%PDF-1.4\n".to_vec();
    let mut offsets = Vec::with_capacity(objects.len());
    for (i, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
    }
    let xref_at = pdf.len();
    let mut xref = format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1);
    for offset in offsets {
        xref.push_str(&format!("{offset:010} 00000 n \n"));
    }
    xref.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n",
        objects.len() + 1
    ));
    pdf.extend_from_slice(xref.as_bytes());
    pdf
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("cv.pdf")).unwrap(),
            DocumentFormat::Pdf
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("dir/CV.DOCX")).unwrap(),
            DocumentFormat::Docx
        );
    }

    #[test]
    fn test_unsupported_extension_is_error() {
        for name in ["cv.txt", "cv.doc", "cv", "cv.pdf.exe"] {
            let err = DocumentFormat::from_path(Path::new(name)).unwrap_err();
            assert!(matches!(err, ExtractError::UnsupportedFormat(_)), "{name}");
        }
    }

    #[test]
    fn test_parse_resume_rejects_unsupported_before_reading() {
        // The file does not exist: the format check must fail first.
        let err = ResumeParser::new()
            .parse_resume(Path::new("/nonexistent/resume.odt"))
            .unwrap_err();
        assert!(matches!(err, ExtractError::UnsupportedFormat(_)));
    }

    #[test]
    fn test_parse_docx_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.docx");
        let bytes = build_docx(&[
            "Jane Doe",
            "",
            "Skills: Rust, Tokio, PostgreSQL",
            "",
            "Experience:",
            "Backend Engineer at Acme",
            "",
            "Education: BSc Computer Science",
        ]);
        std::fs::write(&path, bytes).unwrap();

        let record = ResumeParser::new().parse_resume(&path).unwrap();
        assert_eq!(record.skills, vec!["Rust", "Tokio", "PostgreSQL"]);
        assert_eq!(record.experience, vec!["Backend Engineer at Acme"]);
        assert_eq!(record.education, vec!["BSc Computer Science"]);
        assert!(record.raw_text.starts_with("Jane Doe"));
    }

    #[test]
    fn test_docx_without_headers_yields_empty_lists() {
        let bytes = build_docx(&["Jane Doe", "Loves hiking and chess"]);
        let record = ResumeParser::new()
            .parse_bytes(&bytes, DocumentFormat::Docx)
            .unwrap();
        assert!(record.skills.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.education.is_empty());
        assert_eq!(record.raw_text, "Jane Doe\nLoves hiking and chess");
    }

    #[test]
    fn test_parse_pdf_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.pdf");
        let bytes = build_pdf(&[
            "Jane Doe",
            "",
            "Skills: Rust, Tokio, PostgreSQL",
            "",
            "Experience:",
            "Backend Engineer at Acme",
            "",
            "Education: BSc Computer Science",
        ]);
        std::fs::write(&path, bytes).unwrap();

        let record = ResumeParser::new().parse_resume(&path).unwrap();
        assert_eq!(record.skills, vec!["Rust", "Tokio", "PostgreSQL"]);
        assert_eq!(record.experience, vec!["Backend Engineer at Acme"]);
        assert_eq!(record.education, vec!["BSc Computer Science"]);
        assert!(record.raw_text.contains("Jane Doe"));
    }

    #[test]
    fn test_pdf_without_headers_yields_empty_lists() {
        let bytes = build_pdf(&["Jane Doe", "Loves hiking and chess"]);
        let record = ResumeParser::new()
            .parse_bytes(&bytes, DocumentFormat::Pdf)
            .unwrap();
        assert!(record.skills.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.education.is_empty());
        assert!(record.raw_text.contains("Loves hiking and chess"));
    }

    #[test]
    fn test_crlf_text_is_normalized() {
        let record = ResumeParser::new()
            .extract_information("Skills: Go, Rust\r\n\r\nEducation: MSc\r\n");
        assert_eq!(record.skills, vec!["Go", "Rust"]);
        assert_eq!(record.education, vec!["MSc"]);
    }
}
