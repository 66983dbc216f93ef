//! Raw text extraction for the supported upload formats.

use docx_rs::{DocumentChild, ParagraphChild, RunChild};

use crate::parser::ExtractError;

/// Text of every PDF page, concatenated in page order.
pub fn pdf_text(bytes: &[u8]) -> Result<String, ExtractError> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Pdf(e.to_string()))
}

/// Text of every top-level DOCX paragraph, one paragraph per line.
pub fn docx_text(bytes: &[u8]) -> Result<String, ExtractError> {
    let docx = docx_rs::read_docx(bytes).map_err(|e| ExtractError::Docx(e.to_string()))?;

    let paragraphs: Vec<String> = docx
        .document
        .children
        .iter()
        .filter_map(|child| match child {
            DocumentChild::Paragraph(paragraph) => Some(
                paragraph
                    .children
                    .iter()
                    .filter_map(|run| match run {
                        ParagraphChild::Run(run) => Some(run_text(&run.children)),
                        _ => None,
                    })
                    .collect::<String>(),
            ),
            _ => None,
        })
        .collect();

    Ok(paragraphs.join("\n"))
}

fn run_text(children: &[RunChild]) -> String {
    children
        .iter()
        .filter_map(|c| match c {
            RunChild::Text(t) => Some(t.text.as_str()),
            _ => None,
        })
        .collect()
}
