//! Multipart form handling for resume uploads.

use std::io::Write;
use std::path::Path;

use axum::extract::multipart::{Field, Multipart, MultipartError};
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use tempfile::NamedTempFile;

use crate::errors::AppError;
use crate::parser::DocumentFormat;

pub const RESUME_FIELD: &str = "resume";
pub const JOB_DESCRIPTION_FIELD: &str = "job_description";

/// An uploaded resume held in memory until it is spooled to disk.
#[derive(Debug)]
pub struct UploadedResume {
    pub file_name: String,
    pub format: DocumentFormat,
    pub bytes: Bytes,
}

impl UploadedResume {
    /// Writes the upload into `temp_dir`. The file is removed when the handle drops.
    pub fn spool(&self, temp_dir: &Path) -> Result<NamedTempFile, AppError> {
        let mut file = tempfile::Builder::new()
            .prefix("resume-")
            .suffix(&format!(".{}", self.format.extension()))
            .tempfile_in(temp_dir)
            .map_err(|e| AppError::Internal(e.into()))?;
        file.write_all(&self.bytes)
            .map_err(|e| AppError::Internal(e.into()))?;
        Ok(file)
    }
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub resume: Option<UploadedResume>,
    pub job_description: Option<String>,
}

impl UploadForm {
    pub fn require_resume(self) -> Result<UploadedResume, AppError> {
        self.resume.ok_or_else(|| {
            AppError::Validation(format!("multipart field '{RESUME_FIELD}' is required"))
        })
    }
}

/// Reads the known fields of the form; unknown fields are skipped.
///
/// A resume larger than `max_file_size` bytes is rejected with
/// `PayloadTooLarge` as soon as the limit is crossed.
pub async fn read_upload_form(
    mut multipart: Multipart,
    max_file_size: u64,
) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(RESUME_FIELD) => {
                let file_name = field.file_name().unwrap_or_default().to_string();
                let format = DocumentFormat::from_path(Path::new(&file_name))?;
                let bytes = read_limited(field, max_file_size).await?;
                if bytes.is_empty() {
                    return Err(AppError::Validation("uploaded resume is empty".to_string()));
                }
                form.resume = Some(UploadedResume {
                    file_name,
                    format,
                    bytes,
                });
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field.text().await.map_err(multipart_error)?;
                form.job_description = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

async fn read_limited(mut field: Field<'_>, max_file_size: u64) -> Result<Bytes, AppError> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = field.chunk().await.map_err(multipart_error)? {
        if (buf.len() + chunk.len()) as u64 > max_file_size {
            return Err(AppError::PayloadTooLarge(format!(
                "uploaded resume exceeds the {max_file_size} byte limit"
            )));
        }
        buf.extend_from_slice(&chunk);
    }
    Ok(buf.freeze())
}

fn multipart_error(e: MultipartError) -> AppError {
    if e.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(e.body_text())
    } else {
        AppError::Validation(e.body_text())
    }
}
