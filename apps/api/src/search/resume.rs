//! Resume uploads: format detection and text extraction for PDF and plain-text files.

use anyhow::Context;
use tracing::warn;

use crate::errors::AppError;

/// Multipart field carrying the resume file.
pub const RESUME_FIELD: &str = "resume";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResumeFormat {
    Pdf,
    Text,
}

impl ResumeFormat {
    /// Checked by file extension first, then by declared content type.
    pub fn detect(file_name: Option<&str>, content_type: Option<&str>) -> Option<Self> {
        let extension = file_name
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("pdf") => return Some(Self::Pdf),
            Some("txt") => return Some(Self::Text),
            _ => {}
        }

        let mime = content_type
            .and_then(|ct| ct.split(';').next())
            .map(|ct| ct.trim().to_ascii_lowercase());

        match mime.as_deref() {
            Some("application/pdf") => Some(Self::Pdf),
            Some("text/plain") => Some(Self::Text),
            _ => None,
        }
    }
}

/// Pulls readable text out of an uploaded resume. Unreadable or blank documents
/// are validation errors.
pub async fn extract_text(format: ResumeFormat, data: Vec<u8>) -> Result<String, AppError> {
    let text = match format {
        ResumeFormat::Text => String::from_utf8(data)
            .map_err(|_| AppError::Validation("Resume text is not valid UTF-8".to_string()))?,
        ResumeFormat::Pdf => {
            tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&data))
                .await
                .context("PDF extraction task failed")?
                .map_err(|e| {
                    warn!("PDF text extraction failed: {e:?}");
                    AppError::Validation("Could not read text from the PDF".to_string())
                })?
        }
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "Resume contains no readable text".to_string(),
        ));
    }

    Ok(text.to_string())
}
