// src/core/converter.rs
//! Document to text conversion. The extractor only ever sees plain text; this
//! is the seam where file formats are handled.

use std::path::Path;

use tracing::{debug, info};

use crate::core::fs_ops::FsOps;
use crate::errors::ExtractError;

pub trait TextConverter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Lower-case file extensions this converter accepts.
    fn extensions(&self) -> &'static [&'static str];

    fn convert(&self, bytes: &[u8]) -> Result<String, ExtractError>;
}

pub struct PlainTextConverter;

impl TextConverter for PlainTextConverter {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["txt", "text", "md"]
    }

    fn convert(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        Ok(String::from_utf8_lossy(bytes).into_owned())
    }
}

pub struct PdfConverter;

impl TextConverter for PdfConverter {
    fn name(&self) -> &'static str {
        "pdf"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &["pdf"]
    }

    fn convert(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(ExtractError::Conversion("missing PDF header".to_string()));
        }
        pdf_extract::extract_text_from_mem(bytes)
            .map_err(|e| ExtractError::Conversion(e.to_string()))
    }
}

static CONVERTERS: &[&dyn TextConverter] = &[&PlainTextConverter, &PdfConverter];

pub fn converter_for(path: &Path) -> Result<&'static dyn TextConverter, ExtractError> {
    let extension = FsOps::get_extension(path).unwrap_or_default();
    CONVERTERS
        .iter()
        .copied()
        .find(|converter| converter.extensions().contains(&extension.as_str()))
        .ok_or_else(|| ExtractError::UnsupportedDocument(path.display().to_string()))
}

/// Read `path` and convert it to plain text with the converter its extension
/// selects.
pub async fn extract_text(path: &Path) -> Result<String, ExtractError> {
    let converter = converter_for(path)?;
    let bytes = tokio::fs::read(path).await?;
    debug!(
        "Converting {} ({} bytes) with {}",
        path.display(),
        bytes.len(),
        converter.name()
    );

    let text = tokio::task::spawn_blocking(move || converter.convert(&bytes))
        .await
        .map_err(|e| ExtractError::Conversion(e.to_string()))??;

    info!("Extracted {} characters from {}", text.len(), path.display());
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_converter_selection_by_extension() {
        assert_eq!(converter_for(Path::new("cv.txt")).unwrap().name(), "plain-text");
        assert_eq!(converter_for(Path::new("CV.PDF")).unwrap().name(), "pdf");

        let err = converter_for(Path::new("cv.docx")).err().unwrap();
        assert!(matches!(err, ExtractError::UnsupportedDocument(_)));
        assert!(converter_for(Path::new("no_extension")).is_err());
    }

    #[test]
    fn test_pdf_converter_rejects_non_pdf_bytes() {
        let err = PdfConverter.convert(b"plain words").unwrap_err();
        assert!(matches!(err, ExtractError::Conversion(_)));
    }

    #[tokio::test]
    async fn test_extract_text_from_plain_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("resume.txt");
        tokio::fs::write(&path, "Jane Doe\njane@example.com\n").await.unwrap();

        let text = extract_text(&path).await.unwrap();
        assert!(text.starts_with("Jane Doe"));
    }

    #[tokio::test]
    async fn test_extract_text_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = extract_text(&dir.path().join("absent.txt")).await.unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }
}
