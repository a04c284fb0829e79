//! Text Extractor: uploaded PDF bytes to plain text.
//!
//! Parsing is CPU-bound and `pdf-extract` can panic on hostile input, so it
//! runs inside `tokio::task::spawn_blocking`; a panic surfaces as a failed
//! join and is reported like any other unreadable document.

use std::path::Path;

use async_trait::async_trait;
use thiserror::Error;

const PDF_MAGIC: &[u8] = b"%PDF";

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("not a PDF document (missing %PDF header)")]
    NotPdf,

    #[error("PDF parse error: {0}")]
    Parse(String),

    #[error("PDF parser aborted: {0}")]
    Panicked(String),
}

/// Turns an uploaded document on disk into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError>;
}

/// `pdf-extract` backed extractor. Image-only PDFs yield empty text; no OCR.
pub struct PdfTextExtractor;

#[async_trait]
impl TextExtractor for PdfTextExtractor {
    async fn extract(&self, path: &Path) -> Result<String, ExtractError> {
        let bytes = tokio::fs::read(path).await?;
        tokio::task::spawn_blocking(move || extract_text(&bytes))
            .await
            .map_err(|e| ExtractError::Panicked(e.to_string()))?
    }
}

/// Extracts the text layer of an in-memory PDF.
pub fn extract_text(bytes: &[u8]) -> Result<String, ExtractError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(ExtractError::NotPdf);
    }
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| ExtractError::Parse(e.to_string()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Document, Object, Stream};
    use std::io::Write;

    /// Builds a one-page PDF whose text layer contains `line`.
    pub(crate) fn pdf_with_text(line: &str) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
        });
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 12.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(line)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
                "Resources" => resources_id,
                "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).unwrap();
        bytes
    }

    #[test]
    fn test_extract_text_reads_text_layer() {
        let text = extract_text(&pdf_with_text("Jane Doe Rust Engineer")).unwrap();
        assert!(text.contains("Jane Doe"), "extracted: {text:?}");
    }

    #[test]
    fn test_non_pdf_bytes_are_rejected() {
        let err = extract_text(b"PK\x03\x04 this is a zip file").unwrap_err();
        assert!(matches!(err, ExtractError::NotPdf));
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_an_error() {
        let bytes = pdf_with_text("Jane Doe");
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&bytes[..bytes.len() / 3]).unwrap();

        assert!(PdfTextExtractor.extract(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_pdf_extractor_reads_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(&pdf_with_text("Senior Backend Engineer")).unwrap();

        let text = PdfTextExtractor.extract(file.path()).await.unwrap();
        assert!(text.contains("Backend"));
    }

    #[tokio::test]
    async fn test_pdf_extractor_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = PdfTextExtractor
            .extract(&dir.path().join("gone.pdf"))
            .await
            .unwrap_err();
        assert!(matches!(err, ExtractError::Io(_)));
    }

    #[tokio::test]
    async fn test_pdf_extractor_rejects_disguised_text_file() {
        let mut file = tempfile::Builder::new().suffix(".pdf").tempfile().unwrap();
        file.write_all(b"just some plain text pretending to be a resume").unwrap();

        let err = PdfTextExtractor.extract(file.path()).await.unwrap_err();
        assert!(matches!(err, ExtractError::NotPdf));
    }
}
