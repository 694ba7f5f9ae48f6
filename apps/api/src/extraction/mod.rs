//! PDF text extraction adapter.
//!
//! Extraction is an external collaborator as far as the analysis pipeline
//! is concerned: it takes uploaded bytes and produces plain text, or
//! fails. Pluggable backend behind `TextExtractor`. Default: PdfExtractor.

pub mod handlers;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Failed to read PDF: {0}")]
    Parse(String),

    #[error("The PDF contains no extractable text")]
    EmptyDocument,
}

/// Converts an uploaded document into plain text.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError>;
}

/// Default backend over the `pdf-extract` crate.
pub struct PdfExtractor;

#[async_trait]
impl TextExtractor for PdfExtractor {
    async fn extract(&self, bytes: Bytes) -> Result<String, ExtractionError> {
        // pdf-extract is CPU-bound; keep it off the async workers
        let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| ExtractionError::Parse(e.to_string()))?
            .map_err(|e| ExtractionError::Parse(e.to_string()))?;

        // Encrypted or image-only scans extract to nothing useful.
        if text.trim().is_empty() {
            return Err(ExtractionError::EmptyDocument);
        }

        Ok(text)
    }
}
