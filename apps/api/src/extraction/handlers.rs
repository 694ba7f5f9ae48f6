//! Axum route handler for PDF text extraction.

use axum::{
    extract::{Multipart, State},
    Json,
};
use bytes::Bytes;
use serde::Serialize;
use tracing::{info, warn};

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ExtractTextResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ExtractTextResponse {
    fn ok(text: String) -> Self {
        Self {
            success: true,
            text: Some(text),
            error: None,
        }
    }

    fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            text: None,
            error: Some(error.into()),
        }
    }
}

/// POST /api/v1/syllabus/extract-text
///
/// Multipart upload with the PDF in a field named `pdf` (any file field is
/// accepted as a fallback). Extraction failures are surfaced verbatim.
pub async fn handle_extract_text(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Json<ExtractTextResponse> {
    let mut pdf_bytes: Option<Bytes> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() != Some("pdf") && field.file_name().is_none() {
                    continue;
                }
                match field.bytes().await {
                    Ok(bytes) => {
                        pdf_bytes = Some(bytes);
                        break;
                    }
                    Err(e) => {
                        warn!("failed to read uploaded field: {e}");
                        return Json(ExtractTextResponse::fail("Failed to read uploaded file"));
                    }
                }
            }
            Ok(None) => break,
            Err(e) => {
                warn!("malformed multipart upload: {e}");
                return Json(ExtractTextResponse::fail("Invalid upload"));
            }
        }
    }

    let Some(bytes) = pdf_bytes.filter(|b| !b.is_empty()) else {
        return Json(ExtractTextResponse::fail("No file provided"));
    };

    info!("extracting text from {} byte upload", bytes.len());

    match state.extractor.extract(bytes).await {
        Ok(text) => Json(ExtractTextResponse::ok(text)),
        Err(e) => {
            warn!("PDF extraction failed: {e}");
            Json(ExtractTextResponse::fail(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success_envelope_shape() {
        let json = serde_json::to_value(ExtractTextResponse::ok("Course syllabus...".into())).unwrap();
        assert_eq!(json["success"], true);
        assert_eq!(json["text"], "Course syllabus...");
        assert!(json.get("error").is_none());
    }

    #[test]
    fn test_failure_envelope_shape() {
        let json = serde_json::to_value(ExtractTextResponse::fail("No file provided")).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "No file provided");
        assert!(json.get("text").is_none());
    }
}
