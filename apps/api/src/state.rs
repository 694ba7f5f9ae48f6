use std::sync::Arc;

use crate::extraction::TextExtractor;
use crate::llm_client::LlmClient;
use crate::store::SyllabusStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub store: SyllabusStore,
    pub llm: LlmClient,
    /// Pluggable extraction backend. Default: PdfExtractor.
    pub extractor: Arc<dyn TextExtractor>,
}
