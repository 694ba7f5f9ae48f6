//! Axum route handlers for the analysis pipeline.
//!
//! These endpoints always answer 200 with a `{ success, ... }` envelope:
//! bad input, a failed LLM call, an unusable completion, and a "not a
//! syllabus" verdict are all expressible outcomes, not HTTP faults.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::analysis::normalizer::{self, AnalysisOutcome};
use crate::analysis::prompts::{build_extraction_prompt, SYLLABUS_EXTRACT_SYSTEM};
use crate::models::syllabus::SyllabusAnalysis;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub syllabus_text: String,
}

#[derive(Debug, Serialize)]
pub struct AnalyzeResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<SyllabusAnalysis>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl AnalyzeResponse {
    fn ok(analysis: SyllabusAnalysis) -> Self {
        Self {
            success: true,
            analysis: Some(analysis),
            error: None,
        }
    }

    fn fail(error: impl Into<String>) -> Self {
        Self {
            success: false,
            analysis: None,
            error: Some(error.into()),
        }
    }
}

/// POST /api/v1/syllabus/analyze
///
/// Runs the extraction pipeline on already-extracted syllabus text:
/// prompt → completion → normalize. Nothing is persisted here; saving is a
/// separate, explicit user action.
pub async fn handle_analyze(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalyzeResponse> {
    if request.syllabus_text.trim().is_empty() {
        return Json(AnalyzeResponse::fail("No syllabus text provided"));
    }

    let prompt = build_extraction_prompt(&request.syllabus_text);

    let completion = match state.llm.complete(&prompt, SYLLABUS_EXTRACT_SYSTEM).await {
        Ok(text) => text,
        Err(e) => {
            error!("LLM call failed: {e}");
            return Json(AnalyzeResponse::fail("Failed to analyze syllabus"));
        }
    };

    match normalizer::normalize(&completion) {
        Ok(AnalysisOutcome::Analysis(analysis)) => {
            info!(
                "analyzed syllabus '{}': {} events, {} grade categories",
                analysis.course_name,
                analysis.events.len(),
                analysis.grade_breakdown.len()
            );
            Json(AnalyzeResponse::ok(analysis))
        }
        Ok(AnalysisOutcome::Rejected { message }) => Json(AnalyzeResponse::fail(message)),
        Err(e) => {
            error!("normalization failed: {e}");
            Json(AnalyzeResponse::fail(
                "Could not analyze the syllabus. Please try again.",
            ))
        }
    }
}
