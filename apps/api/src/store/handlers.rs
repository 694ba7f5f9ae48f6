//! Axum route handlers for the saved-syllabi collection.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::models::syllabus::SyllabusAnalysis;
use crate::state::AppState;
use crate::store::StoreError;

#[derive(Debug, Serialize)]
pub struct SyllabusListResponse {
    pub syllabi: Vec<SyllabusAnalysis>,
}

#[derive(Debug, Serialize)]
pub struct SaveSyllabusResponse {
    pub index: usize,
}

/// GET /api/v1/syllabi
///
/// The saved collection in insertion order.
pub async fn handle_list_syllabi(State(state): State<AppState>) -> Json<SyllabusListResponse> {
    Json(SyllabusListResponse {
        syllabi: state.store.load(),
    })
}

/// POST /api/v1/syllabi
///
/// Appends one analysis to the collection. The position returned is the
/// record's identifier — there is no durable ID field.
pub async fn handle_save_syllabus(
    State(state): State<AppState>,
    Json(analysis): Json<SyllabusAnalysis>,
) -> Result<(StatusCode, Json<SaveSyllabusResponse>), AppError> {
    let index = state.store.append(analysis).map_err(store_error)?;
    info!("saved syllabus at index {index}");
    Ok((StatusCode::CREATED, Json(SaveSyllabusResponse { index })))
}

/// DELETE /api/v1/syllabi/:index
pub async fn handle_delete_syllabus(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> Result<StatusCode, AppError> {
    state.store.remove_at(index).map_err(store_error)?;
    info!("deleted syllabus at index {index}");
    Ok(StatusCode::NO_CONTENT)
}

fn store_error(e: StoreError) -> AppError {
    match e {
        StoreError::IndexOutOfRange { index, .. } => {
            AppError::NotFound(format!("No saved syllabus at index {index}"))
        }
        StoreError::RejectionRecord => {
            AppError::Validation("A rejected analysis cannot be saved".to_string())
        }
        StoreError::Io(e) => AppError::Storage(e.to_string()),
        StoreError::Serialize(e) => AppError::Storage(e.to_string()),
    }
}
