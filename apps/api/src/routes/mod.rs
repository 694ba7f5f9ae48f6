pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};

use crate::analysis;
use crate::calendar;
use crate::extraction;
use crate::state::AppState;
use crate::store;

/// Uploaded syllabi are PDFs; axum's 2 MB default is too small for them.
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Analysis pipeline (success-envelope endpoints)
        .route(
            "/api/v1/syllabus/extract-text",
            post(extraction::handlers::handle_extract_text),
        )
        .route(
            "/api/v1/syllabus/analyze",
            post(analysis::handlers::handle_analyze),
        )
        // Saved-syllabi collection
        .route(
            "/api/v1/syllabi",
            get(store::handlers::handle_list_syllabi).post(store::handlers::handle_save_syllabus),
        )
        .route(
            "/api/v1/syllabi/:index",
            delete(store::handlers::handle_delete_syllabus),
        )
        .route(
            "/api/v1/syllabi/:index/calendar",
            get(calendar::handlers::handle_calendar),
        )
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
