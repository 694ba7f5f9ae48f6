//! Axum route handler for the month-grid calendar view.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::calendar::{initial_month, project, MonthGrid, YearMonth};
use crate::errors::AppError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MonthQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

/// GET /api/v1/syllabi/:index/calendar?year=2024&month=9
///
/// Projects a saved syllabus onto one visible month. Without query params
/// the view opens on the month of the earliest event. Clients navigate by
/// requesting the adjacent month; the grid is recomputed every time.
pub async fn handle_calendar(
    State(state): State<AppState>,
    Path(index): Path<usize>,
    Query(params): Query<MonthQuery>,
) -> Result<Json<MonthGrid>, AppError> {
    let syllabi = state.store.load();
    let syllabus = syllabi
        .get(index)
        .ok_or_else(|| AppError::NotFound(format!("No saved syllabus at index {index}")))?;

    let visible = match (params.year, params.month) {
        (Some(year), Some(month)) => {
            if !(1..=12).contains(&month) {
                return Err(AppError::Validation(format!(
                    "month must be between 1 and 12, got {month}"
                )));
            }
            YearMonth::new(year, month)
        }
        (None, None) => initial_month(&syllabus.events),
        _ => {
            return Err(AppError::Validation(
                "year and month must be provided together".to_string(),
            ))
        }
    };

    Ok(Json(project(&syllabus.events, visible)))
}
