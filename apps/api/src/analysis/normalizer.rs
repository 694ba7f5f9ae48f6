//! Response normalization — turns the raw completion text into a validated
//! `SyllabusAnalysis` or a structured failure.
//!
//! The model is asked for bare JSON but may still wrap it in prose, so the
//! normalizer first cuts the span between the first `{` and the last `}`
//! and parses that. Validation is lenient by design: the source data is an
//! untrusted model reading an untrusted document, so missing fields default
//! rather than fail, and only an unusable date disqualifies an event.

use chrono::NaiveDate;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::syllabus::{CalendarEvent, EventType, GradeBreakdown, SyllabusAnalysis};

const DEFAULT_REJECTION_MESSAGE: &str =
    "The provided document does not appear to be a course syllabus.";

/// Failure to get any analysis out of the completion text. Surfaced to the
/// user only as a generic "could not analyze" message; the raw text goes to
/// the diagnostic log, never to the response.
#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("no JSON object found in completion text")]
    NoJsonFound,

    #[error("completion JSON failed to parse: {0}")]
    MalformedJson(#[from] serde_json::Error),
}

/// A successful normalization: either real course data or the model's
/// determination that the input was not a syllabus. A rejection is a
/// negative outcome, not an error — it carries the model's reason and the
/// record is discarded, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisOutcome {
    Analysis(SyllabusAnalysis),
    Rejected { message: String },
}

/// Normalizes raw completion text into an `AnalysisOutcome`.
///
/// Pure transformation (idempotent); the only side effect is diagnostic
/// logging on failure.
pub fn normalize(raw: &str) -> Result<AnalysisOutcome, NormalizationError> {
    let span = json_span(raw).ok_or_else(|| {
        warn!("completion contained no JSON object");
        debug!("completion text: {raw}");
        NormalizationError::NoJsonFound
    })?;

    let value: Value = serde_json::from_str(span).map_err(|e| {
        warn!("completion JSON failed to parse: {e}");
        debug!("completion text: {raw}");
        NormalizationError::MalformedJson(e)
    })?;

    if value.get("error").and_then(Value::as_bool).unwrap_or(false) {
        let message = value
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_REJECTION_MESSAGE)
            .to_string();
        return Ok(AnalysisOutcome::Rejected { message });
    }

    Ok(AnalysisOutcome::Analysis(coerce_analysis(&value)))
}

/// Cuts the first top-level `{...}` span out of the completion text.
/// The completion may prepend or append commentary around the JSON.
fn json_span(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

fn coerce_analysis(value: &Value) -> SyllabusAnalysis {
    let events: Vec<CalendarEvent> = value
        .get("events")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(coerce_event).collect())
        .unwrap_or_default();

    let grade_breakdown: Vec<GradeBreakdown> = value
        .get("gradeBreakdown")
        .and_then(Value::as_array)
        .map(|arr| arr.iter().filter_map(coerce_grade).collect())
        .unwrap_or_default();

    SyllabusAnalysis {
        course_name: string_field(value, "courseName"),
        instructor: string_field(value, "instructor"),
        semester: string_field(value, "semester"),
        grade_breakdown,
        events,
        // Whatever the extraction reported — informational only, never
        // re-derived from the surviving events.
        total_events: value.get("totalEvents").and_then(Value::as_i64).unwrap_or(0),
        error: false,
        message: None,
    }
}

fn string_field(value: &Value, key: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string()
}

/// Validates one raw event. An event without a parseable `YYYY-MM-DD` date
/// is dropped entirely — a broken date must never reach the calendar.
fn coerce_event(value: &Value) -> Option<CalendarEvent> {
    let date = value.get("date").and_then(Value::as_str)?;
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;

    let event_type = value
        .get("type")
        .and_then(Value::as_str)
        .map(EventType::parse)
        .unwrap_or(EventType::Other);

    let week = value
        .get("week")
        .and_then(Value::as_i64)
        .filter(|w| *w > 0)
        .map(|w| w as u32);

    Some(CalendarEvent {
        date: date.to_string(),
        title: string_field(value, "title"),
        event_type,
        description: string_field(value, "description"),
        week,
    })
}

/// Validates one grade row. Rows without a category are meaningless and
/// dropped; percentages are accepted as numbers or numeric strings (the
/// model occasionally quotes them) and are not required to sum to 100.
fn coerce_grade(value: &Value) -> Option<GradeBreakdown> {
    let category = value.get("category").and_then(Value::as_str)?.trim();
    if category.is_empty() {
        return None;
    }

    let percentage = match value.get("percentage") {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().trim_end_matches('%').parse().unwrap_or(0.0),
        _ => 0.0,
    };

    Some(GradeBreakdown {
        category: category.to_string(),
        percentage,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO_A: &str = "Sure! {\"courseName\":\"CS101\",\"instructor\":\"Dr. X\",\"semester\":\"Fall 2024\",\"gradeBreakdown\":[{\"category\":\"Final\",\"percentage\":40}],\"events\":[{\"date\":\"2024-09-03\",\"title\":\"HW1\",\"type\":\"assignment\",\"description\":\"Due\",\"week\":1}],\"totalEvents\":1,\"error\":false}";

    fn expect_analysis(raw: &str) -> SyllabusAnalysis {
        match normalize(raw).unwrap() {
            AnalysisOutcome::Analysis(a) => a,
            AnalysisOutcome::Rejected { message } => panic!("unexpected rejection: {message}"),
        }
    }

    #[test]
    fn test_scenario_a_prose_wrapped_json() {
        let analysis = expect_analysis(SCENARIO_A);
        assert_eq!(analysis.course_name, "CS101");
        assert_eq!(analysis.instructor, "Dr. X");
        assert_eq!(analysis.semester, "Fall 2024");
        assert_eq!(analysis.events.len(), 1);
        assert_eq!(analysis.events[0].date, "2024-09-03");
        assert_eq!(analysis.events[0].event_type, EventType::Assignment);
        assert_eq!(analysis.events[0].week, Some(1));
        assert_eq!(analysis.grade_breakdown.len(), 1);
        assert_eq!(analysis.total_events, 1);
        assert!(!analysis.error);
    }

    #[test]
    fn test_scenario_b_no_json_at_all() {
        let result = normalize("I'm sorry, I can't help with that.");
        assert!(matches!(result, Err(NormalizationError::NoJsonFound)));
    }

    #[test]
    fn test_scenario_c_rejection_carries_model_message() {
        let raw = r#"{"error": true, "message": "This is a resume, not a syllabus."}"#;
        match normalize(raw).unwrap() {
            AnalysisOutcome::Rejected { message } => {
                assert_eq!(message, "This is a resume, not a syllabus.");
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_rejection_without_message_gets_default() {
        match normalize(r#"{"error": true}"#).unwrap() {
            AnalysisOutcome::Rejected { message } => {
                assert_eq!(message, DEFAULT_REJECTION_MESSAGE);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_scenario_d_bad_date_dropped_total_events_untouched() {
        let raw = r#"{
            "courseName": "CS101",
            "events": [
                {"date": "not-a-date", "title": "Mystery", "type": "exam", "description": ""},
                {"date": "2024-10-01", "title": "Midterm", "type": "midterm", "description": ""}
            ],
            "totalEvents": 2
        }"#;
        let analysis = expect_analysis(raw);
        assert_eq!(analysis.events.len(), 1);
        assert_eq!(analysis.events[0].title, "Midterm");
        // reported count survives even though one event was dropped
        assert_eq!(analysis.total_events, 2);
    }

    #[test]
    fn test_impossible_calendar_date_dropped() {
        let raw = r#"{"events": [{"date": "2024-02-30", "title": "Ghost", "type": "quiz"}]}"#;
        assert!(expect_analysis(raw).events.is_empty());
    }

    #[test]
    fn test_unknown_event_type_coerces_to_other() {
        let raw = r#"{"events": [{"date": "2024-09-03", "title": "Seminar", "type": "seminar"}]}"#;
        let analysis = expect_analysis(raw);
        assert_eq!(analysis.events[0].event_type, EventType::Other);
    }

    #[test]
    fn test_missing_fields_default() {
        let analysis = expect_analysis("{}");
        assert_eq!(analysis.course_name, "");
        assert_eq!(analysis.instructor, "");
        assert!(analysis.grade_breakdown.is_empty());
        assert!(analysis.events.is_empty());
        assert_eq!(analysis.total_events, 0);
    }

    #[test]
    fn test_malformed_json_is_reported_not_coerced() {
        let raw = "Here you go: {\"courseName\": \"CS101\", ";
        // span extraction needs a closing brace; without one this is NoJsonFound
        assert!(matches!(normalize(raw), Err(NormalizationError::NoJsonFound)));

        let truncated = "{\"courseName\": \"CS101\", \"events\": [{\"date\"}";
        assert!(matches!(
            normalize(truncated),
            Err(NormalizationError::MalformedJson(_))
        ));
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let first = normalize(SCENARIO_A).unwrap();
        let second = normalize(SCENARIO_A).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prose_on_both_sides_of_the_object() {
        let raw = format!("Of course.\n\n{}\n\nLet me know if you need more.", r#"{"courseName":"Bio 200","events":[],"totalEvents":0}"#);
        let analysis = expect_analysis(&raw);
        assert_eq!(analysis.course_name, "Bio 200");
    }

    #[test]
    fn test_nonpositive_week_treated_as_absent() {
        let raw = r#"{"events": [
            {"date": "2024-09-03", "title": "A", "type": "class", "week": 0},
            {"date": "2024-09-04", "title": "B", "type": "class", "week": -2},
            {"date": "2024-09-05", "title": "C", "type": "class", "week": 3}
        ]}"#;
        let analysis = expect_analysis(raw);
        assert_eq!(analysis.events[0].week, None);
        assert_eq!(analysis.events[1].week, None);
        assert_eq!(analysis.events[2].week, Some(3));
    }

    #[test]
    fn test_grade_percentage_accepts_numeric_strings() {
        let raw = r#"{"gradeBreakdown": [
            {"category": "Homework", "percentage": "25"},
            {"category": "Final", "percentage": "40%"},
            {"category": "Labs", "percentage": 35}
        ]}"#;
        let analysis = expect_analysis(raw);
        assert_eq!(analysis.grade_breakdown[0].percentage, 25.0);
        assert_eq!(analysis.grade_breakdown[1].percentage, 40.0);
        assert_eq!(analysis.grade_breakdown[2].percentage, 35.0);
    }

    #[test]
    fn test_grade_row_without_category_dropped() {
        let raw = r#"{"gradeBreakdown": [
            {"percentage": 50},
            {"category": "  ", "percentage": 30},
            {"category": "Quizzes", "percentage": 20}
        ]}"#;
        let analysis = expect_analysis(raw);
        assert_eq!(analysis.grade_breakdown.len(), 1);
        assert_eq!(analysis.grade_breakdown[0].category, "Quizzes");
    }

    #[test]
    fn test_events_preserve_extraction_order() {
        let raw = r#"{"events": [
            {"date": "2024-12-10", "title": "Final", "type": "final"},
            {"date": "2024-09-03", "title": "First class", "type": "class"}
        ]}"#;
        let analysis = expect_analysis(raw);
        // insertion order = extraction order; display layers may re-sort
        assert_eq!(analysis.events[0].title, "Final");
        assert_eq!(analysis.events[1].title, "First class");
    }
}
