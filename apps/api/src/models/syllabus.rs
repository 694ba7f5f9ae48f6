//! Core data model for analyzed syllabi.
//!
//! Field names serialize in camelCase because this is the wire contract
//! shared with the extraction prompt and the frontend (`courseName`,
//! `gradeBreakdown`, `totalEvents`, ...). Keep the two in sync.

use serde::{Deserialize, Serialize};

/// Closed set of event classifications the extraction prompt is allowed to
/// emit. Anything outside the set coerces to `Other` on deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum EventType {
    Assignment,
    Exam,
    Quiz,
    Project,
    Reading,
    Class,
    Discussion,
    Presentation,
    Lab,
    Homework,
    Midterm,
    Final,
    Other,
}

impl From<String> for EventType {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl EventType {
    /// Maps a raw type string onto the closed set. Unrecognized values
    /// become `Other` rather than failing the whole record.
    pub fn parse(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "assignment" => EventType::Assignment,
            "exam" => EventType::Exam,
            "quiz" => EventType::Quiz,
            "project" => EventType::Project,
            "reading" => EventType::Reading,
            "class" => EventType::Class,
            "discussion" => EventType::Discussion,
            "presentation" => EventType::Presentation,
            "lab" => EventType::Lab,
            "homework" => EventType::Homework,
            "midterm" => EventType::Midterm,
            "final" => EventType::Final,
            _ => EventType::Other,
        }
    }
}

/// A single dated entry extracted from a syllabus.
///
/// `date` is kept as the normalized `YYYY-MM-DD` string rather than a
/// parsed date: the calendar groups events by exact string equality on
/// this key. Normalization guarantees the string parses as a real
/// calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub date: String,
    pub title: String,
    #[serde(rename = "type")]
    pub event_type: EventType,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub week: Option<u32>,
}

/// One row of the grading scheme. Percentages are whatever the document
/// claims; they are not required to sum to 100.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBreakdown {
    pub category: String,
    pub percentage: f64,
}

/// The aggregate produced by one successful extraction + normalization
/// cycle. Immutable after construction; appended to the store only on an
/// explicit save.
///
/// `total_events` is the count the extraction reported, passed through
/// untouched — display-only, never re-derived from `events`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SyllabusAnalysis {
    #[serde(default)]
    pub course_name: String,
    #[serde(default)]
    pub instructor: String,
    #[serde(default)]
    pub semester: String,
    #[serde(default)]
    pub grade_breakdown: Vec<GradeBreakdown>,
    #[serde(default)]
    pub events: Vec<CalendarEvent>,
    #[serde(default)]
    pub total_events: i64,
    /// When true this record is a rejection ("not a syllabus"), not course
    /// data. Rejections are surfaced to the user and discarded, never saved.
    #[serde(default)]
    pub error: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
