// Syllabus analysis LLM prompt templates.
// All prompts for the analysis module are defined here.
//
// The OUTPUT SCHEMA block is the wire contract mirrored by
// `models::syllabus` — keep the two in sync.

pub const SYLLABUS_EXTRACT_SYSTEM: &str = "\
You are a precise syllabus analyzer helping students turn a course syllabus \
into structured calendar and grading data. \
You MUST respond with valid JSON only — no markdown fences, no explanations. \
First verify the input actually is a course syllabus; if it is not, return a \
rejection object instead of inventing course data. \
Never guess a calendar date: an event whose date cannot be resolved is omitted.";

pub const SYLLABUS_EXTRACT_PROMPT: &str = r#"Analyze the following course syllabus and extract its grading breakdown and every dated event.

OUTPUT SCHEMA (return exactly this structure):
{
  "courseName": "string",
  "instructor": "string",
  "semester": "string",
  "gradeBreakdown": [
    { "category": "string", "percentage": number }
  ],
  "events": [
    {
      "date": "YYYY-MM-DD",
      "title": "string",
      "type": "assignment|exam|quiz|project|reading|class|discussion|presentation|lab|homework|midterm|final|other",
      "description": "string",
      "week": number or null
    }
  ],
  "totalEvents": number,
  "error": false
}

VALIDATION FIRST:
If the input is not a course syllabus (e.g. a resume, an article, random text),
return ONLY:
{ "error": true, "message": "one sentence explaining why this is not a syllabus" }

EXTRACTION RULES:
1. Search the ENTIRE document — schedules, prose, tables, footnotes,
   appendices. Events are not confined to sections with obvious headers.
2. Normalize every date to "YYYY-MM-DD". Infer a missing year from the
   semester or term context. Convert relative references ("first day of
   class", "Week 3") to absolute dates when the document supplies enough
   anchors (meeting days plus a semester start date). If an event's date
   cannot be resolved to a concrete calendar date, OMIT the event — never
   emit a guessed date.
3. When the document describes a recurring pattern ("every Tuesday", "each
   class includes a quiz"), expand it into one event per occurrence across
   the semester date range the document implies, skipping dates explicitly
   marked as holidays or no-class days.
4. Classify each event into exactly one listed type. assignment: written
   work and problem sets; exam: tests; quiz: short tests; project: major
   projects and papers; reading: required readings; class: regular
   lectures; discussion: sections and recitations; presentation: student
   presentations and demos; lab: laboratory sessions; homework: regular
   homework; midterm: midterm exams; final: final exams. Anything
   ambiguous is "other".
5. gradeBreakdown lists every graded component with its percentage, from
   sections like "Grading", "Assessment", "Evaluation", or "Course
   Requirements". Grade extraction is independent of event extraction —
   never merge the two.
6. description carries the useful details: what is due or happening, the
   topic, the format, any special instructions.
7. totalEvents is the number of objects in "events".
8. Return ONLY the JSON object — nothing else, no code fences.

Syllabus text:
{syllabus_text}"#;

/// Builds the full extraction prompt for one syllabus.
///
/// Pure string construction; callers must short-circuit on empty input
/// before any network call is made.
pub fn build_extraction_prompt(syllabus_text: &str) -> String {
    SYLLABUS_EXTRACT_PROMPT.replace("{syllabus_text}", syllabus_text)
}
