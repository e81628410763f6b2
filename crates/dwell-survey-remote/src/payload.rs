//! Wire formats of the survey backend

use dwell_survey_core::{Answer, QuestionRecord};
use serde::Serialize;
use serde_json::Value;
use tracing::warn;

const TEXT_FIELDS: [&str; 3] = ["Text", "Name", "Label"];

/// Body of `POST /Answer/Add`. Both fields travel as strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerPayload {
    #[serde(rename = "IdQuestion")]
    pub id_question: String,
    #[serde(rename = "Value")]
    pub value: String,
}

impl From<Answer> for AnswerPayload {
    fn from(answer: Answer) -> Self {
        Self {
            id_question: answer.question_id.to_string(),
            value: if answer.value { "1" } else { "0" }.to_string(),
        }
    }
}

/// Read the question list, skipping entries without a usable id or text.
///
/// Returns `Err` with a reason when the document is not an array at all.
pub fn parse_questions(document: &Value) -> std::result::Result<Vec<QuestionRecord>, String> {
    let entries = document
        .as_array()
        .ok_or_else(|| format!("expected a JSON array, got {}", kind_of(document)))?;

    let mut records = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match parse_entry(entry) {
            Some(record) => records.push(record),
            None => warn!(index, entry = %entry, "Skipping malformed question"),
        }
    }
    Ok(records)
}

fn parse_entry(entry: &Value) -> Option<QuestionRecord> {
    let object = entry.as_object()?;

    let id = match object.get("Id")? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };

    let text = TEXT_FIELDS
        .iter()
        .filter_map(|field| object.get(*field).and_then(Value::as_str))
        .map(str::trim)
        .find(|text| !text.is_empty())?;

    Some(QuestionRecord::new(id, text))
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_answer_payload_shape() {
        let body = serde_json::to_value(AnswerPayload::from(Answer::new(4, true))).unwrap();
        assert_eq!(body, json!({"IdQuestion": "4", "Value": "1"}));

        let body = serde_json::to_value(AnswerPayload::from(Answer::new(2, false))).unwrap();
        assert_eq!(body, json!({"IdQuestion": "2", "Value": "0"}));
    }

    #[test]
    fn test_parse_questions() {
        let document = json!([
            {"Id": 2, "Text": "Did you enjoy this presentation?"},
            {"Id": "4", "Name": "Do you like the city of Toulon?"},
            {"Id": 7, "Label": "Coffee?"}
        ]);
        let records = parse_questions(&document).unwrap();
        assert_eq!(
            records,
            vec![
                QuestionRecord::new(2, "Did you enjoy this presentation?"),
                QuestionRecord::new(4, "Do you like the city of Toulon?"),
                QuestionRecord::new(7, "Coffee?"),
            ]
        );
    }

    #[test]
    fn test_malformed_entries_skipped() {
        let document = json!([
            {"Text": "no id"},
            {"Id": 3},
            {"Id": 1.5, "Text": "fractional id"},
            {"Id": 5, "Text": "   "},
            "not an object",
            {"Id": 6, "Text": "kept"}
        ]);
        let records = parse_questions(&document).unwrap();
        assert_eq!(records, vec![QuestionRecord::new(6, "kept")]);
    }

    #[test]
    fn test_non_array_rejected() {
        let err = parse_questions(&json!({"Id": 1})).unwrap_err();
        assert!(err.contains("an object"));
    }
}
