use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssessmentStatus {
    InProgress,
    Completed,
    Abandoned,
}

impl Default for AssessmentStatus {
    fn default() -> Self {
        AssessmentStatus::InProgress
    }
}

/// Raw response payload. The wire form is untagged: a boolean, a list of
/// selected options, or free text.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Bool(bool),
    Selected(Vec<String>),
    Text(String),
}

impl AnswerValue {
    /// Lookup key for mapping-style rules. Booleans use `true`/`false`;
    /// a one-element selection is treated as its single option. Multi
    /// selections have no single key.
    pub fn mapping_key(&self) -> Option<String> {
        match self {
            AnswerValue::Bool(flag) => Some(flag.to_string()),
            AnswerValue::Text(text) => Some(text.clone()),
            AnswerValue::Selected(options) if options.len() == 1 => Some(options[0].clone()),
            AnswerValue::Selected(_) => None,
        }
    }

    /// Human-readable form used in error and warning messages.
    pub fn display(&self) -> String {
        match self {
            AnswerValue::Bool(flag) => flag.to_string(),
            AnswerValue::Text(text) => text.clone(),
            AnswerValue::Selected(options) => options.join(", "),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Answer {
    pub question_id: String,
    pub value: AnswerValue,
    #[serde(default)]
    pub answered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Assessment {
    pub id: String,
    pub template_id: String,
    #[serde(default)]
    pub status: AssessmentStatus,
    pub answers: Vec<Answer>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answer_value_parses_all_untagged_forms() {
        let boolean: AnswerValue = serde_json::from_str("true").expect("bool should parse");
        assert_eq!(boolean, AnswerValue::Bool(true));

        let text: AnswerValue = serde_json::from_str(r#""partial""#).expect("text should parse");
        assert_eq!(text, AnswerValue::Text("partial".to_string()));

        let selected: AnswerValue =
            serde_json::from_str(r#"["mfa", "sso"]"#).expect("list should parse");
        assert_eq!(
            selected,
            AnswerValue::Selected(vec!["mfa".to_string(), "sso".to_string()])
        );
    }

    #[test]
    fn mapping_key_covers_booleans_and_single_selections() {
        assert_eq!(
            AnswerValue::Bool(false).mapping_key(),
            Some("false".to_string())
        );
        assert_eq!(
            AnswerValue::Selected(vec!["yes".to_string()]).mapping_key(),
            Some("yes".to_string())
        );
        assert_eq!(
            AnswerValue::Selected(vec!["a".to_string(), "b".to_string()]).mapping_key(),
            None
        );
    }

    #[test]
    fn assessment_status_uses_screaming_wire_form() {
        let assessment: Assessment = serde_json::from_str(
            r#"{"id": "a1", "template_id": "t1", "status": "IN_PROGRESS", "answers": []}"#,
        )
        .expect("assessment should parse");
        assert_eq!(assessment.status, AssessmentStatus::InProgress);
    }
}
