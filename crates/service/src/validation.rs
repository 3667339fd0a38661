//! Strict JSON validation of model replies.

use serde::de::DeserializeOwned;
use thiserror::Error;

/// Model reply is not JSON, or is JSON of the wrong shape.
#[derive(Debug, Error)]
#[error("model reply does not match the {schema} schema: {source}")]
pub struct ValidationError {
    pub schema: &'static str,
    #[source]
    pub source: serde_json::Error,
}

/// Parses `raw` strictly as JSON into `T`. Only surrounding whitespace is tolerated.
pub fn validate_reply<T: DeserializeOwned>(
    schema: &'static str,
    raw: &str,
) -> Result<T, ValidationError> {
    serde_json::from_str(raw.trim()).map_err(|source| ValidationError { schema, source })
}

#[cfg(test)]
mod tests {
    use curricula_core::{CurriculumAnalysis, TestDraft};

    use super::*;

    const VALID_ANALYSIS: &str = r#"{
        "summary": "Fractions and decimals",
        "topics": [{"name": "Fractions"}],
        "learning_objectives": [{"code": "LO1", "objective": "Add fractions"}],
        "difficulty_assessment": "moderate",
        "notes_for_teacher": "Use visual models"
    }"#;

    #[test]
    fn test_valid_analysis() {
        let a: CurriculumAnalysis = validate_reply("curriculum", VALID_ANALYSIS).unwrap();
        assert_eq!(a.summary, "Fractions and decimals");
        assert_eq!(a.topics.len(), 1);
        assert_eq!(a.learning_objectives[0]["code"], "LO1");
    }

    #[test]
    fn test_extra_fields_ignored() {
        let raw = VALID_ANALYSIS.replacen('{', r#"{"confidence": 0.9,"#, 1);
        assert!(validate_reply::<CurriculumAnalysis>("curriculum", &raw).is_ok());
    }

    #[test]
    fn test_not_json() {
        let err = validate_reply::<CurriculumAnalysis>("curriculum", "Sure! Here is the analysis")
            .unwrap_err();
        assert_eq!(err.schema, "curriculum");
        assert!(err.source.is_syntax());
    }

    #[test]
    fn test_markdown_fence_rejected() {
        let fenced = format!("```json\n{VALID_ANALYSIS}\n```");
        assert!(validate_reply::<CurriculumAnalysis>("curriculum", &fenced).is_err());
    }

    #[test]
    fn test_missing_field() {
        let raw = r#"{"summary": "x", "topics": [], "learning_objectives": [], "difficulty_assessment": "easy"}"#;
        let err = validate_reply::<CurriculumAnalysis>("curriculum", raw).unwrap_err();
        assert!(err.source.is_data());
        assert!(err.to_string().contains("notes_for_teacher"));
    }

    #[test]
    fn test_wrong_type() {
        let raw = r#"{"summary": "x", "topics": "algebra", "learning_objectives": [], "difficulty_assessment": "easy", "notes_for_teacher": ""}"#;
        assert!(validate_reply::<CurriculumAnalysis>("curriculum", raw).is_err());
    }

    #[test]
    fn test_list_entries_must_be_objects() {
        let raw = r#"{"summary": "x", "topics": ["algebra"], "learning_objectives": [], "difficulty_assessment": "easy", "notes_for_teacher": ""}"#;
        assert!(validate_reply::<CurriculumAnalysis>("curriculum", raw).is_err());
    }

    #[test]
    fn test_test_draft_negative_duration_rejected() {
        let raw = r#"{"title": "Quiz", "duration_minutes": -5, "questions": [], "answer_key": [], "notes_for_teacher": ""}"#;
        assert!(validate_reply::<TestDraft>("test draft", raw).is_err());
    }
}
