//! Request payloads and insert inputs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::{
    CURRICULUM_SYSTEM_MAX_LEN, DIFFICULTY_MAX_LEN, GRADE_MAX_LEN, OBJECTIVE_CODE_MAX_LEN,
    SUBJECT_MAX_LEN,
};
use crate::curriculum::{AssessmentWeight, CreatedBy, SkillType, VersionSource};
use crate::error::CoreError;

/// Body of `POST /curriculum/parse`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurriculumParseRequest {
    pub subject: String,
    pub grade: String,
    pub curriculum: String,
    /// Label stored with the curriculum when `persist` is set.
    #[serde(default)]
    pub curriculum_system: Option<String>,
    /// Store the validated analysis as a new curriculum (version 1).
    #[serde(default)]
    pub persist: bool,
}

/// Body of `POST /test/generate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TestGenerateRequest {
    pub subject: String,
    pub grade: String,
    pub purpose: String,
    pub duration_minutes: u32,
    /// Share of questions per difficulty level, e.g. `{"easy": 40, "medium": 40, "hard": 20}`.
    pub difficulty_mix: BTreeMap<String, u32>,
    pub learning_objectives: Vec<String>,
}

impl TestGenerateRequest {
    /// Difficulty mix as one line, e.g. `easy: 40%, hard: 20%`.
    #[must_use]
    pub fn difficulty_mix_line(&self) -> String {
        if self.difficulty_mix.is_empty() {
            return "not specified".to_owned();
        }
        self.difficulty_mix
            .iter()
            .map(|(level, share)| format!("{level}: {share}%"))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Objectives as a bulleted block.
    #[must_use]
    pub fn objectives_block(&self) -> String {
        self.learning_objectives
            .iter()
            .map(|o| format!("- {}", o.trim()))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Body of `POST /curricula`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCurriculum {
    pub subject: String,
    pub grade: String,
    pub curriculum_system: String,
    /// Optional first version stored together with the identity row.
    #[serde(default)]
    pub initial_version: Option<NewVersion>,
}

/// Body of `POST /curricula/{id}/versions`; also the initial version of a new curriculum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVersion {
    pub created_by: CreatedBy,
    pub source: VersionSource,
    pub summary: String,
    #[serde(default)]
    pub difficulty_assessment: Option<String>,
    #[serde(default)]
    pub notes_for_teacher: Option<String>,
    #[serde(default)]
    pub learning_objectives: Vec<NewObjective>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewObjective {
    pub code: String,
    pub objective_text: String,
    pub skill_type: SkillType,
    #[serde(default)]
    pub assessment_weight: AssessmentWeight,
}

fn check_text(field: &'static str, value: &str, max_len: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::InvalidField { field, reason: "must not be empty".to_owned() });
    }
    if value.chars().count() > max_len {
        return Err(CoreError::InvalidField {
            field,
            reason: format!("longer than {max_len} characters"),
        });
    }
    Ok(())
}

impl NewCurriculum {
    /// Checks column limits and nested version/objective fields.
    pub fn validate(&self) -> Result<(), CoreError> {
        check_text("subject", &self.subject, SUBJECT_MAX_LEN)?;
        check_text("grade", &self.grade, GRADE_MAX_LEN)?;
        check_text("curriculum_system", &self.curriculum_system, CURRICULUM_SYSTEM_MAX_LEN)?;
        if let Some(version) = &self.initial_version {
            version.validate()?;
        }
        Ok(())
    }
}

impl NewVersion {
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.summary.trim().is_empty() {
            return Err(CoreError::InvalidField {
                field: "summary",
                reason: "must not be empty".to_owned(),
            });
        }
        if let Some(difficulty) = &self.difficulty_assessment {
            if difficulty.chars().count() > DIFFICULTY_MAX_LEN {
                return Err(CoreError::InvalidField {
                    field: "difficulty_assessment",
                    reason: format!("longer than {DIFFICULTY_MAX_LEN} characters"),
                });
            }
        }
        for objective in &self.learning_objectives {
            check_text("learning_objectives.code", &objective.code, OBJECTIVE_CODE_MAX_LEN)?;
            if objective.objective_text.trim().is_empty() {
                return Err(CoreError::InvalidField {
                    field: "learning_objectives.objective_text",
                    reason: "must not be empty".to_owned(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_curriculum() -> NewCurriculum {
        NewCurriculum {
            subject: "English".to_owned(),
            grade: "7".to_owned(),
            curriculum_system: "Cambridge".to_owned(),
            initial_version: None,
        }
    }

    #[test]
    fn test_new_curriculum_valid() {
        assert!(new_curriculum().validate().is_ok());
    }

    #[test]
    fn test_new_curriculum_rejects_blank_subject() {
        let mut c = new_curriculum();
        c.subject = "  ".to_owned();
        assert_eq!(
            c.validate(),
            Err(CoreError::InvalidField { field: "subject", reason: "must not be empty".to_owned() })
        );
    }

    #[test]
    fn test_new_curriculum_rejects_long_grade() {
        let mut c = new_curriculum();
        c.grade = "g".repeat(GRADE_MAX_LEN + 1);
        assert!(matches!(c.validate(), Err(CoreError::InvalidField { field: "grade", .. })));
    }

    #[test]
    fn test_nested_objective_code_checked() {
        let mut c = new_curriculum();
        c.initial_version = Some(NewVersion {
            created_by: CreatedBy::Teacher,
            source: VersionSource::Edit,
            summary: "Reading focus".to_owned(),
            difficulty_assessment: None,
            notes_for_teacher: None,
            learning_objectives: vec![NewObjective {
                code: String::new(),
                objective_text: "Identify main idea".to_owned(),
                skill_type: SkillType::Reading,
                assessment_weight: AssessmentWeight::High,
            }],
        });
        assert!(matches!(
            c.validate(),
            Err(CoreError::InvalidField { field: "learning_objectives.code", .. })
        ));
    }

    #[test]
    fn test_objective_weight_defaults_to_medium() {
        let o: NewObjective = serde_json::from_str(
            r#"{"code": "LO1", "objective_text": "Use past tense", "skill_type": "grammar"}"#,
        )
        .unwrap();
        assert_eq!(o.assessment_weight, AssessmentWeight::Medium);
    }

    #[test]
    fn test_parse_request_optional_fields_default() {
        let req: CurriculumParseRequest =
            serde_json::from_str(r#"{"subject": "Math", "grade": "5", "curriculum": "Fractions"}"#)
                .unwrap();
        assert!(!req.persist);
        assert!(req.curriculum_system.is_none());
    }

    #[test]
    fn test_difficulty_mix_line_is_sorted() {
        let req = TestGenerateRequest {
            subject: "Math".to_owned(),
            grade: "5".to_owned(),
            purpose: "quiz".to_owned(),
            duration_minutes: 30,
            difficulty_mix: BTreeMap::from([
                ("medium".to_owned(), 50),
                ("easy".to_owned(), 30),
                ("hard".to_owned(), 20),
            ]),
            learning_objectives: vec!["Add fractions".to_owned(), " Compare decimals ".to_owned()],
        };
        assert_eq!(req.difficulty_mix_line(), "easy: 30%, hard: 20%, medium: 50%");
        assert_eq!(req.objectives_block(), "- Add fractions\n- Compare decimals");
    }
}
