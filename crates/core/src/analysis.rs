//! Shapes the model must reply with.
//!
//! Field types are enforced by serde; list entries must be JSON objects but
//! their keys are free-form. Extra top-level fields are ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::constants::{DIFFICULTY_MAX_LEN, OBJECTIVE_CODE_MAX_LEN};
use crate::curriculum::{AssessmentWeight, CreatedBy, SkillType, VersionSource};
use crate::input::{NewObjective, NewVersion};

/// A JSON object with arbitrary keys.
pub type JsonObject = serde_json::Map<String, Value>;

/// Reply schema for curriculum parsing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurriculumAnalysis {
    pub summary: String,
    pub topics: Vec<JsonObject>,
    pub learning_objectives: Vec<JsonObject>,
    pub difficulty_assessment: String,
    pub notes_for_teacher: String,
}

/// Reply schema for test generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TestDraft {
    pub title: String,
    pub duration_minutes: u32,
    pub questions: Vec<JsonObject>,
    pub answer_key: Vec<JsonObject>,
    pub notes_for_teacher: String,
}

fn first_str<'a>(obj: &'a JsonObject, keys: &[&str]) -> Option<&'a str> {
    keys.iter()
        .filter_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::trim)
        .find(|s| !s.is_empty())
}

impl CurriculumAnalysis {
    /// Maps the free-form objective objects onto typed objectives.
    ///
    /// Entries without objective text or with an unknown skill are skipped.
    /// Missing codes become `LO<n>` by position; missing weights default to medium.
    /// Codes are cut to the column width.
    #[must_use]
    pub fn typed_objectives(&self) -> Vec<NewObjective> {
        let mut out = Vec::with_capacity(self.learning_objectives.len());
        for (idx, obj) in self.learning_objectives.iter().enumerate() {
            let Some(text) =
                first_str(obj, &["objective_text", "objective", "text", "description"])
            else {
                tracing::warn!(index = idx, "learning objective without text, skipping");
                continue;
            };
            let skill = first_str(obj, &["skill_type", "skill"]).map(str::parse::<SkillType>);
            let skill_type = match skill {
                Some(Ok(skill)) => skill,
                Some(Err(e)) => {
                    tracing::warn!(index = idx, error = %e, "unrecognized skill type, skipping");
                    continue;
                },
                None => {
                    tracing::warn!(index = idx, "learning objective without skill type, skipping");
                    continue;
                },
            };
            let assessment_weight = first_str(obj, &["assessment_weight", "weight"])
                .and_then(|w| w.parse::<AssessmentWeight>().ok())
                .unwrap_or_default();
            let code = first_str(obj, &["code", "id"])
                .map(|c| c.chars().take(OBJECTIVE_CODE_MAX_LEN).collect())
                .unwrap_or_else(|| format!("LO{}", idx.saturating_add(1)));
            out.push(NewObjective {
                code,
                objective_text: text.to_owned(),
                skill_type,
                assessment_weight,
            });
        }
        out
    }

    /// First version of a curriculum produced by a parse call.
    #[must_use]
    pub fn to_parsed_version(&self) -> NewVersion {
        NewVersion {
            created_by: CreatedBy::Ai,
            source: VersionSource::Parse,
            summary: self.summary.clone(),
            difficulty_assessment: Some(self.difficulty_assessment.trim())
                .filter(|d| !d.is_empty())
                .map(|d| d.chars().take(DIFFICULTY_MAX_LEN).collect()),
            notes_for_teacher: Some(self.notes_for_teacher.clone())
                .filter(|n| !n.trim().is_empty()),
            learning_objectives: self.typed_objectives(),
        }
    }
}
