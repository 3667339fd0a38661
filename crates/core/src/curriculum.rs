//! Curriculum persistence types.
//!
//! A `Curriculum` is an identity record (subject, grade, curriculum system).
//! Each interpretation of it is a `CurriculumVersion`, and every version owns
//! the `LearningObjective`s that tests are later assembled against.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Who produced a curriculum version.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum CreatedBy {
    /// Generated by the language model
    Ai,
    /// Written or edited by a teacher
    Teacher,
}

impl CreatedBy {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Ai => "ai",
            Self::Teacher => "teacher",
        }
    }
}

impl FromStr for CreatedBy {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "ai" => Ok(Self::Ai),
            "teacher" => Ok(Self::Teacher),
            other => Err(CoreError::InvalidCreatedBy(other.to_owned())),
        }
    }
}

/// How a curriculum version came to exist.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VersionSource {
    /// First interpretation, produced by parsing raw curriculum text
    Parse,
    /// Manual edit of an earlier version
    Edit,
    /// Fresh model pass over an existing curriculum
    Regenerate,
}

impl VersionSource {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Parse => "parse",
            Self::Edit => "edit",
            Self::Regenerate => "regenerate",
        }
    }
}

impl FromStr for VersionSource {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "parse" => Ok(Self::Parse),
            "edit" => Ok(Self::Edit),
            "regenerate" => Ok(Self::Regenerate),
            other => Err(CoreError::InvalidVersionSource(other.to_owned())),
        }
    }
}

/// Skill assessed by a learning objective.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SkillType {
    Reading,
    Writing,
    Listening,
    Speaking,
    Grammar,
    Vocabulary,
    Math,
}

impl SkillType {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Reading => "reading",
            Self::Writing => "writing",
            Self::Listening => "listening",
            Self::Speaking => "speaking",
            Self::Grammar => "grammar",
            Self::Vocabulary => "vocabulary",
            Self::Math => "math",
        }
    }
}

impl FromStr for SkillType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "reading" => Ok(Self::Reading),
            "writing" => Ok(Self::Writing),
            "listening" => Ok(Self::Listening),
            "speaking" => Ok(Self::Speaking),
            "grammar" => Ok(Self::Grammar),
            "vocabulary" => Ok(Self::Vocabulary),
            "math" | "mathematics" => Ok(Self::Math),
            other => Err(CoreError::InvalidSkillType(other.to_owned())),
        }
    }
}

/// Relative weight of an objective when a test is assembled.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentWeight {
    Low,
    #[default]
    Medium,
    High,
}

impl AssessmentWeight {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match *self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl FromStr for AssessmentWeight {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            other => Err(CoreError::InvalidAssessmentWeight(other.to_owned())),
        }
    }
}

/// Curriculum identity record with its versions, ordered by version number.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Curriculum {
    pub id: i64,
    pub subject: String,
    pub grade: String,
    pub curriculum_system: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub versions: Vec<CurriculumVersion>,
}

/// One interpretation of a curriculum.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CurriculumVersion {
    pub id: i64,
    pub curriculum_id: i64,
    pub version_number: i32,
    pub created_by: CreatedBy,
    pub source: VersionSource,
    pub summary: String,
    pub difficulty_assessment: Option<String>,
    pub notes_for_teacher: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub learning_objectives: Vec<LearningObjective>,
}

/// Assessable skill target; belongs to exactly one version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LearningObjective {
    pub id: i64,
    pub curriculum_version_id: i64,
    /// Short code such as `LO1`
    pub code: String,
    pub objective_text: String,
    pub skill_type: SkillType,
    pub assessment_weight: AssessmentWeight,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_round_trip_through_str() {
        for skill in [
            SkillType::Reading,
            SkillType::Writing,
            SkillType::Listening,
            SkillType::Speaking,
            SkillType::Grammar,
            SkillType::Vocabulary,
            SkillType::Math,
        ] {
            assert_eq!(skill.as_str().parse::<SkillType>(), Ok(skill));
        }
        assert_eq!("Teacher".parse::<CreatedBy>(), Ok(CreatedBy::Teacher));
        assert_eq!(" REGENERATE ".parse::<VersionSource>(), Ok(VersionSource::Regenerate));
        assert_eq!("High".parse::<AssessmentWeight>(), Ok(AssessmentWeight::High));
    }

    #[test]
    fn test_enum_rejects_unknown() {
        assert_eq!(
            "history".parse::<SkillType>(),
            Err(CoreError::InvalidSkillType("history".to_owned()))
        );
        assert!("robot".parse::<CreatedBy>().is_err());
        assert!("import".parse::<VersionSource>().is_err());
        assert!("critical".parse::<AssessmentWeight>().is_err());
    }

    #[test]
    fn test_skill_type_serde_uses_snake_case() {
        let json = serde_json::to_string(&SkillType::Vocabulary).unwrap();
        assert_eq!(json, "\"vocabulary\"");
        let parsed: AssessmentWeight = serde_json::from_str("\"low\"").unwrap();
        assert_eq!(parsed, AssessmentWeight::Low);
    }
}
