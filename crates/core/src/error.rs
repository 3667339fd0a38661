use thiserror::Error;

/// Errors raised by core domain parsing and prompt rendering.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("invalid created_by: {0}")]
    InvalidCreatedBy(String),

    #[error("invalid version source: {0}")]
    InvalidVersionSource(String),

    #[error("invalid skill type: {0}")]
    InvalidSkillType(String),

    #[error("invalid assessment weight: {0}")]
    InvalidAssessmentWeight(String),

    #[error("invalid {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("template '{template}' has no value for placeholder '{placeholder}'")]
    MissingPlaceholder { template: &'static str, placeholder: &'static str },
}
