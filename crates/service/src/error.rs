//! Typed error enum for the service layer.
//!
//! Unifies storage, LLM, validation and input failures so handlers can map
//! each kind to a status code without downcasting.

use curricula_core::CoreError;
use curricula_llm::LlmError;
use curricula_storage::StorageError;
use thiserror::Error;

use crate::validation::ValidationError;

#[derive(Debug, Error)]
pub enum ServiceError {
    /// Storage operation failed (DB, not found, constraint).
    #[error("storage: {0}")]
    Storage(#[from] StorageError),

    /// Upstream model call failed or is not configured.
    #[error("llm: {0}")]
    Llm(#[from] LlmError),

    /// Model reply did not match the expected schema.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Prompt template could not be rendered.
    #[error("template: {0}")]
    Template(#[source] CoreError),

    /// Caller provided invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ServiceError {
    /// Whether this error represents a not-found condition.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Storage(StorageError::NotFound { .. }))
    }

    /// Whether the upstream call was refused before any network traffic.
    pub fn is_config(&self) -> bool {
        matches!(self, Self::Llm(e) if e.is_config())
    }
}
