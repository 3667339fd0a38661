//! Service layer for curricula
//!
//! Centralizes the request pipeline between HTTP handlers and storage/llm:
//! render prompt → call model → validate reply → optionally persist.

mod curriculum_service;
mod error;
pub mod validation;

pub use curriculum_service::{CurriculumService, ParseOutcome};
pub use error::ServiceError;
pub use validation::{ValidationError, validate_reply};
