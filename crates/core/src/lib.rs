//! Core types and prompt templates for curricula
//!
//! Domain records, request payloads, model reply schemas and the fixed prompt
//! templates shared by every other crate.

mod analysis;
pub mod constants;
mod curriculum;
mod env_config;
mod error;
mod input;
pub mod prompt;

pub use analysis::*;
pub use constants::*;
pub use curriculum::*;
pub use env_config::*;
pub use error::*;
pub use input::*;
pub use prompt::{
    render_curriculum_prompt, render_test_prompt, PromptTemplate, CURRICULUM_PARSE,
    JSON_ONLY_SYSTEM_PROMPT, TEST_GENERATE,
};
