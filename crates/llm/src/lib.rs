//! Chat-completion gateway for curricula.
//!
//! One request per call against a named deployment, no retry.

mod ai_types;
mod client;
pub mod error;
mod gateway;

pub use client::{LlmClient, LlmConfig, LlmSettings, truncate};
pub use error::LlmError;
pub use gateway::LlmGateway;
