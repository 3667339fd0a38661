//! Typed error enum for the LLM crate.

use thiserror::Error;

/// Errors from the upstream chat-completion endpoint.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("{0} is not set")]
    MissingConfig(&'static str),
    #[error("client initialization failed: {0}")]
    ClientInit(String),
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] reqwest::Error),
    #[error("HTTP status {code}: {body}")]
    HttpStatus { code: u16, body: String },
    #[error("JSON parse error in {context}: {source}")]
    JsonParse {
        context: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty response: no choices returned")]
    EmptyResponse,
}

impl LlmError {
    /// Whether the failure happened before any request was sent.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Self::MissingConfig(_) | Self::ClientInit(_))
    }
}
