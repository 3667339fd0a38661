//! Lazily constructed client shared by all requests.

use std::time::Instant;

use tokio::sync::OnceCell;

use crate::client::{LlmClient, LlmSettings};
use crate::error::LlmError;

/// Holds upstream settings and builds the client on first use.
///
/// Missing settings do not stop the process from starting; each call fails
/// with `LlmError::MissingConfig` before any network traffic until the
/// configuration is complete. Once built, the client is reused.
#[derive(Debug)]
pub struct LlmGateway {
    settings: LlmSettings,
    client: OnceCell<LlmClient>,
}

impl LlmGateway {
    #[must_use]
    pub fn new(settings: LlmSettings) -> Self {
        Self { settings, client: OnceCell::new() }
    }

    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LlmSettings::from_env())
    }

    #[must_use]
    pub fn settings(&self) -> &LlmSettings {
        &self.settings
    }

    /// Whether the client has been built already.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.client.initialized()
    }

    async fn client(&self) -> Result<&LlmClient, LlmError> {
        self.client
            .get_or_try_init(|| async {
                let config = self.settings.resolve()?;
                let client = LlmClient::new(config)?;
                tracing::info!(deployment = client.deployment(), "LLM client initialized");
                Ok::<_, LlmError>(client)
            })
            .await
    }

    /// Sends one request and returns the raw reply text.
    ///
    /// # Errors
    /// Returns `LlmError::MissingConfig` when a required setting is absent,
    /// otherwise any transport or upstream error from the single attempt.
    pub async fn complete(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let client = self.client().await?;
        let started = Instant::now();
        let result = client.chat_completion(system, user).await;
        let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        match &result {
            Ok(content) => {
                tracing::debug!(elapsed_ms, reply_len = content.len(), "LLM call completed");
            },
            Err(e) => tracing::warn!(elapsed_ms, error = %e, "LLM call failed"),
        }
        result
    }
}
