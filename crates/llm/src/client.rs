use curricula_core::{
    DEFAULT_LLM_TIMEOUT_SECS, DEFAULT_TEMPERATURE, ENV_LLM_API_KEY, ENV_LLM_API_VERSION,
    ENV_LLM_DEPLOYMENT, ENV_LLM_ENDPOINT, ENV_LLM_TEMPERATURE, ENV_LLM_TIMEOUT_SECS,
    env_non_empty, env_parse_with_default,
};

use crate::ai_types::{ChatRequest, ChatResponse, Message, ResponseFormat};
use crate::error::LlmError;

/// Upstream settings as read from the environment; any of the four required
/// values may still be missing.
#[derive(Clone)]
pub struct LlmSettings {
    pub endpoint: Option<String>,
    pub api_key: Option<String>,
    pub api_version: Option<String>,
    pub deployment: Option<String>,
    pub temperature: f32,
    pub timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            api_version: None,
            deployment: None,
            temperature: DEFAULT_TEMPERATURE,
            timeout_secs: DEFAULT_LLM_TIMEOUT_SECS,
        }
    }
}

impl std::fmt::Debug for LlmSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmSettings")
            .field("endpoint", &self.endpoint)
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("api_version", &self.api_version)
            .field("deployment", &self.deployment)
            .field("temperature", &self.temperature)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl LlmSettings {
    /// Reads settings from the process environment. Never fails; missing
    /// values are reported when the client is first needed.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            endpoint: env_non_empty(ENV_LLM_ENDPOINT),
            api_key: env_non_empty(ENV_LLM_API_KEY),
            api_version: env_non_empty(ENV_LLM_API_VERSION),
            deployment: env_non_empty(ENV_LLM_DEPLOYMENT),
            temperature: env_parse_with_default(ENV_LLM_TEMPERATURE, DEFAULT_TEMPERATURE),
            timeout_secs: env_parse_with_default(ENV_LLM_TIMEOUT_SECS, DEFAULT_LLM_TIMEOUT_SECS),
        }
    }

    /// Names of required settings that are absent or blank.
    #[must_use]
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (ENV_LLM_ENDPOINT, &self.endpoint),
            (ENV_LLM_API_KEY, &self.api_key),
            (ENV_LLM_API_VERSION, &self.api_version),
            (ENV_LLM_DEPLOYMENT, &self.deployment),
        ]
        .into_iter()
        .filter(|(_, v)| v.as_deref().is_none_or(|s| s.trim().is_empty()))
        .map(|(name, _)| name)
        .collect()
    }

    fn require(value: Option<&String>, var: &'static str) -> Result<String, LlmError> {
        value
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(ToOwned::to_owned)
            .ok_or(LlmError::MissingConfig(var))
    }

    /// Checks that every required value is present.
    ///
    /// # Errors
    /// Returns `LlmError::MissingConfig` naming the first absent variable.
    pub fn resolve(&self) -> Result<LlmConfig, LlmError> {
        Ok(LlmConfig {
            endpoint: Self::require(self.endpoint.as_ref(), ENV_LLM_ENDPOINT)?
                .trim_end_matches('/')
                .to_owned(),
            api_key: Self::require(self.api_key.as_ref(), ENV_LLM_API_KEY)?,
            api_version: Self::require(self.api_version.as_ref(), ENV_LLM_API_VERSION)?,
            deployment: Self::require(self.deployment.as_ref(), ENV_LLM_DEPLOYMENT)?,
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
        })
    }
}

/// Complete upstream configuration.
#[derive(Clone)]
pub struct LlmConfig {
    pub endpoint: String,
    pub api_key: String,
    pub api_version: String,
    pub deployment: String,
    pub temperature: f32,
    pub timeout_secs: u64,
}

/// Client for one chat-completion deployment.
pub struct LlmClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl std::fmt::Debug for LlmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmClient")
            .field("client", &self.client)
            .field("endpoint", &self.config.endpoint)
            .field("api_key", &"***")
            .field("api_version", &self.config.api_version)
            .field("deployment", &self.config.deployment)
            .finish()
    }
}

impl LlmClient {
    /// Builds the HTTP client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be built (TLS backend failure).
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| LlmError::ClientInit(e.to_string()))?;
        Ok(Self { client, config })
    }

    #[must_use]
    pub fn deployment(&self) -> &str {
        &self.config.deployment
    }

    fn completions_url(&self) -> String {
        format!(
            "{}/openai/deployments/{}/chat/completions",
            self.config.endpoint, self.config.deployment
        )
    }

    /// Sends one system + user exchange and returns the first choice's raw content.
    ///
    /// Single attempt: no retry on any status.
    ///
    /// # Errors
    /// Returns an error if the HTTP request fails, the API returns a
    /// non-success status, the envelope cannot be parsed, or no content is returned.
    pub async fn chat_completion(&self, system: &str, user: &str) -> Result<String, LlmError> {
        let request = ChatRequest {
            messages: [
                Message { role: "system", content: system },
                Message { role: "user", content: user },
            ],
            temperature: self.config.temperature,
            response_format: ResponseFormat { format_type: "json_object" },
        };

        let response = self
            .client
            .post(self.completions_url())
            .query(&[("api-version", self.config.api_version.as_str())])
            .header("api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(LlmError::HttpStatus {
                code: status.as_u16(),
                body: truncate(&body, 500).to_owned(),
            });
        }

        let chat_response: ChatResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::JsonParse {
                context: format!("chat completion response (body: {})", truncate(&body, 200)),
                source: e,
            })?;

        chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(LlmError::EmptyResponse)
    }
}

/// Truncates a string to the given maximum length at a char boundary.
#[must_use]
pub fn truncate(s: &str, max_len: usize) -> &str {
    if s.len() <= max_len {
        s
    } else {
        let mut end = max_len;
        while end > 0 && !s.is_char_boundary(end) {
            end = end.saturating_sub(1);
        }
        s.get(..end).unwrap_or("")
    }
}
