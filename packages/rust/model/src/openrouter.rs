//! OpenAI-compatible chat-completions backend (OpenRouter by default).
//!
//! Requests ask for a `json_schema` response format so that compliant
//! models answer with the label object directly.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use url::Url;

use placard_shared::{ModelConfig, PlacardError, Result, resolve_api_key};

use crate::backend::ModelBackend;
use crate::prompt::label_schema;

/// User-Agent string for model requests.
const USER_AGENT: &str = concat!("Placard/", env!("CARGO_PKG_VERSION"));

/// Connection setup budget, separate from the overall request timeout.
const CONNECT_TIMEOUT_SECS: u64 = 10;

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    response_format: serde_json::Value,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Backend
// ---------------------------------------------------------------------------

/// Chat-completions backend configured from `[model]`.
pub struct OpenRouterBackend {
    client: Client,
    completions_url: Url,
    config: ModelConfig,
    /// Explicit key; when absent the key is read from `config.api_key_env`
    /// on every call.
    api_key: Option<String>,
}

impl OpenRouterBackend {
    /// Build a backend from the `[model]` config section.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let completions_url = config
            .endpoint_url()?
            .join("chat/completions")
            .map_err(|e| PlacardError::config(format!("invalid completions URL: {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PlacardError::Network(format!("failed to build HTTP client: {e}")))?;

        info!(url = %completions_url, model = %config.model, "configured model backend");

        Ok(Self {
            client,
            completions_url,
            config: config.clone(),
            api_key: None,
        })
    }

    /// Use this key instead of reading the configured env var.
    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    fn api_key(&self) -> Result<String> {
        match &self.api_key {
            Some(key) => Ok(key.clone()),
            None => resolve_api_key(&self.config),
        }
    }

    fn request_body<'a>(&'a self, prompt: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            response_format: serde_json::json!({
                "type": "json_schema",
                "json_schema": {
                    "name": "artwork_label",
                    "strict": true,
                    "schema": label_schema(),
                },
            }),
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl ModelBackend for OpenRouterBackend {
    fn name(&self) -> &str {
        "openrouter"
    }

    async fn is_available(&self) -> bool {
        self.config.enabled && self.api_key().is_ok()
    }

    async fn infer(&self, prompt: &str) -> Result<String> {
        let api_key = self.api_key()?;
        let url = self.completions_url.as_str();

        let response = self
            .client
            .post(url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    PlacardError::Timeout {
                        secs: self.config.timeout_secs,
                    }
                } else {
                    PlacardError::Network(format!("{url}: {e}"))
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            return Err(PlacardError::Model(format!("HTTP {status}: {snippet}")));
        }

        let reply: ChatResponse = response
            .json()
            .await
            .map_err(|e| PlacardError::Model(format!("invalid completions payload: {e}")))?;

        let content = reply
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| PlacardError::Model("completion has no message content".into()))?;

        debug!(chars = content.len(), "model replied");
        Ok(content)
    }
}
