use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::LlmError;
use crate::core::config::OpenAiConfig;

/// A single system + user exchange sent to the model
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub system: String,
    pub user: String,
    pub temperature: Option<f32>,
    /// Overrides the client's default timeout for this call
    pub timeout: Option<Duration>,
}

/// Produces text from a prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ResponsesBody<'a> {
    model: &'a str,
    input: [InputMessage<'a>; 2],
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Debug, Serialize)]
struct InputMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct ResponsesPayload {
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    output: Vec<OutputItem>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
}

impl ResponsesPayload {
    /// Concatenated output text, preferring the top-level `output_text`
    fn text(&self) -> String {
        if let Some(text) = self.output_text.as_deref().filter(|t| !t.is_empty()) {
            return text.to_string();
        }

        self.output
            .iter()
            .flat_map(|item| item.content.iter())
            .filter(|block| block.kind == "output_text")
            .map(|block| block.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// HTTP client for `POST {base_url}/responses`
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiClient {
    /// Build a client, or `None` when no API key is configured
    pub fn from_config(config: &OpenAiConfig) -> Result<Option<Self>, LlmError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| LlmError::Client(e.to_string()))?;

        Ok(Some(Self {
            http,
            api_key,
            base_url: config.base_url.clone(),
        }))
    }
}

#[async_trait]
impl TextGenerator for OpenAiClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let body = ResponsesBody {
            model: &request.model,
            input: [
                InputMessage {
                    role: "system",
                    content: &request.system,
                },
                InputMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
        };

        let mut builder = self
            .http
            .post(format!("{}/responses", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body);
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }

        let response = builder.send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorPayload>(&raw)
                .map(|p| p.error.message)
                .unwrap_or_else(|_| raw.chars().take(300).collect());
            tracing::warn!("OpenAI returned {} for model {}", status, request.model);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let payload: ResponsesPayload =
            serde_json::from_str(&raw).map_err(|e| LlmError::Decode(e.to_string()))?;
        let text = payload.text();

        tracing::debug!(
            "OpenAI response (first 500 chars): {}",
            text.chars().take(500).collect::<String>()
        );

        if text.trim().is_empty() {
            return Err(LlmError::EmptyResponse);
        }

        Ok(text)
    }
}
