//! OpenAI-compatible adapter for workout schedule generation.
//!
//! Supports OpenAI API, Azure OpenAI, and local Ollama instances.
//! Implements `ModelClient` and classifies failures for the orchestrator.

use crate::domain::{DomainError, ModelError};
use crate::ports::{ModelClient, SchemaHint};
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info, warn};

/// OpenAI-compatible model adapter.
///
/// Can be configured to work with:
/// - OpenAI API (api.openai.com)
/// - Azure OpenAI
/// - Ollama (localhost)
/// - Any OpenAI-compatible API
pub struct OpenAiAdapter {
    client: reqwest::Client,
    api_url: String,
    api_key: String,
    model: String,
}

impl OpenAiAdapter {
    /// Create a new OpenAI adapter.
    ///
    /// # Arguments
    /// * `api_url` - API endpoint (e.g., "https://api.openai.com/v1/chat/completions")
    /// * `api_key` - API key (can be empty for local Ollama)
    /// * `model` - Model name (e.g., "gpt-4o-mini", "llama3.2")
    /// * `timeout` - Upper bound for one request, connect included
    pub fn new(
        api_url: String,
        api_key: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("HTTP client: {}", e)))?;
        Ok(Self {
            client,
            api_url,
            api_key,
            model,
        })
    }

    /// Build the system prompt with JSON schema instructions.
    fn system_prompt(schema_hint: &SchemaHint) -> String {
        format!(
            "You are a certified personal trainer who writes safe, progressive weekly workout plans.\n\n\
             ## Output Format\n\
             You MUST respond with valid JSON only. No markdown, no explanations outside JSON.\n\
             The JSON must match this schema ({}):\n{}\n\n\
             Every activity is one line with sets/reps or a duration.",
            schema_hint.name, schema_hint.schema
        )
    }

    /// Map a non-success HTTP status to a model error class.
    fn classify_status(status: StatusCode, body: &str) -> ModelError {
        let detail = format!(
            "API error {}: {}",
            status,
            body.chars().take(200).collect::<String>()
        );
        match status {
            StatusCode::TOO_MANY_REQUESTS if body.to_ascii_lowercase().contains("quota") => {
                ModelError::Quota(detail)
            }
            StatusCode::TOO_MANY_REQUESTS => ModelError::RateLimited(detail),
            StatusCode::PAYMENT_REQUIRED => ModelError::Quota(detail),
            _ => ModelError::Transport(detail),
        }
    }
}

/// OpenAI API request structure.
#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: String,
}

/// OpenAI API response structure.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: MessageContent,
}

#[derive(Deserialize)]
struct MessageContent {
    content: Option<String>,
}

#[async_trait::async_trait]
impl ModelClient for OpenAiAdapter {
    async fn complete(&self, prompt: &str, schema_hint: &SchemaHint) -> Result<String, ModelError> {
        info!(
            model = %self.model,
            prompt_len = prompt.len(),
            "sending prompt to AI"
        );

        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: Self::system_prompt(schema_hint),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: 0.7,
            response_format: Some(ResponseFormat {
                format_type: "json_object".to_string(),
            }),
        };

        let response = self
            .client
            .post(&self.api_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ModelError::Transport(format!("request timed out: {}", e))
                } else {
                    ModelError::Transport(format!("HTTP request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %text, "AI API returned error");
            return Err(Self::classify_status(status, &text));
        }

        let chat_response: ChatResponse = response
            .json()
            .await
            .map_err(|e| ModelError::Malformed(format!("Failed to parse API response: {}", e)))?;

        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ModelError::Malformed("No response choices returned".to_string()))?;

        debug!(raw_len = content.len(), "received AI response");
        Ok(content)
    }
}
