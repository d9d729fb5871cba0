//! OpenAI text generation adapter.
//!
//! Thin pass-through to the chat completions API: one prompt in, one block
//! of newsletter copy out. Retries transient failures with a linear
//! backoff.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::time::sleep;

use crate::ports::{AiError, GeneratedText, TextGenerationRequest, TextGenerator};

/// Configuration for the OpenAI provider.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    api_key: Secret<String>,
    /// Model to use (e.g., "gpt-4o-mini").
    pub model: String,
    /// Base URL for the API.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Maximum retries on transient failures.
    pub max_retries: u32,
}

impl OpenAiConfig {
    /// Creates a new configuration with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            model: "gpt-4o-mini".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
            timeout: Duration::from_secs(30),
            max_retries: 3,
        }
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }
}

/// OpenAI implementation of the TextGenerator port.
pub struct OpenAiTextGenerator {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiTextGenerator {
    /// Creates a new provider with the given configuration.
    pub fn new(config: OpenAiConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }

    fn build_request(&self, request: &TextGenerationRequest) -> ChatRequest {
        let system = format!(
            "You write copy for a classroom newsletter that goes home to \
             families. Tone: {}. Plain text only - no headings, no markdown \
             syntax beyond **bold** and *italic*.",
            request.tone.as_str()
        );

        let mut user = request.prompt.clone();
        if let Some(max_words) = request.max_words {
            user.push_str(&format!("\n\nKeep it under {max_words} words."));
        }

        ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system,
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user,
                },
            ],
            temperature: 0.7,
        }
    }

    async fn send_once(&self, body: &ChatRequest) -> Result<GeneratedText, AiError> {
        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key())
            .json(body)
            .send()
            .await
            .map_err(|e| AiError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(AiError::Unauthorized);
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(AiError::RateLimited),
            status if status.is_server_error() => {
                return Err(AiError::Network(format!("server error: {status}")));
            }
            status => {
                let detail = response.text().await.unwrap_or_default();
                return Err(AiError::Provider(format!("{status}: {detail}")));
            }
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| AiError::InvalidResponse(e.to_string()))?;

        let content = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| AiError::InvalidResponse("no choices in response".to_string()))?;

        Ok(GeneratedText {
            content: content.trim().to_string(),
            model: parsed.model,
        })
    }
}

#[async_trait]
impl TextGenerator for OpenAiTextGenerator {
    async fn generate(&self, request: &TextGenerationRequest) -> Result<GeneratedText, AiError> {
        let body = self.build_request(request);

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(text) => return Ok(text),
                Err(err) if err.is_transient() && attempt < self.config.max_retries => {
                    attempt += 1;
                    tracing::warn!(attempt, error = %err, "retrying AI completion");
                    sleep(Duration::from_millis(500 * attempt as u64)).await;
                }
                Err(err) => return Err(err),
            }
        }
    }

    fn model_name(&self) -> String {
        format!("openai/{}", self.config.model)
    }
}

// ════════════════════════════════════════════════════════════════════════
// Wire types
// ════════════════════════════════════════════════════════════════════════

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    model: String,
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::TextTone;

    #[test]
    fn request_carries_tone_and_word_cap() {
        let provider = OpenAiTextGenerator::new(OpenAiConfig::new("sk-test"));
        let request = TextGenerationRequest::new("a book fair reminder")
            .with_tone(TextTone::Playful)
            .with_max_words(80);

        let body = provider.build_request(&request);
        assert_eq!(body.messages.len(), 2);
        assert!(body.messages[0].content.contains("playful"));
        assert!(body.messages[1].content.contains("under 80 words"));
    }

    #[test]
    fn model_name_includes_provider_prefix() {
        let provider =
            OpenAiTextGenerator::new(OpenAiConfig::new("sk-test").with_model("gpt-4o"));
        assert_eq!(provider.model_name(), "openai/gpt-4o");
    }
}
