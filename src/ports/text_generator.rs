//! Text generator port - AI-assisted copy for rich text sections.
//!
//! A deliberate thin pass-through: one prompt in, one block of text out.
//! No streaming, no conversation state - the editor merges the result into
//! the section content with a blank-line separator.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for AI text generation.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate newsletter copy for the given request.
    async fn generate(&self, request: &TextGenerationRequest) -> Result<GeneratedText, AiError>;

    /// Provider/model name for logging.
    fn model_name(&self) -> String;
}

/// Requested writing tone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextTone {
    #[default]
    Friendly,
    Professional,
    Playful,
}

impl TextTone {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextTone::Friendly => "friendly",
            TextTone::Professional => "professional",
            TextTone::Playful => "playful",
        }
    }
}

/// A text generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextGenerationRequest {
    /// What the teacher asked for ("a reminder about the book fair").
    pub prompt: String,
    pub tone: TextTone,
    /// Soft cap passed to the provider.
    pub max_words: Option<u32>,
}

impl TextGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            tone: TextTone::default(),
            max_words: None,
        }
    }

    pub fn with_tone(mut self, tone: TextTone) -> Self {
        self.tone = tone;
        self
    }

    pub fn with_max_words(mut self, max_words: u32) -> Self {
        self.max_words = Some(max_words);
        self
    }
}

/// Generated newsletter copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedText {
    pub content: String,
    /// Which model produced it.
    pub model: String,
}

/// Errors from AI providers.
#[derive(Debug, Clone, Error)]
pub enum AiError {
    #[error("AI provider rejected credentials")]
    Unauthorized,

    #[error("AI provider rate limit exceeded")]
    RateLimited,

    #[error("AI request failed: {0}")]
    Network(String),

    #[error("AI provider returned an unexpected response: {0}")]
    InvalidResponse(String),

    #[error("AI provider error: {0}")]
    Provider(String),
}

impl AiError {
    /// True if retrying the same request may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(self, AiError::RateLimited | AiError::Network(_))
    }
}
