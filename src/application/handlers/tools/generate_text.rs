//! GenerateTextHandler - AI-assisted newsletter copy.
//!
//! Thin pass-through to the text generation provider, gated by a per-user
//! rate limit because the upstream API is metered.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{
    GeneratedText, RateLimitKey, RateLimitResult, RateLimiter, TextGenerationRequest,
    TextGenerator, TextTone,
};

/// Rate limit resource bucket for AI generation.
const AI_TEXT_RESOURCE: &str = "ai_text";

/// Command to generate newsletter copy.
#[derive(Debug, Clone)]
pub struct GenerateTextCommand {
    pub user_id: UserId,
    pub prompt: String,
    pub tone: TextTone,
    pub max_words: Option<u32>,
}

/// Handler for AI text generation.
pub struct GenerateTextHandler {
    generator: Arc<dyn TextGenerator>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl GenerateTextHandler {
    pub fn new(generator: Arc<dyn TextGenerator>, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            generator,
            rate_limiter,
        }
    }

    pub async fn handle(&self, cmd: GenerateTextCommand) -> Result<GeneratedText, DomainError> {
        if cmd.prompt.trim().is_empty() {
            return Err(DomainError::validation("prompt", "prompt cannot be empty"));
        }

        let key = RateLimitKey::user_resource(&cmd.user_id, AI_TEXT_RESOURCE);
        match self.rate_limiter.check(key).await {
            Ok(RateLimitResult::Denied(denied)) => {
                return Err(DomainError::new(ErrorCode::RateLimited, denied.message)
                    .with_detail("retry_after_secs", denied.retry_after_secs.to_string()));
            }
            Ok(RateLimitResult::Allowed(_)) => {}
            Err(err) => {
                // Fail open: the limiter protects spend, it is not a
                // correctness gate.
                tracing::warn!(error = %err, "rate limiter unavailable for ai_text check");
            }
        }

        let mut request = TextGenerationRequest::new(cmd.prompt).with_tone(cmd.tone);
        if let Some(max_words) = cmd.max_words {
            request = request.with_max_words(max_words);
        }

        self.generator
            .generate(&request)
            .await
            .map_err(|err| DomainError::new(ErrorCode::AiProviderError, err.to_string()))
    }
}
