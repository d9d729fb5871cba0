//! Mock text generator for tests.
//!
//! Configurable responses, error injection, and call tracking so handler
//! tests run without a real AI API.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::{AiError, GeneratedText, TextGenerationRequest, TextGenerator};

/// Mock implementation of the TextGenerator port.
pub struct MockTextGenerator {
    responses: Mutex<VecDeque<Result<String, AiError>>>,
    requests: Mutex<Vec<TextGenerationRequest>>,
}

impl MockTextGenerator {
    /// A mock that always answers with the same text.
    pub fn with_response(content: impl Into<String>) -> Self {
        let mock = Self::new();
        mock.push_response(content);
        mock
    }

    pub fn new() -> Self {
        Self {
            responses: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Queues a successful response (consumed in order; the last one
    /// repeats).
    pub fn push_response(&self, content: impl Into<String>) {
        self.responses
            .lock()
            .expect("lock poisoned")
            .push_back(Ok(content.into()));
    }

    /// Queues an error.
    pub fn push_error(&self, error: AiError) {
        self.responses
            .lock()
            .expect("lock poisoned")
            .push_back(Err(error));
    }

    /// Number of generate calls made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().expect("lock poisoned").len()
    }

    /// The recorded requests, for assertions.
    pub fn requests(&self) -> Vec<TextGenerationRequest> {
        self.requests.lock().expect("lock poisoned").clone()
    }
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &TextGenerationRequest) -> Result<GeneratedText, AiError> {
        self.requests
            .lock()
            .expect("lock poisoned")
            .push(request.clone());

        let mut responses = self.responses.lock().expect("lock poisoned");
        let next = if responses.len() > 1 {
            responses.pop_front()
        } else {
            responses.front().cloned()
        };

        match next {
            Some(Ok(content)) => Ok(GeneratedText {
                content,
                model: "mock".to_string(),
            }),
            Some(Err(err)) => Err(err),
            None => Err(AiError::Provider("mock has no responses queued".to_string())),
        }
    }

    fn model_name(&self) -> String {
        "mock".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_queued_responses_in_order_then_repeats_the_last() {
        let mock = MockTextGenerator::new();
        mock.push_response("first");
        mock.push_response("second");

        let request = TextGenerationRequest::new("x");
        assert_eq!(mock.generate(&request).await.unwrap().content, "first");
        assert_eq!(mock.generate(&request).await.unwrap().content, "second");
        assert_eq!(mock.generate(&request).await.unwrap().content, "second");
        assert_eq!(mock.request_count(), 3);
    }

    #[tokio::test]
    async fn injected_errors_surface() {
        let mock = MockTextGenerator::new();
        mock.push_error(AiError::RateLimited);
        let err = mock
            .generate(&TextGenerationRequest::new("x"))
            .await
            .unwrap_err();
        assert!(matches!(err, AiError::RateLimited));
    }
}
