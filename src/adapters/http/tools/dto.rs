//! HTTP DTOs for editor tool endpoints.

use serde::{Deserialize, Serialize};

use crate::ports::{GeneratedText, ImageOrientation, StockImage, TextTone};

// ════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════

/// Request for AI-generated newsletter copy.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateTextRequest {
    pub prompt: String,
    #[serde(default)]
    pub tone: TextTone,
    #[serde(default)]
    pub max_words: Option<u32>,
}

/// Query parameters for stock image search.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageSearchQuery {
    pub query: String,
    #[serde(default)]
    pub per_page: Option<u32>,
    #[serde(default)]
    pub orientation: Option<ImageOrientation>,
}

// ════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════

/// Generated copy response.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateTextResponse {
    pub content: String,
    pub model: String,
}

impl From<GeneratedText> for GenerateTextResponse {
    fn from(text: GeneratedText) -> Self {
        Self {
            content: text.content,
            model: text.model,
        }
    }
}

/// Image search response.
#[derive(Debug, Clone, Serialize)]
pub struct ImageSearchResponse {
    pub results: Vec<StockImage>,
}
