//! Image provider port - stock photo search for image sections.
//!
//! Abstracts the stock-image services (Pexels, Unsplash, ...) behind one
//! search contract. Providers are thin pass-throughs: ranking and
//! filtering stay with the service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Port for stock image search.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    /// Search for stock images matching the query.
    async fn search(&self, query: &ImageQuery) -> Result<Vec<StockImage>, ImageProviderError>;

    /// Provider name for logging and attribution.
    fn name(&self) -> &'static str;

    /// True if the provider is configured (has credentials) and usable.
    fn available(&self) -> bool;
}

/// A stock image search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageQuery {
    pub query: String,
    pub per_page: u32,
    pub orientation: Option<ImageOrientation>,
}

impl ImageQuery {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            per_page: 12,
            orientation: None,
        }
    }

    pub fn with_per_page(mut self, per_page: u32) -> Self {
        self.per_page = per_page;
        self
    }

    pub fn with_orientation(mut self, orientation: ImageOrientation) -> Self {
        self.orientation = Some(orientation);
        self
    }
}

/// Requested image orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageOrientation {
    Landscape,
    Portrait,
    Square,
}

impl ImageOrientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageOrientation::Landscape => "landscape",
            ImageOrientation::Portrait => "portrait",
            ImageOrientation::Square => "square",
        }
    }
}

/// One stock image search result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockImage {
    /// Provider-scoped id.
    pub id: String,
    /// Full-size image URL (what gets stored in an image section).
    pub url: String,
    /// Smaller URL for picker previews.
    pub thumbnail_url: String,
    /// Attribution line, e.g. photographer name.
    pub attribution: String,
    /// Which provider returned this result.
    pub source: String,
}

/// Errors from image providers.
#[derive(Debug, Clone, Error)]
pub enum ImageProviderError {
    #[error("Image provider not configured: {0}")]
    NotConfigured(&'static str),

    #[error("Image provider rejected credentials")]
    Unauthorized,

    #[error("Image provider rate limit exceeded")]
    RateLimited,

    #[error("Image provider request failed: {0}")]
    Network(String),

    #[error("Image provider returned an unexpected response: {0}")]
    InvalidResponse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_provider_is_object_safe() {
        fn _accepts_dyn(_provider: &dyn ImageProvider) {}
    }

    #[test]
    fn query_builder_sets_fields() {
        let query = ImageQuery::new("panther mascot")
            .with_per_page(5)
            .with_orientation(ImageOrientation::Landscape);
        assert_eq!(query.per_page, 5);
        assert_eq!(query.orientation, Some(ImageOrientation::Landscape));
    }
}
