//! Pexels stock photo adapter.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{ImageProvider, ImageProviderError, ImageQuery, StockImage};

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";

/// Pexels implementation of the ImageProvider port.
pub struct PexelsProvider {
    api_key: Option<Secret<String>>,
    client: Client,
    base_url: String,
}

impl PexelsProvider {
    /// Creates a provider; pass `None` when no key is configured and the
    /// provider reports itself unavailable.
    pub fn new(api_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            api_key: api_key.filter(|k| !k.is_empty()).map(Secret::new),
            client,
            base_url: PEXELS_SEARCH_URL.to_string(),
        }
    }

    /// Overrides the search URL (tests point this at a local server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl ImageProvider for PexelsProvider {
    async fn search(&self, query: &ImageQuery) -> Result<Vec<StockImage>, ImageProviderError> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or(ImageProviderError::NotConfigured("pexels"))?;

        let mut request = self
            .client
            .get(&self.base_url)
            .header("Authorization", api_key.expose_secret())
            .query(&[
                ("query", query.query.clone()),
                ("per_page", query.per_page.to_string()),
            ]);
        if let Some(orientation) = query.orientation {
            request = request.query(&[("orientation", orientation.as_str())]);
        }

        let response = request
            .send()
            .await
            .map_err(|e| ImageProviderError::Network(e.to_string()))?;

        match response.status() {
            StatusCode::OK => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ImageProviderError::Unauthorized);
            }
            StatusCode::TOO_MANY_REQUESTS => return Err(ImageProviderError::RateLimited),
            status => {
                return Err(ImageProviderError::InvalidResponse(format!(
                    "unexpected status {status}"
                )));
            }
        }

        let parsed: PexelsResponse = response
            .json()
            .await
            .map_err(|e| ImageProviderError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .photos
            .into_iter()
            .map(|photo| StockImage {
                id: photo.id.to_string(),
                url: photo.src.large,
                thumbnail_url: photo.src.medium,
                attribution: photo.photographer,
                source: "pexels".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "pexels"
    }

    fn available(&self) -> bool {
        self.api_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    id: u64,
    photographer: String,
    src: PexelsSrc,
}

#[derive(Debug, Deserialize)]
struct PexelsSrc {
    large: String,
    medium: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_means_unavailable() {
        assert!(!PexelsProvider::new(None).available());
        assert!(!PexelsProvider::new(Some(String::new())).available());
        assert!(PexelsProvider::new(Some("key".to_string())).available());
    }

    #[tokio::test]
    async fn search_without_key_fails_fast() {
        let provider = PexelsProvider::new(None);
        let err = provider
            .search(&ImageQuery::new("panther"))
            .await
            .unwrap_err();
        assert!(matches!(err, ImageProviderError::NotConfigured("pexels")));
    }
}
