//! Unsplash stock photo adapter.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{ImageProvider, ImageProviderError, ImageQuery, StockImage};

const UNSPLASH_SEARCH_URL: &str = "https://api.unsplash.com/search/photos";

/// Unsplash implementation of the ImageProvider port.
pub struct UnsplashProvider {
    access_key: Option<Secret<String>>,
    client: Client,
    base_url: String,
}

impl UnsplashProvider {
    pub fn new(access_key: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            access_key: access_key.filter(|k| !k.is_empty()).map(Secret::new),
            client,
            base_url: UNSPLASH_SEARCH_URL.to_string(),
        }
    }

    /// Overrides the search URL (tests point this at a local server).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

#[async_trait]
impl ImageProvider for UnsplashProvider {
    async fn search(&self, query: &ImageQuery) -> Result<Vec<StockImage>, ImageProviderError> {
        let access_key = self
            .access_key
            .as_ref()
            .ok_or(ImageProviderError::NotConfigured("unsplash"))?;

        let mut request = self
            .client
            .get(&self.base_url)
            .header(
                "Authorization",
                format!("Client-ID {}", access_key.expose_secret()),
            )
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

        let parsed: UnsplashResponse = response
            .json()
            .await
            .map_err(|e| ImageProviderError::InvalidResponse(e.to_string()))?;

        Ok(parsed
            .results
            .into_iter()
            .map(|photo| StockImage {
                id: photo.id,
                url: photo.urls.regular,
                thumbnail_url: photo.urls.thumb,
                attribution: photo.user.name,
                source: "unsplash".to_string(),
            })
            .collect())
    }

    fn name(&self) -> &'static str {
        "unsplash"
    }

    fn available(&self) -> bool {
        self.access_key.is_some()
    }
}

#[derive(Debug, Deserialize)]
struct UnsplashResponse {
    results: Vec<UnsplashPhoto>,
}

#[derive(Debug, Deserialize)]
struct UnsplashPhoto {
    id: String,
    urls: UnsplashUrls,
    user: UnsplashUser,
}

#[derive(Debug, Deserialize)]
struct UnsplashUrls {
    regular: String,
    thumb: String,
}

#[derive(Debug, Deserialize)]
struct UnsplashUser {
    name: String,
}
