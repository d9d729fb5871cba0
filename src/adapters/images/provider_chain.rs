//! Provider chain - tries stock image providers in configuration order.

use async_trait::async_trait;
use std::sync::Arc;

use crate::ports::{ImageProvider, ImageProviderError, ImageQuery, StockImage};

/// Tries each configured provider in order, skipping unavailable ones and
/// falling through on transient failures. The first provider that answers
/// wins.
pub struct ImageProviderChain {
    providers: Vec<Arc<dyn ImageProvider>>,
}

impl ImageProviderChain {
    pub fn new(providers: Vec<Arc<dyn ImageProvider>>) -> Self {
        Self { providers }
    }
}

#[async_trait]
impl ImageProvider for ImageProviderChain {
    async fn search(&self, query: &ImageQuery) -> Result<Vec<StockImage>, ImageProviderError> {
        let mut last_error = ImageProviderError::NotConfigured("image providers");

        for provider in &self.providers {
            if !provider.available() {
                continue;
            }
            match provider.search(query).await {
                Ok(results) => return Ok(results),
                Err(err) => {
                    tracing::warn!(provider = provider.name(), error = %err, "image provider failed, trying next");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }

    fn name(&self) -> &'static str {
        "chain"
    }

    fn available(&self) -> bool {
        self.providers.iter().any(|p| p.available())
    }
}
