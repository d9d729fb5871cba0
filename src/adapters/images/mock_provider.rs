//! Mock image provider for tests.

use async_trait::async_trait;
use std::sync::Mutex;

use crate::ports::{ImageProvider, ImageProviderError, ImageQuery, StockImage};

/// Configurable mock implementation of the ImageProvider port.
pub struct MockImageProvider {
    results: Vec<StockImage>,
    error: Option<ImageProviderError>,
    available: bool,
    queries: Mutex<Vec<ImageQuery>>,
}

impl MockImageProvider {
    /// A mock that returns the given results for every search.
    pub fn with_results(results: Vec<StockImage>) -> Self {
        Self {
            results,
            error: None,
            available: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A mock that fails every search with the given error.
    pub fn failing(error: ImageProviderError) -> Self {
        Self {
            results: Vec::new(),
            error: Some(error),
            available: true,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// A mock that reports itself unconfigured.
    pub fn unavailable() -> Self {
        Self {
            results: Vec::new(),
            error: None,
            available: false,
            queries: Mutex::new(Vec::new()),
        }
    }

    /// The recorded queries, for assertions.
    pub fn queries(&self) -> Vec<ImageQuery> {
        self.queries.lock().expect("lock poisoned").clone()
    }
}

#[async_trait]
impl ImageProvider for MockImageProvider {
    async fn search(&self, query: &ImageQuery) -> Result<Vec<StockImage>, ImageProviderError> {
        self.queries
            .lock()
            .expect("lock poisoned")
            .push(query.clone());
        match &self.error {
            Some(err) => Err(err.clone()),
            None => Ok(self.results.clone()),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }

    fn available(&self) -> bool {
        self.available
    }
}
