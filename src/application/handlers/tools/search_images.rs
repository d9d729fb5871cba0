//! SearchImagesHandler - stock photo search for image sections.
//!
//! Thin pass-through to the provider chain, gated by a per-user rate limit
//! because the upstream APIs are metered.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::{
    ImageOrientation, ImageProvider, ImageQuery, RateLimitKey, RateLimitResult, RateLimiter,
    StockImage,
};

/// Rate limit resource bucket for image search.
const IMAGE_SEARCH_RESOURCE: &str = "image_search";

/// Query for stock images.
#[derive(Debug, Clone)]
pub struct SearchImagesQuery {
    pub user_id: UserId,
    pub query: String,
    pub per_page: Option<u32>,
    pub orientation: Option<ImageOrientation>,
}

/// Handler for stock image search.
pub struct SearchImagesHandler {
    provider: Arc<dyn ImageProvider>,
    rate_limiter: Arc<dyn RateLimiter>,
}

impl SearchImagesHandler {
    pub fn new(provider: Arc<dyn ImageProvider>, rate_limiter: Arc<dyn RateLimiter>) -> Self {
        Self {
            provider,
            rate_limiter,
        }
    }

    pub async fn handle(&self, query: SearchImagesQuery) -> Result<Vec<StockImage>, DomainError> {
        if query.query.trim().is_empty() {
            return Err(DomainError::validation("query", "search query cannot be empty"));
        }

        let key = RateLimitKey::user_resource(&query.user_id, IMAGE_SEARCH_RESOURCE);
        match self.rate_limiter.check(key).await {
            Ok(RateLimitResult::Denied(denied)) => {
                return Err(DomainError::new(ErrorCode::RateLimited, denied.message)
                    .with_detail("retry_after_secs", denied.retry_after_secs.to_string()));
            }
            Ok(RateLimitResult::Allowed(_)) => {}
            Err(err) => {
                tracing::warn!(error = %err, "rate limiter unavailable for image_search check");
            }
        }

        let mut request = ImageQuery::new(query.query.trim());
        if let Some(per_page) = query.per_page {
            request = request.with_per_page(per_page.clamp(1, 50));
        }
        if let Some(orientation) = query.orientation {
            request = request.with_orientation(orientation);
        }

        self.provider
            .search(&request)
            .await
            .map_err(|err| DomainError::new(ErrorCode::ImageProviderError, err.to_string()))
    }
}
