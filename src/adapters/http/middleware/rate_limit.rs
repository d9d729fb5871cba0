//! Rate limiting middleware for axum.
//!
//! Checks limits in scope order - global, per-IP, then per-user when
//! authenticated - and reports status in standard headers:
//! `X-RateLimit-Limit`, `X-RateLimit-Remaining`, `X-RateLimit-Reset`, and
//! `Retry-After` on a 429. When the limiter backend is down the middleware
//! fails open: availability beats quota enforcement.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    extract::{ConnectInfo, Request, State},
    http::{HeaderName, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};

use crate::domain::foundation::AuthenticatedUser;
use crate::ports::{RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter};

/// Rate limiter middleware state.
pub type RateLimiterState = Arc<dyn RateLimiter>;

/// Standard rate limit header names.
pub mod headers {
    use super::HeaderName;

    /// Maximum requests allowed in the window.
    pub static X_RATELIMIT_LIMIT: HeaderName = HeaderName::from_static("x-ratelimit-limit");
    /// Requests remaining in the current window.
    pub static X_RATELIMIT_REMAINING: HeaderName =
        HeaderName::from_static("x-ratelimit-remaining");
    /// Unix timestamp when the window resets.
    pub static X_RATELIMIT_RESET: HeaderName = HeaderName::from_static("x-ratelimit-reset");
}

/// Rate limiting middleware checking global, IP, and user limits.
pub async fn rate_limit_middleware(
    State(limiter): State<RateLimiterState>,
    connect_info: Option<ConnectInfo<SocketAddr>>,
    request: Request,
    next: Next,
) -> Response {
    let client_ip = extract_client_ip(&request, connect_info.as_ref());
    let user = request.extensions().get::<AuthenticatedUser>().cloned();

    let mut keys = vec![RateLimitKey::global()];
    if let Some(ip) = &client_ip {
        keys.push(RateLimitKey::ip(ip));
    }
    if let Some(user) = &user {
        keys.push(RateLimitKey::user(&user.id));
    }

    let mut tightest: Option<RateLimitStatus> = None;
    for key in keys {
        match limiter.check(key).await {
            Ok(RateLimitResult::Denied(denied)) => {
                return rate_limit_response(denied.limit, denied.retry_after_secs);
            }
            Ok(RateLimitResult::Allowed(status)) => {
                let tighter = tightest
                    .as_ref()
                    .map(|current| status.remaining < current.remaining)
                    .unwrap_or(true);
                if tighter {
                    tightest = Some(status);
                }
            }
            Err(e) => {
                // Fail open for availability.
                tracing::warn!("Rate limiter unavailable: {}", e);
            }
        }
    }

    let mut response = next.run(request).await;
    if let Some(status) = tightest {
        apply_headers(response.headers_mut(), &status);
    }
    response
}

/// Client IP from forwarded headers, falling back to the socket address.
fn extract_client_ip(
    request: &Request,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    let forwarded = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty());

    forwarded.or_else(|| connect_info.map(|info| info.0.ip().to_string()))
}

fn apply_headers(headers: &mut axum::http::HeaderMap, status: &RateLimitStatus) {
    if let Ok(value) = HeaderValue::from_str(&status.limit.to_string()) {
        headers.insert(headers::X_RATELIMIT_LIMIT.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&status.remaining.to_string()) {
        headers.insert(headers::X_RATELIMIT_REMAINING.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&status.reset_at.as_unix_secs().to_string()) {
        headers.insert(headers::X_RATELIMIT_RESET.clone(), value);
    }
}

fn rate_limit_response(limit: u32, retry_after_secs: u32) -> Response {
    let mut response = (
        StatusCode::TOO_MANY_REQUESTS,
        Json(serde_json::json!({
            "error": "Too many requests",
            "code": "RATE_LIMITED",
            "retry_after_secs": retry_after_secs
        })),
    )
        .into_response();

    let headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&limit.to_string()) {
        headers.insert(headers::X_RATELIMIT_LIMIT.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(&retry_after_secs.to_string()) {
        headers.insert(http::header::RETRY_AFTER, value);
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::rate_limiter::{InMemoryRateLimiter, RateLimitConfig};
    use axum::{body::Body, http::Request as HttpRequest, middleware, routing::get, Router};
    use tower::ServiceExt;

    fn app(global_limit: u32) -> Router {
        let mut config = RateLimitConfig::default();
        config.global.requests_per_minute = global_limit;
        let limiter: RateLimiterState = Arc::new(InMemoryRateLimiter::new(config));

        Router::new()
            .route("/ping", get(|| async { "pong" }))
            .layer(middleware::from_fn_with_state(limiter, rate_limit_middleware))
    }

    #[tokio::test]
    async fn requests_under_the_limit_pass_with_headers() {
        let app = app(10);
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-ratelimit-limit"));
        assert!(response.headers().contains_key("x-ratelimit-remaining"));
    }

    #[tokio::test]
    async fn requests_over_the_limit_get_429_with_retry_after() {
        let app = app(1);

        let ok = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(ok.status(), StatusCode::OK);

        let denied = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/ping")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(denied.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(denied.headers().contains_key("retry-after"));
    }
}
