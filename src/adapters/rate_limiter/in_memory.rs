//! In-memory rate limiter implementation for testing and development.
//!
//! Uses a fixed-window counter algorithm with an in-memory HashMap.
//! Not suitable for production multi-server deployments.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// In-memory rate limiter for testing and single-server deployments.
#[derive(Debug)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    windows: Arc<RwLock<HashMap<String, WindowState>>>,
}

/// State for a single rate limit window.
#[derive(Debug, Clone)]
struct WindowState {
    count: u32,
    window_start: u64,
    window_secs: u32,
}

impl WindowState {
    fn expired(&self, now: u64) -> bool {
        now >= self.window_start + self.window_secs as u64
    }

    fn reset_secs(&self, now: u64) -> u64 {
        (self.window_start + self.window_secs as u64).saturating_sub(now)
    }
}

impl InMemoryRateLimiter {
    /// Create a new in-memory rate limiter.
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            windows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Create a rate limiter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(RateLimitConfig::default())
    }

    fn now_secs() -> u64 {
        Timestamp::now().as_unix_secs()
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let storage_key = key.storage_key();
        let (limit, window_secs) = self.config.limits_for(&key);
        let now = Self::now_secs();

        let mut windows = self.windows.write().await;
        let window = windows
            .entry(storage_key)
            .or_insert_with(|| WindowState {
                count: 0,
                window_start: now,
                window_secs,
            });

        if window.expired(now) {
            window.count = 0;
            window.window_start = now;
            window.window_secs = window_secs;
        }

        window.count += 1;

        if window.count > limit {
            let retry_after = window.reset_secs(now) as u32;
            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
                scope: key.scope,
                message: format!(
                    "Rate limit exceeded for {}. Retry after {} seconds.",
                    key.scope,
                    retry_after.max(1)
                ),
            }));
        }

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(window.count),
            reset_at: Timestamp::from_unix_secs(window.window_start + window.window_secs as u64),
            window_secs,
        }))
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let storage_key = key.storage_key();
        let (limit, window_secs) = self.config.limits_for(&key);
        let now = Self::now_secs();

        let windows = self.windows.read().await;
        let (count, reset_at) = match windows.get(&storage_key) {
            Some(window) if !window.expired(now) => (
                window.count,
                Timestamp::from_unix_secs(window.window_start + window.window_secs as u64),
            ),
            _ => (0, Timestamp::from_unix_secs(now + window_secs as u64)),
        };

        Ok(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(count),
            reset_at,
            window_secs,
        })
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        self.windows.write().await.remove(&key.storage_key());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::ports::RateLimitScope;
    use std::collections::HashMap;

    fn tight_limiter(limit: u32) -> InMemoryRateLimiter {
        let mut config = RateLimitConfig::default();
        config.per_ip.requests_per_minute = limit;
        config.per_user.requests_per_minute = limit;
        config.resources = HashMap::new();
        InMemoryRateLimiter::new(config)
    }

    #[tokio::test]
    async fn allows_up_to_the_limit_then_denies() {
        let limiter = tight_limiter(3);
        let key = RateLimitKey::ip("10.0.0.1");

        for _ in 0..3 {
            assert!(limiter.check(key.clone()).await.unwrap().is_allowed());
        }
        let result = limiter.check(key).await.unwrap();
        match result {
            RateLimitResult::Denied(denied) => {
                assert_eq!(denied.limit, 3);
                assert_eq!(denied.scope, RateLimitScope::Ip);
                assert!(denied.retry_after_secs >= 1);
            }
            RateLimitResult::Allowed(_) => panic!("expected denial"),
        }
    }

    #[tokio::test]
    async fn separate_keys_have_separate_windows() {
        let limiter = tight_limiter(1);
        assert!(limiter
            .check(RateLimitKey::ip("10.0.0.1"))
            .await
            .unwrap()
            .is_allowed());
        assert!(limiter
            .check(RateLimitKey::ip("10.0.0.2"))
            .await
            .unwrap()
            .is_allowed());
    }

    #[tokio::test]
    async fn status_does_not_consume_quota() {
        let limiter = tight_limiter(2);
        let user = UserId::new("t1").unwrap();
        let key = RateLimitKey::user(&user);

        for _ in 0..5 {
            let status = limiter.status(key.clone()).await.unwrap();
            assert_eq!(status.remaining, status.limit);
        }
    }

    #[tokio::test]
    async fn reset_restores_full_quota() {
        let limiter = tight_limiter(1);
        let key = RateLimitKey::ip("10.0.0.1");

        assert!(limiter.check(key.clone()).await.unwrap().is_allowed());
        assert!(limiter.check(key.clone()).await.unwrap().is_denied());

        limiter.reset(key.clone()).await.unwrap();
        assert!(limiter.check(key).await.unwrap().is_allowed());
    }
}
