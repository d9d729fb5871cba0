//! Redis-backed rate limiter implementation for production deployments.
//!
//! Uses a fixed-window counter algorithm with Redis INCR + EXPIRE, which
//! stays correct across multiple API servers sharing one Redis.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;

use crate::domain::foundation::Timestamp;
use crate::ports::{
    RateLimitDenied, RateLimitError, RateLimitKey, RateLimitResult, RateLimitStatus, RateLimiter,
};

use super::config::RateLimitConfig;

/// Redis-backed rate limiter.
///
/// Algorithm per check:
/// 1. INCR the key
/// 2. If the count is 1, EXPIRE it for the window duration
/// 3. Deny once the count exceeds the limit
///
/// Fixed windows can briefly over-admit at window boundaries; acceptable
/// for quota protection.
#[derive(Clone)]
pub struct RedisRateLimiter {
    conn: MultiplexedConnection,
    config: RateLimitConfig,
}

impl RedisRateLimiter {
    /// Create a new Redis rate limiter.
    pub fn new(conn: MultiplexedConnection, config: RateLimitConfig) -> Self {
        Self { conn, config }
    }
}

#[async_trait]
impl RateLimiter for RedisRateLimiter {
    async fn check(&self, key: RateLimitKey) -> Result<RateLimitResult, RateLimitError> {
        let storage_key = key.storage_key();
        let (limit, window_secs) = self.config.limits_for(&key);

        let mut conn = self.conn.clone();

        let count: i64 = conn
            .incr(&storage_key, 1_i64)
            .await
            .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;

        if count == 1 {
            conn.expire::<_, ()>(&storage_key, window_secs as i64)
                .await
                .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;
        }

        let ttl: i64 = conn
            .ttl(&storage_key)
            .await
            .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;

        let now = Timestamp::now().as_unix_secs();
        let reset_secs = if ttl > 0 { ttl as u64 } else { window_secs as u64 };
        let reset_at = Timestamp::from_unix_secs(now + reset_secs);

        if count as u32 > limit {
            let retry_after = reset_secs as u32;
            return Ok(RateLimitResult::Denied(RateLimitDenied {
                limit,
                retry_after_secs: retry_after.max(1),
                scope: key.scope,
                message: format!(
                    "Rate limit exceeded for {}. Retry after {} seconds.",
                    key.scope, retry_after
                ),
            }));
        }

        Ok(RateLimitResult::Allowed(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(count as u32),
            reset_at,
            window_secs,
        }))
    }

    async fn status(&self, key: RateLimitKey) -> Result<RateLimitStatus, RateLimitError> {
        let storage_key = key.storage_key();
        let (limit, window_secs) = self.config.limits_for(&key);

        let mut conn = self.conn.clone();

        let count: Option<i64> = conn
            .get(&storage_key)
            .await
            .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;
        let ttl: i64 = conn
            .ttl(&storage_key)
            .await
            .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;

        let count = count.unwrap_or(0).max(0) as u32;
        let now = Timestamp::now().as_unix_secs();
        let reset_secs = if ttl > 0 { ttl as u64 } else { window_secs as u64 };

        Ok(RateLimitStatus {
            limit,
            remaining: limit.saturating_sub(count),
            reset_at: Timestamp::from_unix_secs(now + reset_secs),
            window_secs,
        })
    }

    async fn reset(&self, key: RateLimitKey) -> Result<(), RateLimitError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(&key.storage_key())
            .await
            .map_err(|e: redis::RedisError| RateLimitError::Unavailable(e.to_string()))?;
        Ok(())
    }
}
