//! Rate limiter adapters.

mod config;
mod in_memory;
mod redis;

pub use config::{GlobalLimits, IpLimits, RateLimitConfig, ResourceLimits, UserLimits};
pub use in_memory::InMemoryRateLimiter;
pub use redis::RedisRateLimiter;
