//! Rate limit configuration types.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::ports::{RateLimitKey, RateLimitScope};

/// Complete rate limit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Global rate limits (infrastructure protection).
    pub global: GlobalLimits,
    /// Per-IP rate limits (brute-force protection).
    pub per_ip: IpLimits,
    /// Per-user default limits.
    pub per_user: UserLimits,
    /// Per-resource overrides for metered operations (AI text, image
    /// search, exports).
    pub resources: HashMap<String, ResourceLimits>,
}

/// Global rate limits for infrastructure protection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalLimits {
    /// Maximum requests per minute globally.
    pub requests_per_minute: u32,
}

/// Per-IP rate limits for brute-force protection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IpLimits {
    /// Maximum requests per minute per IP.
    pub requests_per_minute: u32,
}

/// Default per-user rate limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserLimits {
    /// General API requests per minute.
    pub requests_per_minute: u32,
}

/// Rate limits for a specific resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// Maximum requests per window.
    pub requests_per_window: u32,
    /// Window duration in seconds.
    pub window_secs: u32,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        let mut resources = HashMap::new();
        // Metered collaborators get their own buckets.
        resources.insert(
            "ai_text".to_string(),
            ResourceLimits {
                requests_per_window: 10,
                window_secs: 60,
            },
        );
        resources.insert(
            "image_search".to_string(),
            ResourceLimits {
                requests_per_window: 30,
                window_secs: 60,
            },
        );
        Self {
            global: GlobalLimits {
                requests_per_minute: 10_000,
            },
            per_ip: IpLimits {
                requests_per_minute: 100,
            },
            per_user: UserLimits {
                requests_per_minute: 120,
            },
            resources,
        }
    }
}

impl RateLimitConfig {
    /// Returns the (limit, window_secs) pair for a key.
    pub fn limits_for(&self, key: &RateLimitKey) -> (u32, u32) {
        match key.scope {
            RateLimitScope::Global => (self.global.requests_per_minute, 60),
            RateLimitScope::Ip => (self.per_ip.requests_per_minute, 60),
            RateLimitScope::User => match key.resource.as_deref() {
                Some(resource) => self
                    .resources
                    .get(resource)
                    .map(|r| (r.requests_per_window, r.window_secs))
                    .unwrap_or((self.per_user.requests_per_minute, 60)),
                None => (self.per_user.requests_per_minute, 60),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn resource_override_beats_user_default() {
        let config = RateLimitConfig::default();
        let user = UserId::new("t1").unwrap();

        let (limit, window) = config.limits_for(&RateLimitKey::user_resource(&user, "ai_text"));
        assert_eq!((limit, window), (10, 60));

        let (limit, _) = config.limits_for(&RateLimitKey::user(&user));
        assert_eq!(limit, 120);
    }

    #[test]
    fn unknown_resource_falls_back_to_user_default() {
        let config = RateLimitConfig::default();
        let user = UserId::new("t1").unwrap();
        let (limit, window) =
            config.limits_for(&RateLimitKey::user_resource(&user, "mystery"));
        assert_eq!((limit, window), (120, 60));
    }
}
