//! Redis configuration (rate limiting backend)

use serde::Deserialize;

use super::error::ValidationError;

/// Redis connection configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct RedisConfig {
    /// Connection URL (redis://host:port). Optional: without it the app
    /// falls back to the in-memory rate limiter.
    pub url: Option<String>,
}

impl RedisConfig {
    /// True if a Redis backend is configured
    pub fn is_configured(&self) -> bool {
        self.url.as_ref().is_some_and(|u| !u.is_empty())
    }

    /// Validate Redis configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(url) = &self.url {
            if !url.is_empty() && !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_url_is_valid_and_unconfigured() {
        let config = RedisConfig::default();
        assert!(config.validate().is_ok());
        assert!(!config.is_configured());
    }

    #[test]
    fn non_redis_scheme_is_rejected() {
        let config = RedisConfig {
            url: Some("http://localhost".to_string()),
        };
        assert!(config.validate().is_err());
    }
}
