//! Stock image provider configuration

use serde::Deserialize;

/// Stock image search configuration
///
/// Providers without keys are skipped by the provider chain; with no keys
/// at all the image search endpoint reports itself unconfigured.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ImagesConfig {
    /// Pexels API key
    pub pexels_api_key: Option<String>,

    /// Unsplash access key
    pub unsplash_access_key: Option<String>,
}

impl ImagesConfig {
    /// True if at least one provider is configured
    pub fn has_any_provider(&self) -> bool {
        let configured = |key: &Option<String>| key.as_ref().is_some_and(|k| !k.is_empty());
        configured(&self.pexels_api_key) || configured(&self.unsplash_access_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn any_key_counts_as_configured() {
        let config = ImagesConfig {
            pexels_api_key: None,
            unsplash_access_key: Some("key".to_string()),
        };
        assert!(config.has_any_provider());
        assert!(!ImagesConfig::default().has_any_provider());
    }
}
