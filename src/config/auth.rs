//! Authentication configuration (JWT validation)

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;

use super::error::ValidationError;

/// JWT validation configuration
///
/// Token issuance lives with the identity service; this app only needs the
/// shared signing secret to validate bearer tokens.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    /// Shared HS256 signing secret
    pub jwt_secret: Secret<String>,
}

impl AuthConfig {
    /// Validate auth configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.jwt_secret.expose_secret().len() < 32 {
            return Err(ValidationError::JwtSecretTooShort);
        }
        Ok(())
    }
}
