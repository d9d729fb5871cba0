//! Auth token validator port.
//!
//! Token issuance lives with an external identity provider; this port only
//! validates bearer tokens presented to the API and extracts the user.

use async_trait::async_trait;

use crate::domain::foundation::{AuthError, AuthenticatedUser};

/// Port for validating bearer tokens.
///
/// Implementations must be cheap to call per-request (verify signature and
/// expiry locally, or cache remote introspection).
#[async_trait]
pub trait AuthTokenValidator: Send + Sync {
    /// Validate a bearer token and return the authenticated user.
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError>;
}
