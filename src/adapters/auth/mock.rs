//! Mock token validator for tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::domain::foundation::{AuthError, AuthenticatedUser, UserId};
use crate::ports::AuthTokenValidator;

/// Mock implementation of the AuthTokenValidator port.
///
/// Maps literal token strings to users; everything else is rejected.
#[derive(Default)]
pub struct MockTokenValidator {
    users: Mutex<HashMap<String, AuthenticatedUser>>,
}

impl MockTokenValidator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a token that validates to the given user id.
    pub fn with_user(self, token: impl Into<String>, user_id: &str) -> Self {
        let user = AuthenticatedUser::new(
            UserId::new(user_id).expect("test user id is non-empty"),
            format!("{user_id}@school.test"),
            None,
        );
        self.users
            .lock()
            .expect("lock poisoned")
            .insert(token.into(), user);
        self
    }
}

#[async_trait]
impl AuthTokenValidator for MockTokenValidator {
    async fn validate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        self.users
            .lock()
            .expect("lock poisoned")
            .get(token)
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn registered_token_validates() {
        let validator = MockTokenValidator::new().with_user("tok-1", "teacher-1");
        let user = validator.validate("tok-1").await.unwrap();
        assert_eq!(user.id.as_str(), "teacher-1");
    }

    #[tokio::test]
    async fn unknown_token_is_rejected() {
        let validator = MockTokenValidator::new();
        assert!(matches!(
            validator.validate("nope").await.unwrap_err(),
            AuthError::InvalidToken
        ));
    }
}
