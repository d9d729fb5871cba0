//! Newsletter repository port.
//!
//! Defines the contract for persisting and retrieving Newsletter
//! aggregates. The storage collaborator assigns ids on first create;
//! content and settings are stored as opaque JSON and must round-trip
//! losslessly.

use async_trait::async_trait;

use crate::domain::foundation::{
    DomainError, NewsletterId, NewsletterStatus, Timestamp, UserId,
};
use crate::domain::newsletter::Newsletter;

/// Repository port for Newsletter aggregate persistence.
#[async_trait]
pub trait NewsletterRepository: Send + Sync {
    /// Persist a new newsletter and return the storage-assigned id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, newsletter: &Newsletter) -> Result<NewsletterId, DomainError>;

    /// Update an existing newsletter. The aggregate must carry an id.
    ///
    /// # Errors
    ///
    /// - `NewsletterNotFound` if the newsletter doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, newsletter: &Newsletter) -> Result<(), DomainError>;

    /// Find a newsletter by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &NewsletterId) -> Result<Option<Newsletter>, DomainError>;

    /// List a user's newsletters, most recently updated first.
    async fn list_by_user(&self, user_id: &UserId) -> Result<Vec<NewsletterSummary>, DomainError>;

    /// Delete a newsletter.
    ///
    /// # Errors
    ///
    /// - `NewsletterNotFound` if the newsletter doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &NewsletterId) -> Result<(), DomainError>;
}

/// List-view projection of a newsletter.
#[derive(Debug, Clone)]
pub struct NewsletterSummary {
    pub id: NewsletterId,
    pub title: String,
    pub status: NewsletterStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newsletter_repository_is_object_safe() {
        fn _accepts_dyn(_repo: &dyn NewsletterRepository) {}
    }
}
