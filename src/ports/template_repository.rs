//! Template repository port.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, TemplateId, UserId};
use crate::domain::template::Template;

/// Repository port for Template persistence.
#[async_trait]
pub trait TemplateRepository: Send + Sync {
    /// Persist a new template and return the storage-assigned id.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn create(&self, template: &Template) -> Result<TemplateId, DomainError>;

    /// Find a template by its id.
    ///
    /// Returns `None` if not found.
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, DomainError>;

    /// List templates the user can see: their own, plus public and global
    /// ones. Most recently updated first.
    async fn list_visible_to(&self, user_id: &UserId) -> Result<Vec<Template>, DomainError>;

    /// Delete a template.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if the template doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &TemplateId) -> Result<(), DomainError>;
}
