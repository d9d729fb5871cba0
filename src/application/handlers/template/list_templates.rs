//! ListTemplatesHandler - lists templates visible to a user.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::template::Template;
use crate::ports::TemplateRepository;

/// Query for visible templates.
#[derive(Debug, Clone)]
pub struct ListTemplatesQuery {
    pub user_id: UserId,
}

/// Handler for listing templates.
pub struct ListTemplatesHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl ListTemplatesHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    /// Returns the user's own templates plus public and global ones.
    pub async fn handle(&self, query: ListTemplatesQuery) -> Result<Vec<Template>, DomainError> {
        self.templates.list_visible_to(&query.user_id).await
    }
}
