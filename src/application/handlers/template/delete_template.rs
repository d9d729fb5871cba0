//! DeleteTemplateHandler - removes a template the caller owns.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, TemplateId, UserId};
use crate::ports::TemplateRepository;

/// Command to delete a template.
#[derive(Debug, Clone)]
pub struct DeleteTemplateCommand {
    pub template_id: TemplateId,
    pub user_id: UserId,
}

/// Handler for deleting templates.
pub struct DeleteTemplateHandler {
    templates: Arc<dyn TemplateRepository>,
}

impl DeleteTemplateHandler {
    pub fn new(templates: Arc<dyn TemplateRepository>) -> Self {
        Self { templates }
    }

    /// Only the owner may delete a template, public or not.
    pub async fn handle(&self, cmd: DeleteTemplateCommand) -> Result<(), DomainError> {
        let template = self
            .templates
            .find_by_id(&cmd.template_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::TemplateNotFound,
                    format!("template {} not found", cmd.template_id),
                )
            })?;

        if template.user_id() != &cmd.user_id {
            return Err(DomainError::new(
                ErrorCode::Forbidden,
                "template belongs to another user",
            ));
        }

        self.templates.delete(&cmd.template_id).await
    }
}
